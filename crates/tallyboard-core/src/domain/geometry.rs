//! Main-window geometry: size, splitter, and the two list columns.
//!
//! The window shows the counters and sounds lists side by side, separated by
//! a draggable splitter.  The column widths are derived from the splitter:
//!
//! ```text
//! first  = splitter_position
//! second = window_width - 21 - splitter_position
//! ```
//!
//! where 21 px is taken by the splitter bar and window chrome.

use crate::codec::{format_float, parse_float};

/// Window width used when the store has no size entry.
pub const DEFAULT_WINDOW_WIDTH: f64 = 216.0;
/// Window height used when the store has no size entry.
pub const DEFAULT_WINDOW_HEIGHT: f64 = 200.0;
/// Window width used when the stored size is malformed.
pub const FALLBACK_WINDOW_WIDTH: f64 = 500.0;
/// Window height used when the stored size is malformed.
pub const FALLBACK_WINDOW_HEIGHT: f64 = 350.0;
/// Horizontal space taken by the splitter bar and window chrome.
pub const SPLITTER_CHROME: f64 = 21.0;

/// A proportionally sized ("star") column width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnWidth {
    pub value: f64,
}

impl ColumnWidth {
    pub fn star(value: f64) -> Self {
        Self { value }
    }
}

/// Window size plus splitter state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    width: f64,
    height: f64,
    splitter_position: f64,
    first_column: ColumnWidth,
    second_column: ColumnWidth,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        let mut geometry = Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            splitter_position: 0.0,
            first_column: ColumnWidth::default(),
            second_column: ColumnWidth::default(),
        };
        geometry.set_splitter_position(0.0);
        geometry
    }
}

impl WindowGeometry {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn splitter_position(&self) -> f64 {
        self.splitter_position
    }

    pub fn first_column(&self) -> ColumnWidth {
        self.first_column
    }

    pub fn second_column(&self) -> ColumnWidth {
        self.second_column
    }

    /// Sets the window size.  Column widths are left untouched until the
    /// splitter moves again.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Moves the splitter and derives both column widths from it.
    pub fn set_splitter_position(&mut self, position: f64) {
        self.splitter_position = position;
        self.first_column = ColumnWidth::star(position);
        self.second_column = ColumnWidth::star(self.width - SPLITTER_CHROME - position);
    }

    /// Sets the first column width; the splitter follows it and the second
    /// column is derived again.
    pub fn set_first_column_width(&mut self, width: ColumnWidth) {
        self.set_splitter_position(width.value);
    }
}

/// Parses a stored window size `"W\tH"`.
///
/// Returns `None` unless both fields are finite numbers.
pub fn parse_window_size(text: &str) -> Option<(f64, f64)> {
    let mut fields = text.split('\t');
    let width = parse_float(fields.next()?)?;
    let height = parse_float(fields.next()?)?;
    Some((width, height))
}

/// Formats a window size as `"W\tH"`.
pub fn format_window_size(width: f64, height: f64) -> String {
    format!("{}\t{}", format_float(width), format_float(height))
}
