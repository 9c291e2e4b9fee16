//! Domain entities for Tallyboard.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: no file access, no audio API, no UI.  Everything here can be
//! compiled and tested on any platform.
//!
//! # What lives here
//!
//! - **`key_chord`** – hotkey chords and their all-or-nothing decoding.
//! - **`file_group`** – clip path lists sharing one base directory, with the
//!   portable / non-portable path policy.
//! - **`media`** – counters and sounds, and their tab-separated store rows.
//! - **`device`** – output devices and stored-name → index resolution.
//! - **`geometry`** – window size, splitter and derived column widths.
//! - **`player`** – the audio backend selection.

pub mod device;
pub mod file_group;
pub mod geometry;
pub mod key_chord;
pub mod media;
pub mod player;
