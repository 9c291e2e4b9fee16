//! Audio backend adapters.
//!
//! Actual playback is outside this crate.  The command-line tool runs with a
//! [`NullBackend`], which only logs what a real player would have been told;
//! that is enough to exercise the backend lifecycle (create, route device,
//! set volume) end to end.
//!
//! # Testability
//!
//! The [`mock`] module provides a backend that records every call so tests
//! can assert on the exact sequence the settings service produced.

use tallyboard_core::PlayerBackend;
use tracing::debug;

use crate::application::ports::{AudioBackend, AudioBackendFactory};

pub mod mock;

/// A backend that accepts every call and plays nothing.
#[derive(Debug)]
pub struct NullBackend {
    kind: PlayerBackend,
    volume: u8,
    device: Option<usize>,
}

impl NullBackend {
    pub fn new(kind: PlayerBackend) -> Self {
        Self {
            kind,
            volume: 0,
            device: None,
        }
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// The routed device; always `None` for backends without device routing.
    pub fn device(&self) -> Option<usize> {
        self.device
    }
}

impl AudioBackend for NullBackend {
    fn kind(&self) -> PlayerBackend {
        self.kind
    }

    fn set_volume(&mut self, volume: u8) {
        debug!(backend = %self.kind, volume, "volume applied");
        self.volume = volume;
    }

    fn set_device(&mut self, index: usize) {
        if !self.kind.supports_device_routing() {
            debug!(backend = %self.kind, index, "device routing not supported; ignored");
            return;
        }
        debug!(backend = %self.kind, index, "output device applied");
        self.device = Some(index);
    }
}

/// Builds [`NullBackend`]s and answers the WMP capability probe from a flag.
#[derive(Debug, Clone, Copy)]
pub struct NullBackendFactory {
    wmp_available: bool,
}

impl NullBackendFactory {
    pub fn new(wmp_available: bool) -> Self {
        Self { wmp_available }
    }
}

impl AudioBackendFactory for NullBackendFactory {
    fn is_available(&self, kind: PlayerBackend) -> bool {
        match kind {
            PlayerBackend::Wmp => self.wmp_available,
            PlayerBackend::Native => true,
        }
    }

    fn create(&self, kind: PlayerBackend) -> Box<dyn AudioBackend> {
        debug!(backend = %kind, "creating audio backend");
        Box::new(NullBackend::new(kind))
    }
}
