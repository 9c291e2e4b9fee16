//! Recording audio backend for tests.
//!
//! Every backend created by a [`RecordingBackendFactory`] appends to the
//! factory's shared call log, so a test keeps the factory handle and inspects
//! the log after handing a clone to the service.

use std::cell::RefCell;
use std::rc::Rc;

use tallyboard_core::PlayerBackend;

use crate::application::ports::{AudioBackend, AudioBackendFactory};

/// One observed backend interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Created(PlayerBackend),
    SetDevice(usize),
    SetVolume(u8),
}

type CallLog = Rc<RefCell<Vec<BackendCall>>>;

/// A backend that records calls into a shared log.
///
/// Unlike a real backend it records `SetDevice` only when the kind supports
/// device routing, mirroring a backend that ignores the call.
pub struct RecordingBackend {
    kind: PlayerBackend,
    log: CallLog,
}

impl AudioBackend for RecordingBackend {
    fn kind(&self) -> PlayerBackend {
        self.kind
    }

    fn set_volume(&mut self, volume: u8) {
        self.log.borrow_mut().push(BackendCall::SetVolume(volume));
    }

    fn set_device(&mut self, index: usize) {
        if self.kind.supports_device_routing() {
            self.log.borrow_mut().push(BackendCall::SetDevice(index));
        }
    }
}

/// Factory for [`RecordingBackend`]s.  Clones share the same log.
#[derive(Clone)]
pub struct RecordingBackendFactory {
    wmp_available: bool,
    log: CallLog,
}

impl RecordingBackendFactory {
    pub fn new(wmp_available: bool) -> Self {
        Self {
            wmp_available,
            log: CallLog::default(),
        }
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.log.borrow().clone()
    }

    /// Forgets the calls recorded so far.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl AudioBackendFactory for RecordingBackendFactory {
    fn is_available(&self, kind: PlayerBackend) -> bool {
        kind == PlayerBackend::Native || self.wmp_available
    }

    fn create(&self, kind: PlayerBackend) -> Box<dyn AudioBackend> {
        self.log.borrow_mut().push(BackendCall::Created(kind));
        Box::new(RecordingBackend {
            kind,
            log: Rc::clone(&self.log),
        })
    }
}
