//! Infrastructure layer for Tallyboard.
//!
//! Contains the adapters behind the application ports: the INI settings
//! store, the audio backends, the device directory, and the presentation
//! bridge that renders settings snapshots.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `tallyboard_core`, but MUST NOT be imported by the `application` or domain
//! layers (outside their tests).

pub mod audio;
pub mod devices;
pub mod storage;
pub mod ui_bridge;
