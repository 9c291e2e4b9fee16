//! Application layer of Tallyboard.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure encode/decode rules in `tallyboard-core`) and the infrastructure
//! (files, audio devices).
//!
//! Code in this layer:
//!
//! - **Orchestrates** domain objects to fulfil a user goal (e.g., "change
//!   the volume, tell the audio backend, and persist everything").
//! - **Depends on abstractions** (traits in [`ports`]) rather than concrete
//!   implementations, so a test can run against an in-memory store.
//! - **Contains no file system access** of its own.
//!
//! # Sub-modules
//!
//! - **`ports`** – The collaborator traits: key/value store, device
//!   directory, audio backend and backend factory.
//!
//! - **`settings`** – The [`Settings`](settings::Settings) aggregate: load,
//!   save, duplicate and the equivalence used by the settings dialog.
//!
//! - **`manage_settings`** – [`SettingsService`](manage_settings::SettingsService),
//!   which routes every mutation, keeps the backend in sync and publishes
//!   change notifications.

pub mod manage_settings;
pub mod ports;
pub mod settings;
