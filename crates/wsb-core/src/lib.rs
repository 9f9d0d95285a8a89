//! Core domain + dispatch logic for the WhatsApp status bot.
//!
//! This crate is intentionally transport-agnostic. The WhatsApp protocol
//! client (a gateway sidecar) lives behind a port (trait) implemented in the
//! adapter crate, so the dispatcher can be exercised against a mock.

pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod events;
pub mod logging;
pub mod messaging;

pub use errors::{Error, Result};
