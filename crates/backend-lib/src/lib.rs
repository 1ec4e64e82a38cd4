// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core functionality for the roomfeed chat broadcaster.
//!
//! The heart of the crate is [`room::RoomRegistry`] and
//! [`room_log::RoomLog`]: a concurrent map of per-room append-only message
//! logs, queried incrementally by timestamp. Everything else (router,
//! pages, config, errors) is the boundary around that core.

pub mod config;
pub mod error;
pub mod http_router;
pub mod metrics;
pub mod pages;
pub mod room;
pub mod room_log;
pub mod validation;

pub use roomfeed_common::{ChatMessage, MessageBatch, PostMessage};

use std::sync::Arc;

use crate::config::Settings;
use crate::room::RoomRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Room registry: one message log per room identifier
    pub registry: Arc<RoomRegistry>,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(settings: Settings) -> Self {
        Self {
            registry: Arc::new(RoomRegistry::new()),
            settings: Arc::new(settings),
        }
    }

    /// Create a new application state with default settings
    pub fn new_default() -> Self {
        Self::new(Settings::default())
    }
}
