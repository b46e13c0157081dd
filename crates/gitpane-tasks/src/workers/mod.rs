//! Worker implementations, one module per operation family
//!
//! Workers receive everything they need by value or behind `Arc` at spawn
//! time and communicate exclusively through the event queue. A worker
//! failure is always converted into a final error event; nothing panics
//! across the task boundary.

use std::sync::Arc;

use gitpane_core::config::Config;
use gitpane_core::events::EventSender;
use gitpane_core::ports::{ILocalFileSystem, IRemoteRepository};

pub mod delete;
pub mod download;
pub mod info;
pub mod rename;
pub mod upload;

/// Shared handles cloned into every spawned worker
#[derive(Clone)]
pub struct WorkerCtx {
    pub remote: Arc<dyn IRemoteRepository>,
    pub local: Arc<dyn ILocalFileSystem>,
    pub events: EventSender,
    pub config: Arc<Config>,
}
