//! # panel-web
//!
//! HTTP dispatch controller for the panel bridge.
//!
//! This crate provides:
//! - The fixed route table mapping paths to named routes
//! - Table-driven request dispatch over shared panel state and the log store
//! - The controller owning the HTTP listener lifecycle (start/stop guarded
//!   by a lifecycle lock)
//! - Wire payload types and the JSON error/help envelope
//!
//! ## Architecture
//!
//! Every inbound request lands in a single dispatch entry point (an Axum
//! fallback handler): the controller, not the framework, resolves the route
//! and the `(method, route)` handler. Handlers return
//! `Result<_, DispatchError>`; the dispatcher maps the error variant to a
//! single HTTP 401 envelope.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use panel_web::{Controller, ControllerConfig};
//!
//! let panel = Arc::new(RwLock::new(MemoryPanel::new()));
//! let controller = Controller::new(ControllerConfig::default(), panel);
//! controller.start().await?;
//! ```

pub mod controller;
pub mod dispatch;
pub mod error;
pub mod routes;

// Re-exports
pub use controller::Controller;
pub use error::{DispatchError, LifecycleError};
pub use routes::{create_router, Route, RouteTable};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use panel_core::MemoryPanel;
use panel_log::LogStore;
use tokio::sync::RwLock;

/// Configuration for the dispatch controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Server name used in log output.
    pub name: String,
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Base path prefixed to every route pattern. Empty = server root.
    pub base_path: String,
    /// Path of the flat log file.
    pub log_path: PathBuf,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            name: "panel-bridge".to_string(),
            bind_addr: "0.0.0.0:3000".parse().unwrap(),
            base_path: String::new(),
            log_path: PathBuf::from("User/logfile.txt"),
        }
    }
}

/// Shared state for all request handlers.
///
/// This is wrapped in Arc and shared across the dispatch entry point; the
/// panel handle is additionally shared with whatever feeds panel-side
/// signal changes.
pub struct BridgeState {
    /// The panel signal store, shared with the panel event side.
    pub panel: Arc<RwLock<MemoryPanel>>,
    /// The append-only log file store.
    pub log: LogStore,
    /// The fixed route table registered at startup.
    pub routes: RouteTable,
}

/// Type alias for shared state in Axum handlers.
pub type AppState = Arc<BridgeState>;
