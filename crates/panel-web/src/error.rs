//! Error types for the dispatch controller.
//!
//! Three families, per the error-handling design:
//! - [`LifecycleError`]: start/stop misuse, logged and non-fatal
//! - [`RouteError`]: route table registration faults
//! - [`DispatchError`]: any failure during route handling, caught at the
//!   single dispatch boundary and surfaced as HTTP 401

use panel_log::LogError;
use thiserror::Error;

/// Errors from server start/stop transitions.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Start was requested while the listener is already running.
    #[error("server is already running")]
    AlreadyRunning,

    /// Stop was requested while no listener is running.
    #[error("server is not running")]
    NotRunning,

    /// Listener setup failed; state remains stopped.
    #[error("server setup failed: {0}")]
    Setup(#[from] std::io::Error),
}

/// Errors from route table registration.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Route names are unique (case-insensitive) within the table.
    #[error("route name already registered: {0}")]
    DuplicateName(&'static str),
}

/// Errors raised while handling a matched route.
///
/// Handlers never map these locally; the dispatcher translates any variant
/// into the 401 error envelope.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request body was not the expected JSON shape.
    #[error("invalid request payload: {0}")]
    BadPayload(#[from] serde_json::Error),

    /// The log store failed to read or append.
    #[error(transparent)]
    Log(#[from] LogError),

    /// The request body could not be read off the wire.
    #[error("request body unreadable: {0}")]
    Body(String),

    /// A pattern variable the handler requires was not bound.
    #[error("route variable missing: {0}")]
    MissingVariable(&'static str),
}
