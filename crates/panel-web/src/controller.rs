//! Server lifecycle management.
//!
//! The controller owns the HTTP listener. Exactly one listener exists at a
//! time; start/stop transitions are serialized by the lifecycle lock, which
//! is never held during request handling. Start-while-running and
//! stop-while-stopped are reported, non-fatal errors: the caller logs and
//! continues.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use panel_core::MemoryPanel;
use panel_log::LogStore;

use crate::error::LifecycleError;
use crate::routes::{create_router, RouteTable};
use crate::{AppState, BridgeState, ControllerConfig};

/// Server lifecycle state.
enum Lifecycle {
    Stopped,
    Running {
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<()>,
    },
}

/// The dispatch controller.
///
/// Owns the route table, the shared handler state and the listener task.
pub struct Controller {
    config: ControllerConfig,
    state: AppState,
    lifecycle: Mutex<Lifecycle>,
}

impl Controller {
    /// Create a controller over the shared panel handle.
    ///
    /// The route table is fixed at construction; the listener is not
    /// started until [`start`](Self::start).
    pub fn new(config: ControllerConfig, panel: Arc<RwLock<MemoryPanel>>) -> Self {
        let state = Arc::new(BridgeState {
            panel,
            log: LogStore::new(&config.log_path),
            routes: RouteTable::standard(&config.base_path),
        });
        Self {
            config,
            state,
            lifecycle: Mutex::new(Lifecycle::Stopped),
        }
    }

    /// The shared handler state.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Whether the listener is currently running.
    pub async fn is_running(&self) -> bool {
        matches!(*self.lifecycle.lock().await, Lifecycle::Running { .. })
    }

    /// The bound listener address, if running.
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        match *self.lifecycle.lock().await {
            Lifecycle::Running { addr, .. } => Some(addr),
            Lifecycle::Stopped => None,
        }
    }

    /// Start the HTTP listener.
    ///
    /// Fails with [`LifecycleError::AlreadyRunning`] if a listener exists;
    /// any setup failure is logged and leaves the state `Stopped`. The
    /// lifecycle lock is released on every exit path.
    pub async fn start(&self) -> Result<SocketAddr, LifecycleError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if matches!(*lifecycle, Lifecycle::Running { .. }) {
            warn!(name = %self.config.name, "start requested but server is already running");
            return Err(LifecycleError::AlreadyRunning);
        }

        info!(name = %self.config.name, addr = %self.config.bind_addr, "starting panel bridge server");
        let listener = match TcpListener::bind(self.config.bind_addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(error = %e, "failed to bind HTTP listener");
                return Err(LifecycleError::Setup(e));
            }
        };
        let addr = listener.local_addr().map_err(LifecycleError::Setup)?;

        let app = create_router(self.state.clone());
        let (shutdown, rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = serve.await {
                error!(error = %e, "HTTP server terminated with error");
            }
        });

        *lifecycle = Lifecycle::Running {
            addr,
            shutdown,
            task,
        };
        info!(%addr, "panel bridge server started");
        Ok(addr)
    }

    /// Stop the HTTP listener.
    ///
    /// Signals graceful shutdown and waits for the listener task to end.
    /// Fails with [`LifecycleError::NotRunning`] if nothing is running.
    pub async fn stop(&self) -> Result<(), LifecycleError> {
        let mut lifecycle = self.lifecycle.lock().await;
        match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running {
                addr,
                shutdown,
                task,
            } => {
                let _ = shutdown.send(());
                let _ = task.await;
                info!(%addr, "panel bridge server stopped");
                Ok(())
            }
            Lifecycle::Stopped => {
                warn!(name = %self.config.name, "stop requested but server is not running");
                Err(LifecycleError::NotRunning)
            }
        }
    }
}
