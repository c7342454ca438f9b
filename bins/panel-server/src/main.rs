use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use panel_core::{joins, MemoryPanel, PanelStore};
use panel_web::{Controller, ControllerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,panel_web=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Panel bridge starting...");

    // Configuration
    let bind_addr: SocketAddr = std::env::var("PANEL_BIND")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;
    let app_root = std::env::current_dir()?;
    let log_path = app_root.join("User").join("logfile.txt");
    std::fs::create_dir_all(app_root.join("User"))?;

    let config = ControllerConfig {
        name: "panel-bridge".to_string(),
        bind_addr,
        base_path: std::env::var("PANEL_BASE_PATH").unwrap_or_default(),
        log_path,
    };

    // The panel proxy, shared between the HTTP surface and the signal feeder
    let panel = Arc::new(RwLock::new(MemoryPanel::new()));

    // Panel-side collaborators observe signal writes through subscribe/notify
    panel.write().await.subscribe(Box::new(|change| {
        tracing::debug!(join = change.join, value = ?change.value, "signal changed");
    }));

    let controller = Controller::new(config, panel.clone());
    let addr = match controller.start().await {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            return Err(e.into());
        }
    };

    // Stand-in for the panel UI: keeps the interlock and slider joins live
    let demo_handle = tokio::spawn(async move {
        drive_demo_panel(panel).await;
    });

    tracing::info!("Panel bridge ready!");
    tracing::info!("   HTTP API: http://{}/", addr);
    tracing::info!("");
    tracing::info!("Try these commands:");
    tracing::info!("   curl http://{}/interlockstatus", addr);
    tracing::info!("   curl http://{}/getslider", addr);
    tracing::info!("   curl http://{}/helloworld/hi", addr);

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = demo_handle => {
            tracing::warn!("Demo panel feeder stopped");
        }
    }

    if let Err(e) = controller.stop().await {
        tracing::warn!("Shutdown: {}", e);
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Drive the panel joins the way the touchpanel UI would.
///
/// Rotates the interlock group, toggles the echo button and sweeps the
/// slider so the HTTP surface has live data to report.
async fn drive_demo_panel(panel: Arc<RwLock<MemoryPanel>>) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut tick: u64 = 0;

    loop {
        interval.tick().await;
        tick += 1;

        let mut panel = panel.write().await;

        let active = (tick % 3) as usize;
        for (i, join) in joins::INTERLOCK.iter().enumerate() {
            panel.set_boolean(*join, i == active);
        }

        panel.set_boolean(joins::ECHO_BUTTON, tick % 2 == 0);

        let level = ((tick * 4096) % u64::from(u16::MAX)) as u16;
        panel.set_ushort(joins::SLIDER_LEVEL, level);
    }
}
