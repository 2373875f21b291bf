use std::env;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use site_dashboard::api::{AppState, create_router};
use site_dashboard::auth::SessionStore;
use site_dashboard::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/demo";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Drops expired sessions every `period` until the process exits.
fn spawn_session_sweeper(sessions: Arc<SessionStore>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = sessions.purge_expired(Utc::now()).await;
            if removed > 0 {
                debug!(removed, "Swept expired sessions");
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config_dir = env::var("SITE_DASHBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let loader = ConfigLoader::load(&config_dir)?;
    let bind_addr = env::var("SITE_DASHBOARD_BIND")
        .unwrap_or_else(|_| loader.settings().server.bind_addr.clone());
    let sweep_period = Duration::from_secs(loader.settings().auth.session_sweep_secs);

    info!(
        config_dir = %config_dir,
        seed_sites = loader.config().seed().sites.len(),
        "Configuration loaded"
    );

    let state = AppState::new(loader);
    spawn_session_sweeper(Arc::clone(state.sessions()), sweep_period);

    let app = create_router(state);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Site dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Site dashboard stopped");
    Ok(())
}
