#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;

use taskledger_server::{build_router, validate_startup_config, ApiConfig, AppState};
use taskledger_store::TaskStore;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("TASKLEDGER_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("TASKLEDGER_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let csv_path = PathBuf::from(
        env::var("TASKLEDGER_CSV_PATH").unwrap_or_else(|_| "data/tasks.csv".to_string()),
    );
    let api = ApiConfig {
        max_body_bytes: env_usize("TASKLEDGER_MAX_BODY_BYTES", 16 * 1024),
        create_overwrite: env_bool("TASKLEDGER_CREATE_OVERWRITE", false),
    };
    validate_startup_config(&api)?;

    // A missing or unreadable ledger is fatal; the service has nothing to
    // serve without it.
    let store = TaskStore::load(&csv_path).map_err(|e| {
        error!(path = %csv_path.display(), "task ledger load failed: {e}");
        format!("cannot start without the task ledger: {e}")
    })?;

    let state = AppState::with_config(store, api);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind failed on {bind_addr}: {e}"))?;
    info!("taskledger-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
