#![forbid(unsafe_code)]
//! HTTP boundary over the CSV-backed task store and the in-memory user
//! registry. The store sits behind a single async mutex so the table and its
//! file mirror always mutate under one exclusion boundary.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use tokio::sync::Mutex;

use taskledger_store::{TaskStore, UserRegistry};

mod config;
mod http;
mod metrics;

pub use config::{validate_startup_config, ApiConfig, CONFIG_SCHEMA_VERSION};
pub use metrics::RequestMetrics;

pub const CRATE_NAME: &str = "taskledger-server";

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<Mutex<TaskStore>>,
    pub users: Arc<Mutex<UserRegistry>>,
    pub api: ApiConfig,
    pub metrics: Arc<RequestMetrics>,
    pub request_id_seed: Arc<AtomicU64>,
    pub ready: Arc<AtomicBool>,
}

impl AppState {
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: TaskStore, api: ApiConfig) -> Self {
        Self {
            tasks: Arc::new(Mutex::new(store)),
            users: Arc::new(Mutex::new(UserRegistry::new())),
            api,
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            ready: Arc::new(AtomicBool::new(true)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(http::handlers::metrics_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route(
            "/tasks",
            get(http::handlers::list_tasks_handler).post(http::handlers::create_task_handler),
        )
        .route(
            "/tasks/:id",
            get(http::handlers::get_task_handler)
                .put(http::handlers::replace_task_handler)
                .patch(http::handlers::patch_task_handler)
                .delete(http::handlers::delete_task_handler),
        )
        .route(
            "/users",
            get(http::users::list_users_handler).post(http::users::create_user_handler),
        )
        .route(
            "/users/:id",
            get(http::users::get_user_handler)
                .put(http::users::replace_user_handler)
                .patch(http::users::patch_user_handler)
                .delete(http::users::delete_user_handler),
        )
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
