// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::time::Instant;
use tracing::info;

use taskledger_api::{ApiError, CreateTaskDto, DeletedTaskDto, PatchTaskDto, TaskDto};
use taskledger_model::TaskId;
use taskledger_store::ConflictPolicy;

use super::{api_error_response, make_request_id, propagated_request_id, with_request_id};
use crate::{AppState, CONFIG_SCHEMA_VERSION, CRATE_NAME};

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = (StatusCode::OK, "ok").into_response();
    state
        .metrics
        .observe_request("/healthz", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = if state.ready.load(Ordering::Relaxed) {
        (StatusCode::OK, "ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
    };
    state
        .metrics
        .observe_request("/readyz", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let payload = json!({
        "crate": CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": CONFIG_SCHEMA_VERSION,
    });
    let resp = Json(payload).into_response();
    state
        .metrics
        .observe_request("/v1/version", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    let request_id = make_request_id(&state);
    let body = state.metrics.render().await;
    with_request_id((StatusCode::OK, body).into_response(), &request_id)
}

pub(crate) async fn list_tasks_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks", "request start");
    let store = state.tasks.lock().await;
    let payload: Vec<TaskDto> = store.get_all().iter().map(TaskDto::from).collect();
    let resp = Json(payload).into_response();
    drop(store);
    state
        .metrics
        .observe_request("/tasks", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn get_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks/:id", id = %raw_id, "request start");
    let resp = match TaskId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let store = state.tasks.lock().await;
            match store.get(id) {
                Some(task) => Json(TaskDto::from(task)).into_response(),
                None => api_error_response(ApiError::task_not_found(id)),
            }
        }
    };
    state
        .metrics
        .observe_request("/tasks/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn create_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateTaskDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks", id = body.id, "create task");
    let mut store = state.tasks.lock().await;
    let id = TaskId::new(body.id);
    let resp = if !state.api.create_overwrite && store.get(id).is_some() {
        api_error_response(ApiError::duplicate_id(body.id))
    } else {
        let policy = if state.api.create_overwrite {
            ConflictPolicy::Overwrite
        } else {
            ConflictPolicy::Reject
        };
        match store.create(body.into_task(), policy) {
            Ok(task) => (StatusCode::CREATED, Json(TaskDto::from(&task))).into_response(),
            Err(err) => api_error_response(ApiError::from(err)),
        }
    };
    drop(store);
    state
        .metrics
        .observe_request("/tasks", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn replace_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Json(body): Json<CreateTaskDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks/:id", id = %raw_id, "replace task");
    let resp = match TaskId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let mut store = state.tasks.lock().await;
            if store.get(id).is_none() {
                api_error_response(ApiError::task_not_found(id))
            } else if body.id != id.value() {
                api_error_response(ApiError::id_mismatch(id.value(), body.id))
            } else {
                match store.replace(id, body.into_task()) {
                    Ok(task) => Json(TaskDto::from(&task)).into_response(),
                    Err(err) => api_error_response(ApiError::from(err)),
                }
            }
        }
    };
    state
        .metrics
        .observe_request("/tasks/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn patch_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Json(body): Json<PatchTaskDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks/:id", id = %raw_id, "patch task");
    let resp = match TaskId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let mut store = state.tasks.lock().await;
            match store.patch(id, &body.into_patch()) {
                Ok(task) => Json(TaskDto::from(&task)).into_response(),
                Err(err) => api_error_response(ApiError::from(err)),
            }
        }
    };
    state
        .metrics
        .observe_request("/tasks/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn delete_task_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/tasks/:id", id = %raw_id, "delete task");
    let resp = match TaskId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let mut store = state.tasks.lock().await;
            match store.delete(id) {
                Ok(task) => Json(DeletedTaskDto {
                    task_id: task.id.value(),
                })
                .into_response(),
                Err(err) => api_error_response(ApiError::from(err)),
            }
        }
    };
    state
        .metrics
        .observe_request("/tasks/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}
