// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::time::Instant;
use tracing::info;

use taskledger_api::{ApiError, CreateUserDto, DeletedUserDto, PatchUserDto, UserDto};
use taskledger_model::UserId;

use super::{api_error_response, propagated_request_id, with_request_id};
use crate::AppState;

pub(crate) async fn list_users_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let registry = state.users.lock().await;
    let payload: Vec<UserDto> = registry.as_slice().iter().map(UserDto::from).collect();
    let resp = Json(payload).into_response();
    drop(registry);
    state
        .metrics
        .observe_request("/users", StatusCode::OK, started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn get_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match UserId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let registry = state.users.lock().await;
            match registry.get(id) {
                Some(user) => Json(UserDto::from(user)).into_response(),
                None => api_error_response(ApiError::user_not_found(id)),
            }
        }
    };
    state
        .metrics
        .observe_request("/users/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn create_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateUserDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/users", id = body.id, "create user");
    let mut registry = state.users.lock().await;
    let resp = match registry.create(body.into_user()) {
        Ok(user) => (StatusCode::CREATED, Json(UserDto::from(&user))).into_response(),
        Err(err) => api_error_response(ApiError::from(err)),
    };
    drop(registry);
    state
        .metrics
        .observe_request("/users", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn replace_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Json(body): Json<CreateUserDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match UserId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            if body.id != id.value() {
                api_error_response(ApiError::id_mismatch(id.value(), body.id))
            } else {
                let mut registry = state.users.lock().await;
                match registry.replace(id, body.into_user()) {
                    Ok(user) => Json(UserDto::from(&user)).into_response(),
                    Err(err) => api_error_response(ApiError::from(err)),
                }
            }
        }
    };
    state
        .metrics
        .observe_request("/users/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn patch_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    Json(body): Json<PatchUserDto>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match UserId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let mut registry = state.users.lock().await;
            match registry.patch(id, &body.into_patch()) {
                Ok(user) => Json(UserDto::from(&user)).into_response(),
                Err(err) => api_error_response(ApiError::from(err)),
            }
        }
    };
    state
        .metrics
        .observe_request("/users/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}

pub(crate) async fn delete_user_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    info!(request_id = %request_id, route = "/users/:id", id = %raw_id, "delete user");
    let resp = match UserId::parse(&raw_id) {
        Err(err) => api_error_response(ApiError::invalid_path_id(&raw_id, &err.to_string())),
        Ok(id) => {
            let mut registry = state.users.lock().await;
            match registry.delete(id) {
                Ok(user) => Json(DeletedUserDto {
                    user_id: user.id.value(),
                })
                .into_response(),
                Err(err) => api_error_response(ApiError::from(err)),
            }
        }
    };
    state
        .metrics
        .observe_request("/users/:id", resp.status(), started.elapsed())
        .await;
    with_request_id(resp, &request_id)
}
