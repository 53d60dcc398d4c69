//! User HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::ApiResult;
use super::state::AppState;
use crate::users::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// Create user routes
pub fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(register_handler))
        .route("/:id", get(get_user_handler))
}

async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(request) = payload?;
    let user = state.users.register(&request.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get(&id).await?))
}
