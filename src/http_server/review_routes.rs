//! Review HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};

use super::errors::ApiResult;
use super::state::AppState;
use crate::reviews::Deletion;

/// Create review routes
pub fn review_routes() -> Router<Arc<AppState>> {
    Router::new().route("/:id", delete(remove_review_handler))
}

async fn remove_review_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deletion>> {
    Ok(Json(state.reviews.remove_review(&id).await?))
}
