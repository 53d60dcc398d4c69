//! Professor HTTP Routes
//!
//! Catalog CRUD plus the review-adding endpoint, which is addressed by the
//! professor being reviewed.

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
use crate::catalog::{Professor, ProfessorInput, ProfessorSummary};
use crate::reviews::{Deletion, Review};
use crate::validation::integral_rating;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReviewRequest {
    pub user_id: String,
    pub comment: String,
    pub rating: serde_json::Number,
}

/// Create professor routes
pub fn professor_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/top", get(top_handler))
        .route(
            "/:id",
            get(get_handler).patch(update_handler).delete(remove_handler),
        )
        .route("/:id/reviews", post(add_review_handler))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProfessorSummary>>> {
    Ok(Json(state.professors.list().await?))
}

async fn top_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<ProfessorSummary>>> {
    Ok(Json(state.professors.top3().await?))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProfessorInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Professor>)> {
    let Json(input) = payload?;
    let professor = state.professors.create(&input).await?;
    Ok((StatusCode::CREATED, Json(professor)))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Professor>> {
    Ok(Json(state.professors.get(&id).await?))
}

async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProfessorInput>, JsonRejection>,
) -> ApiResult<Json<Professor>> {
    let Json(input) = payload?;
    Ok(Json(state.professors.update(&id, &input).await?))
}

async fn remove_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Deletion>> {
    Ok(Json(state.professors.remove(&id).await?))
}

async fn add_review_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AddReviewRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let Json(request) = payload?;
    let rating = integral_rating(&request.rating).map_err(|e| state.reviews.reject(e))?;

    let review = state
        .reviews
        .add_review(&request.user_id, &id, &request.comment, rating)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
