//! # HTTP Server Module
//!
//! axum server exposing the catalog, users and the review lifecycle.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/observability/metrics` - Counters
//! - `/professors`, `/professors/top`, `/professors/:id` - Catalog
//! - `POST /professors/:id/reviews` - Add a review
//! - `DELETE /reviews/:id` - Remove a review
//! - `/users`, `/users/:id` - Users

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod professor_routes;
pub mod review_routes;
pub mod server;
pub mod state;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AppState;
