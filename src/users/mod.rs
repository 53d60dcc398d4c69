//! # Users
//!
//! Authors of reviews. Each user document keeps its own copy of every
//! review the user wrote.

mod model;
mod service;
mod store;

pub use model::User;
pub use service::UserService;
pub use store::{DocumentUserStore, UserStore, USERS};
