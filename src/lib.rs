//! profrate - professor reviews with a consistent aggregate rating
//!
//! A review is one logical record stored in two documents: the author's
//! user document and the reviewed professor's document. The professor also
//! caches the mean rating of its reviews. [`reviews::ReviewCoordinator`]
//! owns the write sequence that keeps these in step without cross-document
//! transactions.
//!
//! # Layout
//!
//! - [`identifier`]: 24-hex-char document ids, validation and generation
//! - [`document`]: in-process document store (collections of JSON documents)
//! - [`catalog`]: professors, their store seam, CRUD
//! - [`users`]: users, their store seam, registration
//! - [`reviews`]: add/remove review, aggregate recomputation
//! - [`http_server`]: axum API
//! - [`cli`]: clap entry point and configuration

pub mod catalog;
pub mod cli;
pub mod document;
pub mod error;
pub mod http_server;
pub mod identifier;
pub mod observability;
pub mod reviews;
pub mod users;
pub mod validation;
