//! # Professor Catalog
//!
//! Professor documents, their persistence seam, and the plain CRUD path.
//! Reviews nested inside a professor are written by
//! [`ReviewCoordinator`](crate::reviews::ReviewCoordinator), not here.

mod model;
mod service;
mod store;

pub use model::{Professor, ProfessorDetails, ProfessorSummary};
pub use service::{ProfessorInput, ProfessorService};
pub use store::{DocumentProfessorStore, ProfessorStore, PROFESSORS};
