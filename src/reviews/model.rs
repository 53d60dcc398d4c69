//! Review record
//!
//! One logical review is stored twice: inside the author's `reviews` array
//! and inside the professor's `reviews` array. Both copies share the same
//! immutable `_id`.

use serde::{Deserialize, Serialize};

use crate::identifier::ObjectId;

/// A rated comment by a user about a professor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Author
    pub user_id: ObjectId,
    /// Subject
    pub professor_id: ObjectId,
    /// Author's username at creation time. Not updated if the user is renamed.
    pub username: String,
    pub comment: String,
    pub rating: u8,
}

/// Confirmation returned by a successful removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deletion {
    pub deleted: bool,
}

impl Deletion {
    pub fn confirmed() -> Self {
        Self { deleted: true }
    }
}
