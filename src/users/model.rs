//! User documents

use serde::{Deserialize, Serialize};

use crate::identifier::ObjectId;
use crate::reviews::Review;

/// A registered user and every review they have written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl User {
    pub fn new(id: ObjectId, username: String) -> Self {
        Self {
            id,
            username,
            reviews: Vec::new(),
        }
    }
}
