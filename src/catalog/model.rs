//! Professor documents

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identifier::ObjectId;
use crate::reviews::Review;

/// A professor and the reviews written about them.
///
/// `overall_rating` is a cache of the mean review rating. It is only ever
/// written by aggregate recomputation; `reviews` is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub professor_name: String,
    pub department: String,
    pub introduction: String,
    pub picture: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub courses: BTreeSet<ObjectId>,
    #[serde(default)]
    pub overall_rating: Option<f64>,
}

/// Descriptive fields, the only part of a professor plain updates may touch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorDetails {
    pub professor_name: String,
    pub department: String,
    pub introduction: String,
    pub picture: String,
}

impl Professor {
    /// New professor with no reviews, no courses and no rating
    pub fn new(id: ObjectId, details: ProfessorDetails) -> Self {
        Self {
            id,
            professor_name: details.professor_name,
            department: details.department,
            introduction: details.introduction,
            picture: details.picture,
            reviews: Vec::new(),
            courses: BTreeSet::new(),
            overall_rating: None,
        }
    }

    pub fn details(&self) -> ProfessorDetails {
        ProfessorDetails {
            professor_name: self.professor_name.clone(),
            department: self.department.clone(),
            introduction: self.introduction.clone(),
            picture: self.picture.clone(),
        }
    }
}

/// Listing projection of a professor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorSummary {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub professor_name: String,
    pub department: String,
    pub introduction: String,
    pub overall_rating: Option<f64>,
    pub picture: String,
}

impl From<&Professor> for ProfessorSummary {
    fn from(p: &Professor) -> Self {
        Self {
            id: p.id,
            professor_name: p.professor_name.clone(),
            department: p.department.clone(),
            introduction: p.introduction.clone(),
            overall_rating: p.overall_rating,
            picture: p.picture.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> ProfessorDetails {
        ProfessorDetails {
            professor_name: "Patrick Hill".to_string(),
            department: "Computer Science".to_string(),
            introduction: "Teaches web programming".to_string(),
            picture: "http://example.com/hill.jpg".to_string(),
        }
    }

    #[test]
    fn test_new_professor_document() {
        let id = ObjectId::parse("624724af974aef308ff7cc6a").unwrap();
        let doc = serde_json::to_value(Professor::new(id, details())).unwrap();

        assert_eq!(doc["_id"], "624724af974aef308ff7cc6a");
        assert_eq!(doc["professorName"], "Patrick Hill");
        assert_eq!(doc["reviews"], json!([]));
        assert_eq!(doc["courses"], json!([]));
        assert!(doc["overallRating"].is_null());
    }

    #[test]
    fn test_missing_arrays_default() {
        let doc = json!({
            "_id": "624724af974aef308ff7cc6a",
            "professorName": "Hill",
            "department": "CS",
            "introduction": "Intro",
            "picture": "http://example.com/p.jpg"
        });
        let professor: Professor = serde_json::from_value(doc).unwrap();
        assert!(professor.reviews.is_empty());
        assert!(professor.overall_rating.is_none());
    }

    #[test]
    fn test_summary_projection() {
        let professor = Professor::new(ObjectId::new(), details());
        let summary = ProfessorSummary::from(&professor);
        let doc = serde_json::to_value(&summary).unwrap();

        assert!(doc.get("reviews").is_none());
        assert!(doc.get("courses").is_none());
        assert_eq!(doc["department"], "Computer Science");
        assert_eq!(summary.professor_name, "Patrick Hill");
    }
}
