//! Input checks
//!
//! Every externally supplied value passes through one of these functions
//! before it reaches a store. Each returns the normalized value (trimmed
//! strings, parsed identifiers) or a [`ValidationError`].

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identifier::{self, ObjectId};

/// Lowest accepted rating
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating
pub const RATING_MAX: u8 = 5;

pub const DEFAULT_MAX_COMMENT_LENGTH: usize = 1000;
pub const MAX_PROFESSOR_NAME_LENGTH: usize = 100;
pub const MAX_DEPARTMENT_LENGTH: usize = 100;
pub const MAX_INTRODUCTION_LENGTH: usize = 2000;

/// Bounds applied to review input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLimits {
    pub max_comment_length: usize,
}

impl Default for ReviewLimits {
    fn default() -> Self {
        Self {
            max_comment_length: DEFAULT_MAX_COMMENT_LENGTH,
        }
    }
}

fn picture_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("picture pattern compiles")
    })
}

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("username pattern compiles"))
}

/// Validate an identifier supplied as `field`
pub fn check_identifier(field: &'static str, raw: &str) -> Result<ObjectId, ValidationError> {
    identifier::validate(raw).map_err(|source| ValidationError::InvalidIdentifier { field, source })
}

/// Trim, then require non-empty and at most `max` characters
fn check_text(field: &'static str, raw: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(trimmed.to_string())
}

pub fn check_comment(raw: &str, limits: &ReviewLimits) -> Result<String, ValidationError> {
    check_text("comment", raw, limits.max_comment_length)
}

pub fn check_rating(value: i64) -> Result<u8, ValidationError> {
    if value < RATING_MIN as i64 || value > RATING_MAX as i64 {
        return Err(ValidationError::RatingOutOfRange {
            value,
            min: RATING_MIN,
            max: RATING_MAX,
        });
    }
    Ok(value as u8)
}

/// Accept only integral JSON numbers as ratings. Range is checked by
/// [`check_rating`].
pub fn integral_rating(value: &serde_json::Number) -> Result<i64, ValidationError> {
    value.as_i64().ok_or_else(|| ValidationError::Malformed {
        field: "rating",
        reason: format!("{} is not an integer", value),
    })
}

pub fn check_professor_name(raw: &str) -> Result<String, ValidationError> {
    check_text("professorName", raw, MAX_PROFESSOR_NAME_LENGTH)
}

pub fn check_department(raw: &str) -> Result<String, ValidationError> {
    check_text("department", raw, MAX_DEPARTMENT_LENGTH)
}

pub fn check_introduction(raw: &str) -> Result<String, ValidationError> {
    check_text("introduction", raw, MAX_INTRODUCTION_LENGTH)
}

pub fn check_picture(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "picture" });
    }
    if !picture_pattern().is_match(trimmed) {
        return Err(ValidationError::Malformed {
            field: "picture",
            reason: "must be an http or https URL".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

pub fn check_username(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field: "username" });
    }
    if !username_pattern().is_match(trimmed) {
        return Err(ValidationError::Malformed {
            field: "username",
            reason: "3 to 32 characters of letters, digits, '_', '.' or '-'".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_field_is_reported() {
        let err = check_identifier("userId", "xyz").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidIdentifier { field: "userId", .. }
        ));
    }

    #[test]
    fn test_comment_bounds() {
        let limits = ReviewLimits {
            max_comment_length: 5,
        };
        assert_eq!(check_comment("  Great ", &ReviewLimits::default()).unwrap(), "Great");
        assert_eq!(
            check_comment("   ", &limits),
            Err(ValidationError::Empty { field: "comment" })
        );
        assert_eq!(
            check_comment("toolong", &limits),
            Err(ValidationError::TooLong {
                field: "comment",
                len: 7,
                max: 5
            })
        );
        // Length counts characters, not bytes
        assert!(check_comment("ééééé", &limits).is_ok());
    }

    #[test]
    fn test_rating_range() {
        assert_eq!(check_rating(1).unwrap(), 1);
        assert_eq!(check_rating(5).unwrap(), 5);
        assert!(check_rating(0).is_err());
        assert!(check_rating(6).is_err());
        assert!(check_rating(-3).is_err());
    }

    #[test]
    fn test_rating_number_must_be_integral() {
        let fractional: serde_json::Number = serde_json::from_str("4.5").unwrap();
        assert!(matches!(
            integral_rating(&fractional),
            Err(ValidationError::Malformed { field: "rating", .. })
        ));
        let whole: serde_json::Number = serde_json::from_str("9").unwrap();
        assert_eq!(integral_rating(&whole).unwrap(), 9);
    }

    #[test]
    fn test_picture_requires_url() {
        assert!(check_picture("http://example.com/prof.jpg").is_ok());
        assert!(check_picture("https://example.com/a b.jpg").is_err());
        assert!(check_picture("ftp://example.com/prof.jpg").is_err());
        assert!(check_picture("").is_err());
    }

    #[test]
    fn test_username_charset() {
        assert_eq!(check_username(" alice_1 ").unwrap(), "alice_1");
        assert!(check_username("al").is_err());
        assert!(check_username("has space").is_err());
    }

    #[test]
    fn test_professor_fields() {
        assert_eq!(check_professor_name(" Patrick Hill ").unwrap(), "Patrick Hill");
        assert!(check_department("").is_err());
        assert!(check_introduction(&"x".repeat(MAX_INTRODUCTION_LENGTH + 1)).is_err());
    }
}
