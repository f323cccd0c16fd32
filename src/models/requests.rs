//! Request DTOs for the title cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for the INSERT operation (PUT /titles)
///
/// # Fields
/// - `title`: Full numbered title, e.g. `"1. Two Sum: Easy"`
#[derive(Debug, Clone, Deserialize)]
pub struct InsertRequest {
    /// The question title to cache
    pub title: String,
}

impl InsertRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Grammar checks are left to the cache itself.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_request_deserialize() {
        let json = r#"{"title": "1. Two Sum: Easy"}"#;
        let req: InsertRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "1. Two Sum: Easy");
    }

    #[test]
    fn test_insert_request_missing_title() {
        let json = r#"{"name": "Two Sum"}"#;
        assert!(serde_json::from_str::<InsertRequest>(json).is_err());
    }

    #[test]
    fn test_validate_empty_title() {
        let req = InsertRequest {
            title: "   ".to_string(),
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_validate_valid_request() {
        let req = InsertRequest {
            title: "1. Two Sum: Easy".to_string(),
        };
        assert!(req.validate().is_none());
    }
}
