use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pii::Masked;

/// A customer contact submission from the public site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn new(name: String, email: String, phone: Option<String>, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email: Masked(email),
            phone: phone.map(Masked),
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_fields_masked_in_debug() {
        let submission = ContactSubmission::new(
            "Dana".to_string(),
            "dana@example.com".to_string(),
            Some("555-0100".to_string()),
            "Looking to stage a 3BR listing".to_string(),
        );

        let debug = format!("{:?}", submission);
        assert!(!debug.contains("dana@example.com"));
        assert!(!debug.contains("555-0100"));
        assert!(debug.contains("Dana"));
    }

    #[test]
    fn test_contact_serializes_real_values() {
        let submission = ContactSubmission::new(
            "Dana".to_string(),
            "dana@example.com".to_string(),
            None,
            "Hi".to_string(),
        );

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["email"], "dana@example.com");
        assert!(json["phone"].is_null());
    }
}
