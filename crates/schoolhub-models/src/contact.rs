//! Public contact form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactMessageDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A contact submission with every field present and non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessageDto {
    /// Returns `None` if any field is absent or empty.
    pub fn into_complete(self) -> Option<NewContactMessage> {
        fn filled(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Some(NewContactMessage {
            name: filled(self.name)?,
            email: filled(self.email)?,
            subject: filled(self.subject)?,
            message: filled(self.message)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub message: String,
    pub data: Vec<ContactMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ContactMessageDto {
        ContactMessageDto {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            subject: Some("Admissions".to_string()),
            message: Some("When does term start?".to_string()),
        }
    }

    #[test]
    fn test_complete_submission() {
        let msg = full().into_complete().unwrap();
        assert_eq!(msg.subject, "Admissions");
    }

    #[test]
    fn test_missing_or_empty_field() {
        let missing = ContactMessageDto {
            email: None,
            ..full()
        };
        assert!(missing.into_complete().is_none());

        let empty = ContactMessageDto {
            message: Some(String::new()),
            ..full()
        };
        assert!(empty.into_complete().is_none());
    }
}
