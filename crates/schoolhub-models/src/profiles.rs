//! Profile rows and the name projections embedded in joined reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::roles::UserRole;

/// Base identity record. `id` equals the owning auth user's id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// May be absent on legacy rows; callers fall back to sign-up metadata.
    pub role: Option<UserRole>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `profiles(first_name, last_name)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileName {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// `profiles(first_name, last_name, email)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

impl From<&Profile> for ProfileName {
    fn from(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
        }
    }
}

impl From<&Profile> for ProfileContact {
    fn from(profile: &Profile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// `students(profiles(first_name, last_name))` / `teachers(profiles(...))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonRef {
    pub profiles: Option<ProfileName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(first: Option<&str>, last: Option<&str>) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "p@example.com".to_string(),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            role: Some(UserRole::Teacher),
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(profile(Some("Ada"), Some("Obi")).full_name(), "Ada Obi");
        assert_eq!(profile(Some("Ada"), None).full_name(), "Ada");
        assert_eq!(profile(None, None).full_name(), "");
    }

    #[test]
    fn test_contact_projection() {
        let p = profile(Some("Ada"), Some("Obi"));
        let contact = ProfileContact::from(&p);
        assert_eq!(contact.email, "p@example.com");
        assert_eq!(contact.first_name.as_deref(), Some("Ada"));
    }
}
