//! Student records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::classes::{Class, ClassName};
use crate::profiles::{Profile, ProfileContact};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "student_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub admission_number: Option<String>,
    pub class_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: StudentStatus,
    pub created_at: DateTime<Utc>,
}

/// `students.select("*, profiles(first_name, last_name, email), classes(name)")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentWithRelations {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub student: Student,
    #[schema(value_type = Option<ProfileContact>)]
    pub profiles: Option<Json<ProfileContact>>,
    #[schema(value_type = Option<ClassName>)]
    pub classes: Option<Json<ClassName>>,
}

/// `students.select("*, profiles(*)")`, used by the admin dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentWithProfile {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub student: Student,
    #[schema(value_type = Option<Profile>)]
    pub profiles: Option<Json<Profile>>,
}

/// `students.select("*, classes(*)")`, used by the student dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentWithClass {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub student: Student,
    #[schema(value_type = Option<Class>)]
    pub classes: Option<Json<Class>>,
}

/// Fields accepted by `POST /api/students`. Forwarded without value checks.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateStudentDto {
    pub user_id: Option<Uuid>,
    pub admission_number: Option<String>,
    pub class_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub date_of_birth: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_accepts_partial_body() {
        let dto: CreateStudentDto =
            serde_json::from_str(r#"{"admission_number":"ADM-001"}"#).unwrap();
        assert_eq!(dto.admission_number.as_deref(), Some("ADM-001"));
        assert!(dto.user_id.is_none());
    }

    #[test]
    fn test_create_student_dto_rejects_bad_uuid() {
        let result = serde_json::from_str::<CreateStudentDto>(r#"{"class_id":"not-a-uuid"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_relations_flatten_into_row() {
        let row = StudentWithRelations {
            student: Student {
                id: Uuid::nil(),
                user_id: None,
                admission_number: Some("ADM-9".to_string()),
                class_id: None,
                parent_id: None,
                date_of_birth: None,
                status: StudentStatus::Active,
                created_at: Utc::now(),
            },
            profiles: Some(Json(ProfileContact {
                first_name: Some("Ada".to_string()),
                last_name: Some("Obi".to_string()),
                email: "ada@example.com".to_string(),
            })),
            classes: None,
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["admission_number"], "ADM-9");
        assert_eq!(value["status"], "active");
        assert_eq!(value["profiles"]["email"], "ada@example.com");
        assert!(value["classes"].is_null());
    }
}
