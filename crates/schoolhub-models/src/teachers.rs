//! Teacher records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profiles::{Profile, ProfileContact};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "teacher_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
    OnLeave,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub employee_id: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub status: TeacherStatus,
    pub created_at: DateTime<Utc>,
}

/// `teachers.select("*, profiles(first_name, last_name, email)")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TeacherWithContact {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub teacher: Teacher,
    #[schema(value_type = Option<ProfileContact>)]
    pub profiles: Option<Json<ProfileContact>>,
}

/// `teachers.select("*, profiles(*)")`, used by the admin dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TeacherWithProfile {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub teacher: Teacher,
    #[schema(value_type = Option<Profile>)]
    pub profiles: Option<Json<Profile>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTeacherDto {
    pub user_id: Option<Uuid>,
    pub employee_id: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_status_on_leave_wire_name() {
        assert_eq!(
            serde_json::to_string(&TeacherStatus::OnLeave).unwrap(),
            r#""on_leave""#
        );
    }
}
