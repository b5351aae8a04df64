//! Assignments set by a teacher for a class and subject.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::classes::{Class, Subject};
use crate::profiles::PersonRef;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub subject_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `assignments.select("*, subjects(*), classes(*), teachers(profiles(first_name, last_name))")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssignmentWithRelations {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub assignment: Assignment,
    #[schema(value_type = Option<Subject>)]
    pub subjects: Option<Json<Subject>>,
    #[schema(value_type = Option<Class>)]
    pub classes: Option<Json<Class>>,
    #[schema(value_type = Option<PersonRef>)]
    pub teachers: Option<Json<PersonRef>>,
}

/// Dashboard projection: `assignments.select("*, subjects(*)")` for students
/// and `assignments.select("*, classes(*), subjects(*)")` for teachers.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AssignmentSummary {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub assignment: Assignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Class>)]
    pub classes: Option<Json<Class>>,
    #[schema(value_type = Option<Subject>)]
    pub subjects: Option<Json<Subject>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAssignmentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub file_url: Option<String>,
}
