//! Classes, subjects and the class/subject/teacher assignment table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profiles::PersonRef;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    pub level: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub academic_year: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `classes(name)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassName {
    pub name: String,
}

/// `classes.select("*, teachers(profiles(first_name, last_name))")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassWithTeacher {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub class: Class,
    #[schema(value_type = Option<PersonRef>)]
    pub teachers: Option<Json<PersonRef>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateClassDto {
    pub name: Option<String>,
    pub level: Option<String>,
    pub class_teacher_id: Option<Uuid>,
    pub capacity: Option<i32>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `class_subjects.select("classes(*), subjects(*)")`, used by the teacher dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassSubjectWithRelations {
    #[schema(value_type = Option<Class>)]
    pub classes: Option<Json<Class>>,
    #[schema(value_type = Option<Subject>)]
    pub subjects: Option<Json<Subject>>,
}
