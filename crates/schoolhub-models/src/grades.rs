//! Grades and the letter scale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::classes::Subject;
use crate::profiles::PersonRef;

/// Lower bound of each letter band, highest first.
pub const GRADE_SCALE: [(f64, &str); 5] = [(90.0, "A"), (80.0, "B"), (70.0, "C"), (60.0, "D"), (50.0, "E")];

/// Maps a score out of 100 to its letter. Anything below 50 is an F.
pub fn letter_for_score(score: f64) -> &'static str {
    GRADE_SCALE
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Grade {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub term: Option<String>,
    pub score: Option<f64>,
    pub grade: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `grades.select("*, students(profiles(first_name, last_name)), subjects(*), teachers(profiles(first_name, last_name))")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GradeWithRelations {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub grade: Grade,
    #[schema(value_type = Option<PersonRef>)]
    pub students: Option<Json<PersonRef>>,
    #[schema(value_type = Option<Subject>)]
    pub subjects: Option<Json<Subject>>,
    #[schema(value_type = Option<PersonRef>)]
    pub teachers: Option<Json<PersonRef>>,
}

/// `grades.select("*, subjects(*)")`, used by the student dashboard.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct GradeWithSubject {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub grade: Grade,
    #[schema(value_type = Option<Subject>)]
    pub subjects: Option<Json<Subject>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateGradeDto {
    pub student_id: Option<Uuid>,
    pub subject_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub term: Option<String>,
    pub score: Option<f64>,
    pub grade: Option<String>,
}

impl CreateGradeDto {
    /// Fills in `grade` from `score` when the caller sent only a score.
    pub fn with_derived_letter(mut self) -> Self {
        if self.grade.is_none() {
            self.grade = self.score.map(|score| letter_for_score(score).to_string());
        }
        self
    }
}
