//! Daily attendance marks.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::classes::ClassName;
use crate::profiles::PersonRef;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Attendance {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `attendance.select("*, students(profiles(first_name, last_name)), classes(name)")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceWithRelations {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub attendance: Attendance,
    #[schema(value_type = Option<PersonRef>)]
    pub students: Option<Json<PersonRef>>,
    #[schema(value_type = Option<ClassName>)]
    pub classes: Option<Json<ClassName>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateAttendanceDto {
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_str::<CreateAttendanceDto>(r#"{"status":"sick"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_parses() {
        let dto: CreateAttendanceDto =
            serde_json::from_str(r#"{"status":"excused","date":"2024-03-01"}"#).unwrap();
        assert_eq!(dto.status, Some(AttendanceStatus::Excused));
        assert_eq!(dto.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }
}
