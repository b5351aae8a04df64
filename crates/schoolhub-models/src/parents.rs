//! Parent records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Parent {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
}
