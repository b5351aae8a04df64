//! School calendar events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profiles::ProfileName;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// `events.select("*, creator:profiles(first_name, last_name)")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EventWithCreator {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub event: Event,
    #[schema(value_type = Option<ProfileName>)]
    pub creator: Option<Json<ProfileName>>,
}

/// `created_by` is taken from the session, never from the body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateEventDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}
