//! Fee payments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profiles::PersonRef;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub student_id: Option<Uuid>,
    pub amount: f64,
    pub description: Option<String>,
    pub reference_number: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// `payments.select("*, students(profiles(first_name, last_name))")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PaymentWithStudent {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub payment: Payment,
    #[schema(value_type = Option<PersonRef>)]
    pub students: Option<Json<PersonRef>>,
}

/// Payment submission. There is no `status` field: new payments are always pending.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePaymentDto {
    pub student_id: Option<Uuid>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub reference_number: Option<String>,
}
