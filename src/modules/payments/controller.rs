use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::payments::{CreatePaymentDto, Payment, PaymentWithStudent};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreatePayments, ReadPayments};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List payments with the paying student, newest first
#[utoipa::path(
    get,
    path = "/api/payments",
    responses(
        (status = 200, description = "Payments", body = Vec<PaymentWithStudent>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Payments"
)]
#[instrument]
pub async fn get_payments(
    State(state): State<AppState>,
    _access: ReadPayments,
) -> Result<Json<Vec<PaymentWithStudent>>, AppError> {
    let rows = state.store.list_payments().await?;
    Ok(Json(rows))
}

/// Create a payment. The status is always `pending`
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Payment>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Payments"
)]
#[instrument]
pub async fn create_payment(
    State(state): State<AppState>,
    _access: CreatePayments,
    JsonBody(dto): JsonBody<CreatePaymentDto>,
) -> Result<(StatusCode, Json<Vec<Payment>>), AppError> {
    let created = state.store.create_payment(dto).await?;
    track_record_created("payments");
    Ok((StatusCode::CREATED, Json(created)))
}
