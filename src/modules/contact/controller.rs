use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::contact::{ContactMessageDto, ContactResponse};

use crate::middleware::policy::SubmitContact;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::validator::JsonBody;

use super::service::ContactService;

/// Submit the public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactMessageDto,
    responses(
        (status = 201, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[instrument]
pub async fn submit_contact(
    State(state): State<AppState>,
    _access: SubmitContact,
    JsonBody(dto): JsonBody<ContactMessageDto>,
) -> Result<(StatusCode, Json<ContactResponse>), AppError> {
    let email = EmailService::new(state.email_config.clone());
    let data = ContactService::submit(state.store.as_ref(), &email, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully".to_string(),
            data,
        }),
    ))
}
