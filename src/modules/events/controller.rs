use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::events::{CreateEventDto, Event, EventWithCreator};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateEvents, ReadEvents};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List events with their creator, soonest first. Public.
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Events", body = Vec<EventWithCreator>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Events"
)]
#[instrument]
pub async fn get_events(
    State(state): State<AppState>,
    _access: ReadEvents,
) -> Result<Json<Vec<EventWithCreator>>, AppError> {
    let events = state.store.list_events().await?;
    Ok(Json(events))
}

/// Create an event owned by the calling admin
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Event>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Events"
)]
#[instrument]
pub async fn create_event(
    State(state): State<AppState>,
    access: CreateEvents,
    JsonBody(dto): JsonBody<CreateEventDto>,
) -> Result<(StatusCode, Json<Vec<Event>>), AppError> {
    let session = access.into_session()?;
    let created = state.store.create_event(dto, session.user_id).await?;
    track_record_created("events");
    Ok((StatusCode::CREATED, Json(created)))
}
