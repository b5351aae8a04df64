use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::blog::{BlogPost, BlogPostWithAuthor, CreateBlogPostDto};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateBlog, ReadBlog};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List published posts with their author, newest first. Public.
#[utoipa::path(
    get,
    path = "/api/blog",
    responses(
        (status = 200, description = "Published posts", body = Vec<BlogPostWithAuthor>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Blog"
)]
#[instrument]
pub async fn get_posts(
    State(state): State<AppState>,
    _access: ReadBlog,
) -> Result<Json<Vec<BlogPostWithAuthor>>, AppError> {
    let posts = state.store.list_published_posts().await?;
    Ok(Json(posts))
}

/// Create a post. The author is always the caller.
#[utoipa::path(
    post,
    path = "/api/blog",
    request_body = CreateBlogPostDto,
    responses(
        (status = 201, description = "Created row", body = Vec<BlogPost>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Blog"
)]
#[instrument]
pub async fn create_post(
    State(state): State<AppState>,
    access: CreateBlog,
    JsonBody(dto): JsonBody<CreateBlogPostDto>,
) -> Result<(StatusCode, Json<Vec<BlogPost>>), AppError> {
    let author = access.into_session()?;
    let created = state.store.create_post(dto, author.user_id).await?;
    track_record_created("blog");
    Ok((StatusCode::CREATED, Json(created)))
}
