//! Blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::profiles::ProfileName;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub featured_image_url: Option<String>,
    pub published: bool,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// `blog_posts.select("*, author:profiles(first_name, last_name)")`
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BlogPostWithAuthor {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub post: BlogPost,
    #[schema(value_type = Option<ProfileName>)]
    pub author: Option<Json<ProfileName>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBlogPostDto {
    pub title: Option<String>,
    pub content: Option<String>,
    pub featured_image_url: Option<String>,
    pub published: Option<bool>,
}
