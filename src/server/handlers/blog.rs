use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::models::{BlogCategory, BlogPostDetail, BlogPostListItem};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::catalog_service::BlogQuery;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Json<Vec<BlogPostListItem>> {
    Json(
        state
            .blog
            .search(&query)
            .into_iter()
            .map(BlogPostListItem::from)
            .collect(),
    )
}

pub async fn featured_post(
    State(state): State<AppState>,
) -> Result<Json<BlogPostListItem>, ApiError> {
    state
        .blog
        .featured()
        .map(|post| Json(BlogPostListItem::from(post)))
        .ok_or_else(|| ApiError::NotFound("No blog posts yet".to_string()))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<BlogCategory>> {
    Json(state.blog.categories())
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostDetail>, ApiError> {
    state
        .blog
        .detail(&slug)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Post \"{}\" not found", slug)))
}
