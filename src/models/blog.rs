use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Minutes.
    pub read_time: u32,
    #[serde(default)]
    pub featured_image: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostListItem {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub read_time: u32,
    pub featured_image: String,
    pub slug: String,
}

impl From<&BlogPost> for BlogPostListItem {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            published_at: post.published_at,
            category: post.category.clone(),
            tags: post.tags.clone(),
            read_time: post.read_time,
            featured_image: post.featured_image.clone(),
            slug: post.slug.clone(),
        }
    }
}

/// A full post with its markdown body rendered for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub value: String,
    pub label: String,
}
