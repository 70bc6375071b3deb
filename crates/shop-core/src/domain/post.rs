use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Version tag written into every persisted posts document.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Post entity - one product recommendation shown on the public feed.
///
/// Field names on the wire match the persisted document (`yt_url`,
/// `product_url`, `createdAt`), so existing `posts.json` files and backups load
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yt_url: Option<String>,
    pub product_url: String,
    pub active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub order: i64,
}

impl Post {
    /// Create a new, active post at the given position.
    pub fn new(data: NewPost, order: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            image: data.image,
            yt_url: non_blank(data.yt_url),
            product_url: data.product_url,
            active: true,
            created_at: Utc::now(),
            order,
        }
    }

    /// Merge a partial update onto this post. `id` and `created_at` never change.
    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(yt_url) = update.yt_url {
            self.yt_url = non_blank(Some(yt_url));
        }
        if let Some(product_url) = update.product_url {
            self.product_url = product_url;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(order) = update.order {
            self.order = order;
        }
    }
}

/// The persisted document: the whole collection is the unit of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostsData {
    pub posts: Vec<Post>,
    pub version: String,
}

impl PostsData {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            version: DOCUMENT_VERSION.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub image: String,
    pub yt_url: Option<String>,
    pub product_url: String,
}

impl NewPost {
    /// Check the required fields: title, image and product URL.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.image.trim().is_empty() {
            missing.push("image");
        }
        if self.product_url.trim().is_empty() {
            missing.push("product_url");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Partial update of a post. Absent fields are left untouched; an empty
/// `yt_url` clears the video link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub yt_url: Option<String>,
    pub product_url: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i64>,
}

impl PostUpdate {
    /// Fields that are present must not be blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());

        if blank(&self.title) {
            return Err(DomainError::Validation("title must not be empty".into()));
        }
        if blank(&self.product_url) {
            return Err(DomainError::Validation(
                "product_url must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
