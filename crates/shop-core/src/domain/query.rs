use serde::{Deserialize, Serialize};

use super::Post;

/// Sort order for the admin listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Manual display order, ascending.
    #[default]
    Order,
    /// Creation time, newest first.
    Date,
    /// Title, lexicographic ascending.
    Title,
}

/// Status filter for the admin listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, post: &Post) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => post.active,
            StatusFilter::Inactive => !post.active,
        }
    }
}

/// Admin listing parameters. Pagination applies only when both `page` and
/// `limit` are present.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub sort_by: SortBy,
    pub status: StatusFilter,
    pub search: Option<String>,
}

/// One page of the filtered, sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    /// Size of the filtered set, not of the whole collection.
    pub total: usize,
    pub pages: usize,
}

/// Active/inactive counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}
