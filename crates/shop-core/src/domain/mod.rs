//! Domain entities - the core business objects.

mod backup;
mod post;
mod query;

pub use backup::{Backup, backup_timestamp, validate_backup_name};
pub use post::{DOCUMENT_VERSION, NewPost, Post, PostUpdate, PostsData};
pub use query::{PostPage, PostQuery, PostStats, SortBy, StatusFilter};
