//! # Shop Shared
//!
//! Request and response bodies exchanged with the dashboard and the public feed.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, SuccessResponse};
