//! # Shop Core
//!
//! The domain layer of the shop dashboard.
//! This crate contains the post model, the pure collection operations over it
//! and the ports that storage adapters implement. It performs no I/O.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, StoreError};
