//! Remote bookmark store client for droplet.
//!
//! This crate provides the HTTP client for the remote bookmark API, the
//! paginated aggregation loop, stored-token handling, and the cache-backed
//! mirror consumed by the CLI.

pub mod api;
pub mod error;
pub mod mirror;
pub mod pages;
pub mod token;

pub use api::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use mirror::Mirror;
pub use pages::{Aggregation, PageSource, fetch_all};
pub use token::StoredToken;
