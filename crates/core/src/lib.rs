//! Core types and shared functionality for droplet.
//!
//! This crate provides:
//! - Typed bookmark, collection and tag records
//! - File-backed cache store with age-aware read policies
//! - Collection hierarchy resolution
//! - Bookmark filtering and ordering
//! - Refresh staleness and debounce decisions
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod refresh;
pub mod search;

pub use cache::{FileCache, ItemsEnvelope, ReadPolicy};
pub use config::AppConfig;
pub use error::Error;
pub use models::{Bookmark, Collection, ResourceKind, Tag};
