//! Client for a Dubai brokerage's property backend.
//!
//! Listing searches go to the authenticated API and fall back to filtering
//! the cached public snapshot when access is refused.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod query;

pub use api::ApiClient;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use models::{Property, PropertyType, PublicData};
pub use query::{PropertyFilters, SortOrder};
