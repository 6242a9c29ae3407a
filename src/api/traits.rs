use crate::api::types::{ApiRequest, ApiResponse};
use crate::error::Result;
use async_trait::async_trait;

/// Carries one request to the backend and returns whatever came back.
/// Non-success statuses are returned as responses, not errors; only
/// transport failures are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// Persisted bearer token of the signed-in user
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn token(&self) -> Result<Option<String>>;

    async fn store(&self, token: &str) -> Result<()>;

    /// Forget the token (forced logout)
    async fn clear(&self) -> Result<()>;
}
