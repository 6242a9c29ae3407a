use crate::api::session::FileSessionStore;
use crate::api::traits::{SessionStore, Transport};
use crate::api::transport::ReqwestTransport;
use crate::api::types::{ApiRequest, ApiResponse, Envelope, InvestmentRequest};
use crate::cache::PublicDataCache;
use crate::config::{self, ApiConfig};
use crate::error::{ApiError, Result};
use crate::models::{AreaDetail, Developer, Facility, Place, Property, PublicData};
use crate::query::{self, PropertyFilters};
use chrono::Duration;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Static credentials sent with every request
#[derive(Clone, Default)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &config::redacted(&self.api_secret))
            .finish()
    }
}

/// Client for the property backend.
///
/// Searches go to the authenticated endpoint first. When that endpoint
/// rejects the caller (401/403) the same search runs over the cached public
/// snapshot instead.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    credentials: Credentials,
    cache: PublicDataCache,
}

impl ApiClient {
    /// Client over HTTP with the token file from `config`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        for name in config.missing_credentials() {
            error!("{} is not set; the backend will reject every request", name);
        }

        let transport = ReqwestTransport::new(
            config.base_url.clone(),
            std::time::Duration::from_secs(config.timeout_secs),
        )?;
        let session = FileSessionStore::new(config.session_file.clone());
        let credentials = Credentials {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        };

        Ok(Self::with_parts(Arc::new(transport), Arc::new(session), credentials)
            .with_cache_ttl(Duration::seconds(config.cache_ttl_secs)))
    }

    pub fn with_parts(
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionStore>,
        credentials: Credentials,
    ) -> Self {
        Self {
            transport,
            session,
            credentials,
            cache: PublicDataCache::new(),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = PublicDataCache::with_ttl(ttl);
        self
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Search listings.
    ///
    /// Results are always re-sorted here, whichever tier served them.
    /// Price bounds are USD on the authenticated endpoint and AED on the
    /// public fallback.
    pub async fn get_properties(&self, filters: &PropertyFilters) -> Result<Vec<Property>> {
        let request = ApiRequest::get("/properties").with_query(filters.to_query());

        match self.send(request).await {
            Ok(response) => {
                let mut properties = response.json::<Envelope<Vec<Property>>>()?.into_inner();
                query::sort_properties(&mut properties, filters.sort_key(), filters.sort_order());
                debug!(count = properties.len(), "properties served by authenticated endpoint");
                Ok(properties)
            }
            Err(ApiError::Unauthorized { status }) => {
                info!(status, "property search rejected, searching public data instead");
                let data = self.get_public_data(false).await?;
                let properties = query::search(&data.properties, filters);
                debug!(
                    count = properties.len(),
                    total = data.properties.len(),
                    "properties served from public data"
                );
                Ok(properties)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one listing by id
    pub async fn get_property(&self, id: &str) -> Result<Property> {
        let request = ApiRequest::get(format!("/properties/{id}"));

        match self.send(request).await {
            Ok(response) => Ok(response.json::<Envelope<Property>>()?.into_inner()),
            Err(ApiError::Unauthorized { status }) => {
                info!(status, id, "property lookup rejected, scanning public data");
                let data = self.get_public_data(false).await?;
                data.find_property(id).cloned().ok_or_else(|| {
                    ApiError::NotFound(format!("property {id} not found in public data"))
                })
            }
            Err(ApiError::Status { status: 404, .. }) => {
                Err(ApiError::NotFound(format!("property {id} not found")))
            }
            Err(e) => Err(e),
        }
    }

    /// Public snapshot, cached for the configured TTL
    pub async fn get_public_data(&self, force_refresh: bool) -> Result<Arc<PublicData>> {
        self.cache
            .get(force_refresh, || self.fetch_public_data())
            .await
    }

    /// Drop the cached snapshot so the next read refetches
    pub async fn invalidate_public_data(&self) {
        self.cache.invalidate().await;
    }

    async fn fetch_public_data(&self) -> Result<PublicData> {
        let response = self.send(ApiRequest::get("/public/data")).await?;
        let data = response.json::<Envelope<PublicData>>()?.into_inner();
        info!(
            properties = data.properties.len(),
            areas = data.areas.len(),
            developers = data.developers.len(),
            "public data fetched"
        );
        Ok(data)
    }

    pub async fn developers(&self) -> Result<Vec<Developer>> {
        Ok(self.get_public_data(false).await?.developers.clone())
    }

    pub async fn areas(&self) -> Result<Vec<AreaDetail>> {
        Ok(self.get_public_data(false).await?.areas.clone())
    }

    pub async fn cities(&self) -> Result<Vec<Place>> {
        Ok(self.get_public_data(false).await?.cities.clone())
    }

    pub async fn countries(&self) -> Result<Vec<Place>> {
        Ok(self.get_public_data(false).await?.countries.clone())
    }

    pub async fn facilities(&self) -> Result<Vec<Facility>> {
        Ok(self.get_public_data(false).await?.facilities.clone())
    }

    /// Submit an investment enquiry. Signed-in users go through
    /// `/investments`, everyone else through `/investments/public`.
    pub async fn submit_investment(
        &self,
        investment: &InvestmentRequest,
    ) -> Result<serde_json::Value> {
        let path = if self.current_token().await.is_some() {
            "/investments"
        } else {
            "/investments/public"
        };
        let body = serde_json::to_value(investment)?;
        let response = self.send(ApiRequest::post(path, body)).await?;

        if response.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        response.json()
    }

    async fn current_token(&self) -> Option<String> {
        match self.session.token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("could not read session token, continuing signed out: {}", e);
                None
            }
        }
    }

    /// Attach credentials, send, and map the status. A 401 also ends the
    /// stored session.
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        request.headers.extend([
            ("x-api-key".to_string(), self.credentials.api_key.clone()),
            ("x-api-secret".to_string(), self.credentials.api_secret.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]);
        if let Some(token) = self.current_token().await {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let path = request.path.clone();
        let response = self.transport.execute(request).await?;

        if response.is_success() {
            return Ok(response);
        }
        match response.status {
            401 => {
                warn!(%path, "backend returned 401, clearing session token");
                if let Err(e) = self.session.clear().await {
                    warn!("failed to clear session token: {}", e);
                }
                Err(ApiError::Unauthorized { status: 401 })
            }
            403 => Err(ApiError::Unauthorized { status: 403 }),
            status => {
                warn!(%path, status, "backend request failed");
                Err(ApiError::Status {
                    status,
                    body: response.body,
                })
            }
        }
    }
}
