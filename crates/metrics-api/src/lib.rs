pub mod client;
pub mod endpoint;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub use client::{ApiTokenVerifier, HttpApiConfig, HttpMetricsApi};
pub use endpoint::{api_url, ApiMethod};
pub use types::{Container, Site};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid api url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(String),
}

#[async_trait]
pub trait MetricsApi: Send + Sync {
    async fn verify_token(&self, base_url: &str, token: &str) -> Result<(), ApiError>;
    async fn sites(&self, base_url: &str, token: &str) -> Result<Vec<Site>, ApiError>;
    async fn containers(
        &self,
        base_url: &str,
        token: &str,
        site_id: &str,
    ) -> Result<Vec<Container>, ApiError>;
}

pub async fn sites_or_empty(api: &dyn MetricsApi, base_url: &str, token: &str) -> Vec<Site> {
    if base_url.is_empty() || token.is_empty() {
        return Vec::new();
    }
    match api.sites(base_url, token).await {
        Ok(sites) => sites,
        Err(err) => {
            warn!(error = %err, "sites api error");
            Vec::new()
        }
    }
}

pub async fn containers_or_empty(
    api: &dyn MetricsApi,
    base_url: &str,
    token: &str,
    site_id: &str,
) -> Vec<Container> {
    if base_url.is_empty() || token.is_empty() || site_id.is_empty() {
        return Vec::new();
    }
    match api.containers(base_url, token, site_id).await {
        Ok(containers) => containers,
        Err(err) => {
            warn!(site_id = %site_id, error = %err, "containers api error");
            Vec::new()
        }
    }
}
