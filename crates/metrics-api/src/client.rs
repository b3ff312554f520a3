use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use settings::{TokenVerifier, VerificationError};
use tracing::debug;

use crate::endpoint::{api_url, ApiMethod};
use crate::{ApiError, Container, MetricsApi, Site};

#[derive(Clone, Debug)]
pub struct HttpApiConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: "ghost-metrics-wp".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpMetricsApi {
    client: reqwest::Client,
    config: HttpApiConfig,
}

impl HttpMetricsApi {
    pub fn new(config: HttpApiConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms.max(1));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    async fn call(
        &self,
        base_url: &str,
        method: &ApiMethod,
        token: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let url = api_url(base_url, method, token)?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(&self.config.user_agent) {
            headers.insert(USER_AGENT, value);
        }

        let response = self
            .client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        debug!(method = method.name(), status, "ghost metrics api response");
        if status != 200 {
            return Err(ApiError::Status(status));
        }
        let body = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        base_url: &str,
        method: &ApiMethod,
        token: &str,
    ) -> Result<T, ApiError> {
        let body = self.call(base_url, method, token).await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl MetricsApi for HttpMetricsApi {
    async fn verify_token(&self, base_url: &str, token: &str) -> Result<(), ApiError> {
        self.call(base_url, &ApiMethod::SitesWithAdminAccess, token)
            .await
            .map(|_| ())
    }

    async fn sites(&self, base_url: &str, token: &str) -> Result<Vec<Site>, ApiError> {
        self.call_json(base_url, &ApiMethod::SitesWithAdminAccess, token)
            .await
    }

    async fn containers(
        &self,
        base_url: &str,
        token: &str,
        site_id: &str,
    ) -> Result<Vec<Container>, ApiError> {
        let method = ApiMethod::Containers {
            site_id: site_id.to_string(),
        };
        self.call_json(base_url, &method, token).await
    }
}

#[derive(Clone)]
pub struct ApiTokenVerifier {
    api: Arc<dyn MetricsApi>,
}

impl ApiTokenVerifier {
    pub fn new(api: Arc<dyn MetricsApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TokenVerifier for ApiTokenVerifier {
    async fn verify_token(&self, base_url: &str, token: &str) -> Result<(), VerificationError> {
        self.api
            .verify_token(base_url, token)
            .await
            .map_err(|err| VerificationError(err.to_string()))
    }
}
