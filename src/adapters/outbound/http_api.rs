use crate::common::{FetchError, FetchResult};
use crate::domains::tracking::DashboardApi;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// `reqwest`-backed client for the simulation backend.
pub struct HttpDashboardApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vanet-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    async fn read_json(endpoint: &str, resp: reqwest::Response) -> FetchResult<Value> {
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        resp.json::<Value>().await.map_err(|e| FetchError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    fn network(endpoint: &str, e: reqwest::Error) -> FetchError {
        FetchError::Network {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn get_json(&self, endpoint: &str) -> FetchResult<Value> {
        let resp = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(|e| Self::network(endpoint, e))?;
        Self::read_json(endpoint, resp).await
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> FetchResult<Value> {
        let resp = self
            .client
            .post(self.url(endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::network(endpoint, e))?;
        Self::read_json(endpoint, resp).await
    }
}
