use crate::common::FetchResult;
use async_trait::async_trait;
use serde_json::Value;

/// Port to the simulation backend's JSON API. Endpoints are paths such as
/// `/api/simulation_data`; the adapter owns the base URL.
///
/// A call succeeds only with a 2xx status and a body that parses as JSON.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn get_json(&self, endpoint: &str) -> FetchResult<Value>;

    async fn post_json(&self, endpoint: &str, body: Value) -> FetchResult<Value>;
}
