#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vanet_dashboard::adapters::outbound::{InMemoryCharts, InMemoryMap};
use vanet_dashboard::application::{DashboardContext, DashboardController};
use vanet_dashboard::common::{FetchError, FetchResult};
use vanet_dashboard::domains::logger::{DashboardLogger, DynLogger};
use vanet_dashboard::domains::tracking::{DashboardApi, FeedProfile};

struct Scripted {
    delay: Duration,
    result: FetchResult<Value>,
}

/// Backend double. Each endpoint replays its queued responses in order and
/// keeps repeating the last one.
#[derive(Default)]
pub struct FakeApi {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    gets: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, Value)>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, endpoint: &str, delay: Duration, result: FetchResult<Value>) {
        self.routes
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(Scripted { delay, result });
    }

    pub fn respond(&self, endpoint: &str, body: Value) {
        self.push(endpoint, Duration::ZERO, Ok(body));
    }

    pub fn respond_after(&self, endpoint: &str, delay: Duration, body: Value) {
        self.push(endpoint, delay, Ok(body));
    }

    pub fn fail(&self, endpoint: &str, status: u16) {
        self.fail_after(endpoint, Duration::ZERO, status);
    }

    pub fn fail_after(&self, endpoint: &str, delay: Duration, status: u16) {
        self.push(
            endpoint,
            delay,
            Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status,
            }),
        );
    }

    pub fn get_count(&self, endpoint: &str) -> usize {
        self.gets.lock().unwrap().iter().filter(|e| *e == endpoint).count()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    async fn next(&self, endpoint: &str) -> FetchResult<Value> {
        let (delay, result) = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(endpoint) {
                Some(queue) if queue.len() > 1 => {
                    let s = queue.pop_front().unwrap();
                    (s.delay, s.result)
                }
                Some(queue) if !queue.is_empty() => (queue[0].delay, queue[0].result.clone()),
                _ => (
                    Duration::ZERO,
                    Err(FetchError::Status {
                        endpoint: endpoint.to_string(),
                        status: 404,
                    }),
                ),
            }
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn get_json(&self, endpoint: &str) -> FetchResult<Value> {
        self.gets.lock().unwrap().push(endpoint.to_string());
        self.next(endpoint).await
    }

    async fn post_json(&self, endpoint: &str, body: Value) -> FetchResult<Value> {
        self.posts.lock().unwrap().push((endpoint.to_string(), body));
        self.next(endpoint).await
    }
}

#[derive(Default)]
pub struct CaptureLogger {
    pub messages: Mutex<Vec<String>>,
}

impl CaptureLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.lock().unwrap().iter().any(|m| m.contains(needle))
    }
}

impl DashboardLogger for CaptureLogger {
    fn info(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("INFO:{}", msg));
    }
    fn warn(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("WARN:{}", msg));
    }
    fn error(&self, msg: &str) {
        self.messages.lock().unwrap().push(format!("ERR:{}", msg));
    }
}

pub type TestController = DashboardController<InMemoryMap, InMemoryCharts>;

pub fn controller(api: Arc<FakeApi>, profile: FeedProfile, logger: Arc<CaptureLogger>) -> TestController {
    let logger: DynLogger = logger;
    DashboardController::new(
        api,
        profile,
        DashboardContext::new(InMemoryMap::new(), InMemoryCharts::new()),
        logger,
    )
}

/// A `simulation_data` payload: combined entity list, seconds, `radius_m`.
pub fn combined_payload(vehicle_lat: f64, zone_ids: &[&str]) -> Value {
    json!({
        "entities": [
            {"id": "V1", "type": "vehicle", "latitude": vehicle_lat, "longitude": 79.59,
             "speed_kmh": 42.0, "heading_deg": 90.0},
            {"id": "V2", "type": "vehicle", "latitude": 17.98, "longitude": 79.60,
             "speed_kmh": 0.0, "heading_deg": 0.0},
            {"id": "S1", "type": "vessel", "latitude": 17.90, "longitude": 79.50,
             "speed_kmh": 12.5, "heading_deg": 270.0}
        ],
        "events": [
            {"id": "E1", "type": "ACCIDENT_RISK", "description": "Sharp brake",
             "latitude": 17.97, "longitude": 79.59, "timestamp": 1714564800},
            {"id": "E2", "type": "CONGESTION", "description": "Queue forming",
             "timestamp": 1714564860}
        ],
        "hazard_zones": zone_ids.iter().map(|id| json!({
            "id": id, "name": format!("Zone {}", id), "latitude": 17.95,
            "longitude": 79.58, "radius_m": 250.0
        })).collect::<Vec<_>>()
    })
}

/// The same content as [`combined_payload`] in the `update_simulation` shape.
pub fn split_payload(vehicle_lat: f64, zone_ids: &[&str]) -> Value {
    json!({
        "vehicles": [
            {"id": "V1", "latitude": vehicle_lat, "longitude": 79.59, "speed": 42.0, "heading": 90.0},
            {"id": "V2", "latitude": 17.98, "longitude": 79.60, "speed": 0.0, "heading": 0.0}
        ],
        "vessels": [
            {"id": "S1", "latitude": 17.90, "longitude": 79.50, "speed": 12.5, "heading": 270.0}
        ],
        "events": [
            {"id": "E1", "type": "ACCIDENT_RISK", "description": "Sharp brake",
             "latitude": 17.97, "longitude": 79.59, "timestamp": 1714564800000i64},
            {"id": "E2", "type": "CONGESTION", "description": "Queue forming",
             "timestamp": 1714564860000i64}
        ],
        "hazard_zones": zone_ids.iter().map(|id| json!({
            "id": id, "name": format!("Zone {}", id), "latitude": 17.95,
            "longitude": 79.58, "radius": 250.0
        })).collect::<Vec<_>>()
    })
}
