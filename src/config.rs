use crate::application::PollerSettings;
use crate::common::{GeoPoint, MapView};
use crate::domains::tracking::{
    AlertTitleStyle, ChartFeed, EventMarkerPolicy, FeedProfile, FieldMapping, ProfileName,
    ZonePolicy,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub map: MapConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Map period for the `simulation_data` profile.
    pub simulation_update_interval_ms: u64,
    /// Map period for the `update_simulation` profile.
    pub update_interval_ms: u64,
    /// Overrides the profile's chart loop multiplier when set.
    pub chart_refresh_multiplier: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_latitude: f64,
    pub initial_longitude: f64,
    pub zoom: u8,
}

/// Preset plus optional overrides of individual profile settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub profile: ProfileName,
    pub zones: Option<ZonePolicy>,
    pub event_markers: Option<EventMarkerPolicy>,
    pub alert_titles: Option<AlertTitleStyle>,
    pub fields: Option<FieldMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `fast_log` file; console only when unset.
    pub file: Option<String>,
    pub level: String,
    pub buffer_capacity: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            simulation_update_interval_ms: 1_000,
            update_interval_ms: 1_000,
            chart_refresh_multiplier: None,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        let view = MapView::default();
        Self {
            initial_latitude: view.center.latitude,
            initial_longitude: view.center.longitude,
            zoom: view.zoom,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            profile: ProfileName::SimulationData,
            zones: None,
            event_markers: None,
            alert_titles: None,
            fields: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
            buffer_capacity: 1_024,
        }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the file at `path` if it exists, then `DASHBOARD__*`
    /// environment variables (e.g. `DASHBOARD__API__BASE_URL`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let config: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            anyhow::bail!("api.base_url must be an http(s) URL, got {:?}", self.api.base_url);
        }
        if self.polling.simulation_update_interval_ms == 0 || self.polling.update_interval_ms == 0 {
            anyhow::bail!("polling intervals must be greater than zero");
        }
        if !self.map_view().center.is_valid() {
            anyhow::bail!("map initial position is outside valid coordinates");
        }
        self.logging.level_filter()?;
        Ok(())
    }

    /// The configured preset with overrides applied.
    pub fn profile(&self) -> FeedProfile {
        let mut profile = FeedProfile::preset(self.feed.profile);
        if let Some(zones) = self.feed.zones {
            profile.zones = zones;
        }
        if let Some(event_markers) = self.feed.event_markers {
            profile.event_markers = event_markers;
        }
        if let Some(alert_titles) = self.feed.alert_titles {
            profile.alert_titles = alert_titles;
        }
        if let Some(fields) = &self.feed.fields {
            profile.fields = fields.clone();
        }
        if let (Some(multiplier), ChartFeed::Separate { refresh_multiplier, .. }) =
            (self.polling.chart_refresh_multiplier, &mut profile.charts)
        {
            *refresh_multiplier = multiplier;
        }
        profile
    }

    pub fn map_view(&self) -> MapView {
        MapView {
            center: GeoPoint::new(self.map.initial_latitude, self.map.initial_longitude),
            zoom: self.map.zoom,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    /// Map loop period for the selected profile.
    pub fn map_interval(&self) -> Duration {
        let ms = match self.feed.profile {
            ProfileName::SimulationData => self.polling.simulation_update_interval_ms,
            ProfileName::UpdateSimulation => self.polling.update_interval_ms,
        };
        Duration::from_millis(ms)
    }

    /// Chart loop period, `None` when charts ride along with the map cycle.
    pub fn chart_interval(&self) -> Option<Duration> {
        self.profile()
            .chart_refresh_multiplier()
            .map(|m| self.map_interval() * m)
    }

    pub fn poller_settings(&self) -> PollerSettings {
        PollerSettings {
            map_interval: self.map_interval(),
            chart_interval: self.chart_interval(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.level))
    }
}
