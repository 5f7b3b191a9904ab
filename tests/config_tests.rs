use std::io::Write;
use std::time::Duration;

use vanet_dashboard::domains::tracking::{ProfileName, ZonePolicy};
use vanet_dashboard::Config;

const SAMPLE: &str = r#"
[api]
base_url = "http://sim.local:5000"
timeout_ms = 2500

[polling]
update_interval_ms = 2000

[map]
initial_latitude = 18.0
initial_longitude = 79.5
zoom = 11

[feed]
profile = "update_simulation"

[logging]
level = "debug"
"#;

fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn from_file_reads_every_section() {
    let file = sample_file();

    let config = Config::from_file(file.path()).await.unwrap();

    assert_eq!(config.api.base_url, "http://sim.local:5000");
    assert_eq!(config.request_timeout(), Duration::from_millis(2500));
    assert_eq!(config.feed.profile, ProfileName::UpdateSimulation);
    assert_eq!(config.map_interval(), Duration::from_secs(2));
    assert_eq!(config.chart_interval(), None);
    assert_eq!(config.map_view().zoom, 11);
    assert_eq!(config.logging.level_filter().unwrap(), log::LevelFilter::Debug);
    // untouched sections keep their defaults
    assert_eq!(config.polling.simulation_update_interval_ms, 1000);
    assert_eq!(config.profile().zones, ZonePolicy::AppendOnly);
}

#[tokio::test]
async fn from_file_rejects_invalid_values() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(b"[map]\ninitial_latitude = 123.0\n").unwrap();

    assert!(Config::from_file(file.path()).await.is_err());
    assert!(Config::from_file("/nonexistent/dashboard.toml").await.is_err());
}

#[test]
fn load_layers_file_and_environment() {
    let file = sample_file();
    std::env::set_var("DASHBOARD__API__TIMEOUT_MS", "750");

    let config = Config::load(Some(file.path())).unwrap();
    std::env::remove_var("DASHBOARD__API__TIMEOUT_MS");

    assert_eq!(config.api.base_url, "http://sim.local:5000");
    assert_eq!(config.api.timeout_ms, 750);
    assert_eq!(config.feed.profile, ProfileName::UpdateSimulation);

    // a missing file falls back to defaults
    let defaults = Config::load(Some(std::path::Path::new("/nonexistent/dashboard.toml"))).unwrap();
    assert_eq!(defaults, Config::default());
}
