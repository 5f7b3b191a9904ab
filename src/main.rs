use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use vanet_dashboard::adapters::outbound::{
    init_buffered_logger, init_combined_logger, init_tracing_subscriber, HttpDashboardApi,
    InMemoryCharts, InMemoryMap,
};
use vanet_dashboard::application::{DashboardContext, DashboardController, HazardReportService, Poller};
use vanet_dashboard::common::{ApplicationError, GeoPoint};
use vanet_dashboard::domains::charts::ChartKind;
use vanet_dashboard::domains::reporting::HazardReport;
use vanet_dashboard::Config;

#[derive(Parser)]
#[command(name = "vanet-dashboard", version, about = "Headless VANET monitoring dashboard")]
struct Cli {
    /// TOML configuration file; `DASHBOARD__*` variables override it.
    #[arg(long, short, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Poll the backend and keep the map, charts and alerts in sync (default).
    Run,
    /// Report a hazard at a location and refresh the map once.
    Report {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        #[arg(long)]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::load(Some(cli.config.as_path())).map_err(ApplicationError::Configuration)?;
    let level = config.logging.level_filter()?;

    // Tracing first, without the log bridge, so fast_log can still take `log`.
    init_tracing_subscriber(level)?;
    info!("Configuration loaded, backend at {}", config.api.base_url);

    let logger = init_buffered_logger(
        init_combined_logger(config.logging.file.as_deref(), level),
        config.logging.buffer_capacity,
    );
    let api = Arc::new(
        HttpDashboardApi::new(config.api.base_url.clone(), config.request_timeout())
            .map_err(ApplicationError::Configuration)?,
    );
    let context = DashboardContext::new(InMemoryMap::new(), InMemoryCharts::new());
    let controller = DashboardController::new(api, config.profile(), context, logger);
    controller.initialize(config.map_view()).await;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run(controller, &config).await?,
        Command::Report { lat, lng, description } => {
            let service = HazardReportService::new(controller.clone());
            match service
                .submit(HazardReport::new(GeoPoint::new(lat, lng), description))
                .await
            {
                Ok(receipt) => info!("{} (refresh: {:?})", receipt.message, receipt.refresh),
                Err(e) => error!("{}", e),
            }
            controller.teardown().await;
        }
    }

    // Let the buffered logger drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}

async fn run(
    controller: DashboardController<InMemoryMap, InMemoryCharts>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let poller = Poller::new(controller.clone(), config.poller_settings()).spawn();
    info!("VANET dashboard started");

    let mut status = tokio::time::interval(Duration::from_secs(10));
    status.tick().await;
    loop {
        tokio::select! {
            _ = status.tick() => {
                let context = controller.context();
                let ctx = context.lock().await;
                let stats = ctx.stats();
                info!(
                    vehicles = stats.vehicles,
                    vessels = stats.vessels,
                    events = stats.events,
                    markers = ctx.markers().len(),
                    "Dashboard status"
                );
                for kind in ChartKind::ALL {
                    if let Some(dataset) = ctx.charts().dataset(kind) {
                        info!("{}: {:?} = {:?}", kind.title(), dataset.labels, dataset.values);
                    }
                }
                for line in ctx.alerts().render_lines().iter().take(3) {
                    info!("{}", line);
                }
                if let Some(notice) = ctx.notice() {
                    info!("Notice: {:?}", notice);
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }

    info!("Shutting down VANET dashboard");
    poller.shutdown().await;
    controller.teardown().await;
    Ok(())
}
