use super::controller::DashboardController;
use crate::domains::charts::ChartSurface;
use crate::domains::map::MarkerSurface;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    pub map_interval: Duration,
    /// `None` when charts are refreshed as part of the map cycle.
    pub chart_interval: Option<Duration>,
}

/// Fires map (and chart) cycles on fixed periods, the first one immediately.
///
/// Every tick spawns its own cycle, so a slow response never delays the next
/// tick; overlapping cycles are sorted out by generation inside the controller.
pub struct Poller<M: MarkerSurface, C: ChartSurface> {
    controller: DashboardController<M, C>,
    settings: PollerSettings,
}

pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop ticking. Cycles already in flight still complete.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

impl<M, C> Poller<M, C>
where
    M: MarkerSurface + 'static,
    C: ChartSurface + 'static,
{
    pub fn new(controller: DashboardController<M, C>, settings: PollerSettings) -> Self {
        Self { controller, settings }
    }

    pub fn spawn(self) -> PollerHandle {
        let (shutdown, rx) = watch::channel(false);
        let task = tokio::spawn(self.run(rx));
        PollerHandle { shutdown, task }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let logger = self.controller.logger().clone();
        let mut map_timer = interval(self.settings.map_interval);
        map_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut chart_timer = self.settings.chart_interval.map(|period| {
            let mut t = interval(period);
            t.set_missed_tick_behavior(MissedTickBehavior::Delay);
            t
        });

        logger.info(&format!(
            "Polling every {:?} (charts: {:?})",
            self.settings.map_interval, self.settings.chart_interval
        ));

        loop {
            tokio::select! {
                _ = map_timer.tick() => {
                    let controller = self.controller.clone();
                    tokio::spawn(async move {
                        controller.refresh_map().await;
                    });
                }

                _ = next_tick(&mut chart_timer) => {
                    let controller = self.controller.clone();
                    tokio::spawn(async move {
                        controller.refresh_charts().await;
                    });
                }

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        logger.info("Poller stopped");
                        break;
                    }
                }
            }
        }
    }
}
