use super::context::{ApplyReport, DashboardContext, Generation, Stream};
use crate::common::{DomainError, FetchError, FetchResult, MapView};
use crate::domains::alerts::UserNotice;
use crate::domains::charts::{
    event_count_dataset, recent_event_histogram, summary_dataset, ChartKind, ChartSurface,
};
use crate::domains::logger::DynLogger;
use crate::domains::map::MarkerSurface;
use crate::domains::tracking::{
    decode_snapshot, decode_summary, decode_type_labels, ChartFeed, DashboardApi, FailureSurface,
    FeedProfile, Snapshot, SummaryRow,
};
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Hands out strictly increasing generations, shared by every cycle of one
/// controller.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    last: AtomicU64,
}

impl GenerationCounter {
    pub fn issue(&self) -> Generation {
        Generation(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A snapshot was applied to the map (and, inline, to the summary chart).
    Applied(ApplyReport),
    /// This many charts received new data.
    ChartsUpdated(usize),
    /// The response arrived after a newer one had been applied.
    Stale,
    /// Network, status or decode failure; nothing was changed.
    Failed,
    /// Nothing to do for this profile.
    Skipped,
}

impl CycleOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, CycleOutcome::Applied(_) | CycleOutcome::ChartsUpdated(_))
    }
}

fn decode_failure(endpoint: &str) -> impl Fn(DomainError) -> FetchError + '_ {
    move |e| FetchError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    }
}

/// Runs fetch-and-render cycles against one [`DashboardContext`].
/// Cheap to clone; clones share the context and the generation counter.
pub struct DashboardController<M: MarkerSurface, C: ChartSurface> {
    api: Arc<dyn DashboardApi>,
    profile: Arc<FeedProfile>,
    context: Arc<Mutex<DashboardContext<M, C>>>,
    generations: Arc<GenerationCounter>,
    logger: DynLogger,
}

impl<M: MarkerSurface, C: ChartSurface> Clone for DashboardController<M, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            profile: self.profile.clone(),
            context: self.context.clone(),
            generations: self.generations.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<M: MarkerSurface, C: ChartSurface> DashboardController<M, C> {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        profile: FeedProfile,
        context: DashboardContext<M, C>,
        logger: DynLogger,
    ) -> Self {
        Self {
            api,
            profile: Arc::new(profile),
            context: Arc::new(Mutex::new(context)),
            generations: Arc::new(GenerationCounter::default()),
            logger,
        }
    }

    pub fn profile(&self) -> &FeedProfile {
        &self.profile
    }

    pub fn api(&self) -> &Arc<dyn DashboardApi> {
        &self.api
    }

    pub fn logger(&self) -> &DynLogger {
        &self.logger
    }

    pub fn context(&self) -> Arc<Mutex<DashboardContext<M, C>>> {
        self.context.clone()
    }

    pub async fn initialize(&self, view: MapView) {
        self.context.lock().await.initialize(view);
        self.logger.info(&format!(
            "Map initialized at ({:.4}, {:.4}) zoom {} using profile {:?}",
            view.center.latitude, view.center.longitude, view.zoom, self.profile.name
        ));
    }

    pub async fn teardown(&self) {
        self.context.lock().await.teardown();
        self.logger.info("Dashboard context torn down");
    }

    async fn fetch_snapshot(&self) -> FetchResult<(Snapshot, Option<Vec<SummaryRow>>)> {
        let endpoint = self.profile.snapshot_endpoint.as_str();
        match &self.profile.charts {
            ChartFeed::Inline { summary_endpoint } => {
                let (snapshot, summary) = tokio::join!(
                    self.api.get_json(endpoint),
                    self.api.get_json(summary_endpoint)
                );
                let snapshot = decode_snapshot(&snapshot?, &self.profile.fields)
                    .map_err(decode_failure(endpoint))?;
                let summary = decode_summary(&summary?).map_err(decode_failure(summary_endpoint))?;
                Ok((snapshot, Some(summary)))
            }
            ChartFeed::Separate { .. } => {
                let payload = self.api.get_json(endpoint).await?;
                let snapshot =
                    decode_snapshot(&payload, &self.profile.fields).map_err(decode_failure(endpoint))?;
                Ok((snapshot, None))
            }
        }
    }

    /// One map cycle. Never returns an error: failures are logged, optionally
    /// shown as a notice, and leave the display untouched.
    pub async fn refresh_map(&self) -> CycleOutcome {
        let generation = self.generations.issue();

        match self.fetch_snapshot().await {
            Ok((snapshot, summary)) => {
                let mut ctx = self.context.lock().await;
                if !ctx.claim(Stream::Map, generation) {
                    self.logger.warn(&format!(
                        "Discarding stale snapshot #{} ({})",
                        generation.0, snapshot
                    ));
                    return CycleOutcome::Stale;
                }
                let report = ctx.apply_snapshot(&snapshot, &self.profile, Utc::now());
                if let Some(rows) = summary {
                    ctx.update_chart(ChartKind::EventSummary, summary_dataset(&rows));
                }
                CycleOutcome::Applied(report)
            }
            Err(e) => {
                self.logger.error(&format!("Error fetching simulation data: {}", e));
                if self.profile.failure_surface == FailureSurface::Notice {
                    let mut ctx = self.context.lock().await;
                    if !ctx.is_stale(Stream::Map, generation) {
                        ctx.set_notice(UserNotice::Error(format!(
                            "Error: Failed to load real-time data. {}",
                            e
                        )));
                    }
                }
                CycleOutcome::Failed
            }
        }
    }

    /// One chart cycle for profiles whose charts poll separately. The two
    /// charts succeed or fail independently; failures only reach the log.
    pub async fn refresh_charts(&self) -> CycleOutcome {
        let (counts_endpoint, recent_endpoint, type_field) = match &self.profile.charts {
            ChartFeed::Separate {
                counts_endpoint,
                recent_endpoint,
                recent_type_field,
                ..
            } => (counts_endpoint.as_str(), recent_endpoint.as_str(), recent_type_field.as_str()),
            ChartFeed::Inline { .. } => return CycleOutcome::Skipped,
        };
        let generation = self.generations.issue();

        let (counts, recent) = tokio::join!(
            self.api.get_json(counts_endpoint),
            self.api.get_json(recent_endpoint)
        );
        let counts = counts.and_then(|v| decode_summary(&v).map_err(decode_failure(counts_endpoint)));
        let recent = recent
            .and_then(|v| decode_type_labels(&v, type_field).map_err(decode_failure(recent_endpoint)));

        let mut updated = 0;
        let mut stale = false;
        let mut ctx = self.context.lock().await;

        match counts {
            Ok(rows) if ctx.claim(Stream::Charts, generation) => {
                ctx.update_chart(ChartKind::EventTypeShare, event_count_dataset(&rows));
                updated += 1;
            }
            Ok(_) => stale = true,
            Err(e) => self
                .logger
                .error(&format!("Error fetching event counts for pie chart: {}", e)),
        }
        match recent {
            Ok(types) if ctx.claim(Stream::Charts, generation) => {
                ctx.update_chart(ChartKind::RecentEventFrequency, recent_event_histogram(&types));
                updated += 1;
            }
            Ok(_) => stale = true,
            Err(e) => self
                .logger
                .error(&format!("Error fetching recent events for bar chart: {}", e)),
        }

        if updated > 0 {
            CycleOutcome::ChartsUpdated(updated)
        } else if stale {
            self.logger.warn(&format!("Discarding stale chart data #{}", generation.0));
            CycleOutcome::Stale
        } else {
            CycleOutcome::Failed
        }
    }
}
