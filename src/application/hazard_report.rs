use super::controller::{CycleOutcome, DashboardController};
use crate::common::{ApplicationError, ApplicationResult, DomainError, GeoPoint};
use crate::domains::alerts::UserNotice;
use crate::domains::charts::ChartSurface;
use crate::domains::map::MarkerSurface;
use crate::domains::reporting::{HazardReport, HazardReportDraft};
use crate::domains::tracking::decode_report_ack;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReceipt {
    /// Confirmation text from the backend.
    pub message: String,
    /// Outcome of the refresh triggered by the successful report.
    pub refresh: CycleOutcome,
}

/// User-initiated hazard reporting, outside the periodic loop.
pub struct HazardReportService<M: MarkerSurface, C: ChartSurface> {
    controller: DashboardController<M, C>,
}

impl<M: MarkerSurface, C: ChartSurface> HazardReportService<M, C> {
    pub fn new(controller: DashboardController<M, C>) -> Self {
        Self { controller }
    }

    /// Validate, POST once, and on success refresh the map once.
    /// Invalid reports are rejected before any request is made.
    pub async fn submit(&self, report: HazardReport) -> ApplicationResult<ReportReceipt> {
        report.validate()?;

        let logger = self.controller.logger();
        let endpoint = self.controller.profile().report_endpoint.as_str();
        let body = serde_json::to_value(&report).map_err(DomainError::from)?;

        let ack = match self.controller.api().post_json(endpoint, body).await {
            Ok(payload) => decode_report_ack(&payload).map_err(ApplicationError::from),
            Err(e) => Err(ApplicationError::from(e)),
        };

        match ack {
            Ok(message) => {
                logger.info(&format!(
                    "Hazard reported at ({:.5}, {:.5}): {}",
                    report.latitude, report.longitude, message
                ));
                self.controller
                    .context()
                    .lock()
                    .await
                    .set_notice(UserNotice::Info(message.clone()));
                let refresh = self.controller.refresh_map().await;
                Ok(ReportReceipt { message, refresh })
            }
            Err(e) => {
                logger.error(&format!("Error reporting hazard: {}", e));
                self.controller
                    .context()
                    .lock()
                    .await
                    .set_notice(UserNotice::Error(ApplicationError::ReportFailed.to_string()));
                Err(ApplicationError::ReportFailed)
            }
        }
    }

    /// Feed a map click to a pending draft. `None` when no draft was waiting.
    pub async fn submit_click(
        &self,
        draft: &mut HazardReportDraft,
        at: GeoPoint,
    ) -> Option<ApplicationResult<ReportReceipt>> {
        let report = draft.on_map_click(at)?;
        Some(self.submit(report).await)
    }
}
