mod common;

use common::{combined_payload, controller, CaptureLogger, FakeApi};
use serde_json::json;
use tokio_test::assert_ok;

use vanet_dashboard::application::{CycleOutcome, HazardReportService};
use vanet_dashboard::common::{ApplicationError, DomainError, GeoPoint};
use vanet_dashboard::domains::alerts::UserNotice;
use vanet_dashboard::domains::reporting::{HazardReport, HazardReportDraft};
use vanet_dashboard::domains::tracking::FeedProfile;

const REPORT: &str = "/report_hazard";
const SIM_DATA: &str = "/api/simulation_data";

#[tokio::test]
async fn successful_report_posts_once_and_refreshes_once() {
    let api = FakeApi::new();
    api.respond(REPORT, json!({"message": "Hazard reported successfully"}));
    api.respond(SIM_DATA, combined_payload(17.97, &["Z1"]));
    let c = controller(api.clone(), FeedProfile::simulation_data(), CaptureLogger::new());
    let service = HazardReportService::new(c.clone());

    let receipt = assert_ok!(
        service
            .submit(HazardReport::new(GeoPoint::new(17.9689, 79.594), "Fallen tree"))
            .await
    );

    assert_eq!(receipt.message, "Hazard reported successfully");
    assert!(matches!(receipt.refresh, CycleOutcome::Applied(_)));
    assert_eq!(
        api.posts(),
        vec![(
            REPORT.to_string(),
            json!({"latitude": 17.9689, "longitude": 79.594, "description": "Fallen tree"})
        )]
    );
    assert_eq!(api.get_count(SIM_DATA), 1);

    let context = c.context();
    let ctx = context.lock().await;
    assert_eq!(
        ctx.notice(),
        Some(&UserNotice::Info("Hazard reported successfully".to_string()))
    );
}

#[tokio::test]
async fn invalid_report_is_never_sent() {
    let api = FakeApi::new();
    let c = controller(api.clone(), FeedProfile::simulation_data(), CaptureLogger::new());
    let service = HazardReportService::new(c);

    let blank = service
        .submit(HazardReport::new(GeoPoint::new(17.0, 79.0), "   "))
        .await;
    let off_globe = service
        .submit(HazardReport::new(GeoPoint::new(95.0, 79.0), "Flood"))
        .await;

    assert!(matches!(
        blank,
        Err(ApplicationError::Domain(DomainError::InvalidReport { .. }))
    ));
    assert!(matches!(
        off_globe,
        Err(ApplicationError::Domain(DomainError::InvalidReport { .. }))
    ));
    assert!(api.posts().is_empty());
}

#[tokio::test]
async fn rejected_report_surfaces_a_notice_and_skips_the_refresh() {
    let api = FakeApi::new();
    api.fail(REPORT, 500);
    api.respond(SIM_DATA, combined_payload(17.97, &[]));
    let logger = CaptureLogger::new();
    let c = controller(api.clone(), FeedProfile::simulation_data(), logger.clone());
    let service = HazardReportService::new(c.clone());

    let result = service
        .submit(HazardReport::new(GeoPoint::new(17.0, 79.0), "Oil spill"))
        .await;

    assert!(matches!(result, Err(ApplicationError::ReportFailed)));
    assert_eq!(api.posts().len(), 1);
    assert_eq!(api.get_count(SIM_DATA), 0);
    assert!(logger.contains("ERR:Error reporting hazard"));

    let context = c.context();
    let ctx = context.lock().await;
    assert_eq!(
        ctx.notice(),
        Some(&UserNotice::Error(
            "Failed to report hazard. Please check the logs for details.".to_string()
        ))
    );
}

#[tokio::test]
async fn map_click_completes_a_pending_draft_once() {
    let api = FakeApi::new();
    api.respond(REPORT, json!({"message": "ok"}));
    api.respond(SIM_DATA, combined_payload(17.97, &[]));
    let c = controller(api.clone(), FeedProfile::simulation_data(), CaptureLogger::new());
    let service = HazardReportService::new(c);

    let mut draft = HazardReportDraft::new();
    assert!(service
        .submit_click(&mut draft, GeoPoint::new(17.0, 79.0))
        .await
        .is_none());

    assert_ok!(draft.begin("Pothole"));
    let first = service.submit_click(&mut draft, GeoPoint::new(17.5, 79.5)).await;
    let second = service.submit_click(&mut draft, GeoPoint::new(17.6, 79.6)).await;

    assert!(matches!(first, Some(Ok(_))));
    assert!(second.is_none());
    assert_eq!(api.posts().len(), 1);
    assert_eq!(api.posts()[0].1["description"], "Pothole");
}
