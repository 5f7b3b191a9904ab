use crate::common::{DomainError, DomainResult, GeoPoint};
use serde::{Deserialize, Serialize};

/// Body of `POST /report_hazard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardReport {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

impl HazardReport {
    pub fn new(at: GeoPoint, description: impl Into<String>) -> Self {
        Self {
            latitude: at.latitude,
            longitude: at.longitude,
            description: description.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !GeoPoint::new(self.latitude, self.longitude).is_valid() {
            return Err(DomainError::InvalidReport {
                reason: format!(
                    "location ({}, {}) is outside valid coordinates",
                    self.latitude, self.longitude
                ),
            });
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::InvalidReport {
                reason: "description is empty".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DraftState {
    Idle,
    AwaitingLocation { description: String },
}

/// Collects a report in two steps: a description, then one map click.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardReportDraft {
    state: DraftState,
}

impl Default for HazardReportDraft {
    fn default() -> Self {
        Self { state: DraftState::Idle }
    }
}

impl HazardReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank description counts as a cancelled prompt and leaves the draft idle.
    pub fn begin(&mut self, description: &str) -> DomainResult<()> {
        let description = description.trim();
        if description.is_empty() {
            self.state = DraftState::Idle;
            return Err(DomainError::InvalidReport {
                reason: "description is empty".to_string(),
            });
        }
        self.state = DraftState::AwaitingLocation {
            description: description.to_string(),
        };
        Ok(())
    }

    pub fn is_awaiting_location(&self) -> bool {
        matches!(self.state, DraftState::AwaitingLocation { .. })
    }

    /// Consumes the pending description. Later clicks are ignored until the
    /// next `begin`.
    pub fn on_map_click(&mut self, at: GeoPoint) -> Option<HazardReport> {
        match std::mem::replace(&mut self.state, DraftState::Idle) {
            DraftState::AwaitingLocation { description } => Some(HazardReport::new(at, description)),
            DraftState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_completes_draft_once() {
        let mut draft = HazardReportDraft::new();
        draft.begin("  Pothole ").unwrap();
        assert!(draft.is_awaiting_location());

        let report = draft.on_map_click(GeoPoint::new(17.97, 79.6)).unwrap();
        assert_eq!(report.description, "Pothole");
        assert_eq!(report.latitude, 17.97);
        assert!(draft.on_map_click(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn blank_description_cancels() {
        let mut draft = HazardReportDraft::new();
        assert!(draft.begin("   ").is_err());
        assert!(!draft.is_awaiting_location());
    }

    #[test]
    fn validation_rejects_bad_reports() {
        assert!(HazardReport::new(GeoPoint::new(17.9, 79.6), "Debris").validate().is_ok());
        assert!(HazardReport::new(GeoPoint::new(95.0, 79.6), "Debris").validate().is_err());
        assert!(HazardReport::new(GeoPoint::new(17.9, 79.6), "").validate().is_err());
    }
}
