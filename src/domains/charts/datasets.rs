use crate::domains::tracking::SummaryRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Pie of all-time counts per event type.
    EventTypeShare,
    /// Bar histogram of the most recent events.
    RecentEventFrequency,
    /// Bar of the last day's counts per type.
    EventSummary,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::EventTypeShare,
        ChartKind::RecentEventFrequency,
        ChartKind::EventSummary,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::EventTypeShare => "Distribution of Event Types",
            ChartKind::RecentEventFrequency => "Recent Event Frequency by Type",
            ChartKind::EventSummary => "Number of Events (Last 24h)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// `accident_risk` -> `ACCIDENT RISK`
pub fn humanize_label(raw: &str) -> String {
    raw.replace('_', " ").to_uppercase()
}

/// Humanized labels, input order kept.
pub fn summary_dataset(rows: &[SummaryRow]) -> ChartDataset {
    ChartDataset {
        labels: rows.iter().map(|r| humanize_label(&r.label)).collect(),
        values: rows.iter().map(|r| r.count).collect(),
    }
}

/// Labels verbatim, input order kept.
pub fn event_count_dataset(rows: &[SummaryRow]) -> ChartDataset {
    ChartDataset {
        labels: rows.iter().map(|r| r.label.clone()).collect(),
        values: rows.iter().map(|r| r.count).collect(),
    }
}

/// Count occurrences per type, types in first-seen order.
pub fn recent_event_histogram<S: AsRef<str>>(types: &[S]) -> ChartDataset {
    let mut dataset = ChartDataset::default();
    for t in types {
        let t = t.as_ref();
        match dataset.labels.iter().position(|l| l == t) {
            Some(i) => dataset.values[i] += 1,
            None => {
                dataset.labels.push(t.to_string());
                dataset.values.push(1);
            }
        }
    }
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_labels_are_humanized_in_order() {
        let rows = vec![
            SummaryRow { label: "congestion".into(), count: 3 },
            SummaryRow { label: "accident_risk".into(), count: 1 },
        ];
        let dataset = summary_dataset(&rows);
        assert_eq!(dataset.labels, vec!["CONGESTION", "ACCIDENT RISK"]);
        assert_eq!(dataset.values, vec![3, 1]);
    }

    #[test]
    fn histogram_keeps_first_seen_order() {
        let dataset = recent_event_histogram(&["Congestion", "Distress Call", "Congestion", "Congestion"]);
        assert_eq!(dataset.labels, vec!["Congestion", "Distress Call"]);
        assert_eq!(dataset.values, vec![3, 1]);
        assert!(recent_event_histogram::<&str>(&[]).is_empty());
    }

    #[test]
    fn every_chart_has_a_distinct_title() {
        let titles: std::collections::HashSet<_> = ChartKind::ALL.iter().map(ChartKind::title).collect();
        assert_eq!(titles.len(), ChartKind::ALL.len());
        assert_eq!(ChartKind::EventSummary.title(), "Number of Events (Last 24h)");
    }
}
