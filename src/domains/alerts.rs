use crate::domains::charts::humanize_label;
use crate::domains::tracking::{AlertTitleStyle, Event, EventCategory, Snapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EMPTY_FEED_TEXT: &str = "No recent alerts.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    pub event_id: String,
    pub category: EventCategory,
    pub title: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl AlertItem {
    pub fn render(&self) -> String {
        format!(
            "{}: {} ({})",
            self.title,
            self.description,
            self.occurred_at.format("%H:%M:%S")
        )
    }
}

/// Sidebar list of events, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFeed {
    items: Vec<AlertItem>,
}

impl AlertFeed {
    pub fn from_events(events: &[Event], titles: AlertTitleStyle) -> Self {
        let mut items: Vec<AlertItem> = events
            .iter()
            .map(|e| AlertItem {
                event_id: e.id.clone(),
                category: e.event_type.category(),
                title: match titles {
                    AlertTitleStyle::Raw => e.type_label.clone(),
                    AlertTitleStyle::Humanized => humanize_label(&e.type_label),
                },
                description: e.description.clone(),
                occurred_at: e.timestamp,
            })
            .collect();
        // stable: equal timestamps keep backend order
        items.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        Self { items }
    }

    pub fn items(&self) -> &[AlertItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn render_lines(&self) -> Vec<String> {
        if self.items.is_empty() {
            return vec![EMPTY_FEED_TEXT.to_string()];
        }
        self.items.iter().map(AlertItem::render).collect()
    }
}

/// Counters shown in the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderStats {
    pub vehicles: usize,
    pub vessels: usize,
    pub events: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HeaderStats {
    pub fn from_snapshot(snapshot: &Snapshot, at: DateTime<Utc>) -> Self {
        Self {
            vehicles: snapshot.vehicles.len(),
            vessels: snapshot.vessels.len(),
            events: snapshot.events.len(),
            updated_at: Some(at),
        }
    }
}

/// Transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserNotice {
    Info(String),
    Error(String),
}
