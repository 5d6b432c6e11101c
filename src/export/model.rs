// src/export/model.rs

use crate::models::event::Event;
use serde::Serialize;

/// Flat event row shared by all export formats.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub user_id: String,
    pub user_name: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub location: String,
    pub timestamp: String,
}

impl From<&Event> for EventExport {
    fn from(ev: &Event) -> Self {
        Self {
            id: ev.id,
            user_id: ev.user_id.clone(),
            user_name: ev.user_name.clone(),
            date: ev.date_str(),
            time: ev.time_str(),
            kind: ev.kind.et_as_str().to_string(),
            location: ev.location.clone(),
            timestamp: ev.timestamp_str(),
        }
    }
}

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "id",
        "user_id",
        "user_name",
        "date",
        "time",
        "kind",
        "location",
        "timestamp",
    ]
}

pub(crate) fn event_to_row(e: &EventExport) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.user_id.clone(),
        e.user_name.clone(),
        e.date.clone(),
        e.time.clone(),
        e.kind.clone(),
        e.location.clone(),
        e.timestamp.clone(),
    ]
}

pub(crate) fn events_to_table(events: &[EventExport]) -> Vec<Vec<String>> {
    events.iter().map(event_to_row).collect()
}
