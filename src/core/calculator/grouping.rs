//! Folding of raw IN/OUT scans into per-day groups.

use crate::models::day_group::DayGroup;
use crate::models::event::Event;
use crate::models::event_type::EventType;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Fold one event into its day: the last IN and the last OUT seen win.
fn apply(day: &mut DayGroup, ev: &Event) {
    match ev.kind {
        EventType::In => day.in_ts = Some(ev.timestamp),
        EventType::Out => day.out_ts = Some(ev.timestamp),
    }
}

/// Fold events into a date-ordered map, without any user filtering.
pub fn fold_days<'a, I>(events: I) -> BTreeMap<NaiveDate, DayGroup>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut days: BTreeMap<NaiveDate, DayGroup> = BTreeMap::new();

    for ev in events {
        let date = ev.date();
        let day = days.entry(date).or_insert_with(|| DayGroup::empty(date));
        apply(day, ev);
    }

    days
}

/// One [`DayGroup`] per date on which `user_id` has at least one event,
/// most recent date first.
pub fn group_by_day(user_id: &str, events: &[Event]) -> Vec<DayGroup> {
    fold_days(events.iter().filter(|e| e.user_id == user_id))
        .into_values()
        .rev()
        .collect()
}

/// Like [`fold_days`] but keeps different users apart.
pub fn fold_user_days<'a, I>(events: I) -> BTreeMap<(String, NaiveDate), DayGroup>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut days: BTreeMap<(String, NaiveDate), DayGroup> = BTreeMap::new();

    for ev in events {
        let date = ev.date();
        let day = days
            .entry((ev.user_id.clone(), date))
            .or_insert_with(|| DayGroup::empty(date));
        apply(day, ev);
    }

    days
}
