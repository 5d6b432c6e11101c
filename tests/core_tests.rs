use chrono::{DateTime, FixedOffset, NaiveDate};
use rclockin::core::calculator::duration::{
    OPEN_SESSION, calculate_duration_hours, format_duration, format_hours_decimal,
};
use rclockin::core::calculator::grouping::group_by_day;
use rclockin::core::calculator::leave::{find_absence, is_on_vacation, vacation_summary};
use rclockin::core::calculator::monthly::{current_month_stats, monthly_summaries};
use rclockin::core::calculator::weekly::{week_bounds, weekly_stats};
use rclockin::core::logic::Core;
use rclockin::core::report::{filter_by_date_range, report_rows, work_history};
use rclockin::core::scan::next_event_type;
use rclockin::core::status::employee_status;
use rclockin::export::range::parse_range;
use rclockin::models::absence::Absence;
use rclockin::models::day_group::HistoryEntry;
use rclockin::models::event::{Event, parse_timestamp};
use rclockin::models::event_type::EventType;
use rclockin::models::status::EmployeeStatus;
use rclockin::models::user::User;
use rclockin::models::vacation::VacationRange;

fn ts(s: &str) -> DateTime<FixedOffset> {
    parse_timestamp(s).expect("valid timestamp")
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn ev(user: &str, kind: EventType, at: &str) -> Event {
    Event::new(user, user, ts(at), kind, "Office-1")
}

fn ana() -> User {
    User::new("ana", "Ana Ruiz", "ana@example.com")
}

/// ana works 09:00 -> 17:30 on the given date
fn full_day(date: &str) -> Vec<Event> {
    vec![
        ev("ana", EventType::In, &format!("{date}T09:00:00+02:00")),
        ev("ana", EventType::Out, &format!("{date}T17:30:00+02:00")),
    ]
}

// ---------------------------------------------------------------------------
// duration
// ---------------------------------------------------------------------------

#[test]
fn test_eight_and_a_half_hours() {
    let h = calculate_duration_hours(
        Some(&ts("2025-09-01T09:00:00+02:00")),
        Some(&ts("2025-09-01T17:30:00+02:00")),
    );
    assert_eq!(h, Some(8.5));
    assert_eq!(format_duration(h), "8h 30m");
    assert_eq!(format_hours_decimal(8.5), "8.50h");
}

#[test]
fn test_missing_endpoint_has_no_duration() {
    let t = ts("2025-09-01T09:00:00+02:00");
    assert_eq!(calculate_duration_hours(Some(&t), None), None);
    assert_eq!(calculate_duration_hours(None, Some(&t)), None);
    assert_eq!(format_duration(None), OPEN_SESSION);
}

#[test]
fn test_zero_length_day_is_not_open() {
    let t = ts("2025-09-01T09:00:00+02:00");
    let h = calculate_duration_hours(Some(&t), Some(&t));
    assert_eq!(h, Some(0.0));
    assert_eq!(format_duration(h), "0h 0m");
}

#[test]
fn test_out_before_in_is_negative() {
    let h = calculate_duration_hours(
        Some(&ts("2025-09-01T17:00:00+02:00")),
        Some(&ts("2025-09-01T09:00:00+02:00")),
    );
    assert_eq!(h, Some(-8.0));
}

#[test]
fn test_duration_across_offsets() {
    // same instant expressed in two offsets: 1 hour apart in real time
    let h = calculate_duration_hours(
        Some(&ts("2025-09-01T09:00:00+02:00")),
        Some(&ts("2025-09-01T08:00:00+00:00")),
    );
    assert_eq!(h, Some(1.0));
}

// ---------------------------------------------------------------------------
// grouping
// ---------------------------------------------------------------------------

#[test]
fn test_in_only_day_is_listed_open() {
    let events = vec![ev("ana", EventType::In, "2025-09-01T09:00:00+02:00")];
    let days = group_by_day("ana", &events);

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, d("2025-09-01"));
    assert!(days[0].out_ts.is_none());
    assert!(days[0].is_open());
    assert_eq!(days[0].hours(), None);
    assert_eq!(days[0].worked_hours(), 0.0);
}

#[test]
fn test_grouping_is_idempotent_and_sorted_desc() {
    let mut events = full_day("2025-09-01");
    events.extend(full_day("2025-09-03"));
    events.push(ev("bob", EventType::In, "2025-09-02T08:00:00+02:00"));

    let first = group_by_day("ana", &events);
    let second = group_by_day("ana", &events);
    assert_eq!(first, second);

    let dates: Vec<NaiveDate> = first.iter().map(|g| g.date).collect();
    assert_eq!(dates, vec![d("2025-09-03"), d("2025-09-01")]);

    // input order does not matter with one IN and one OUT per day
    events.reverse();
    assert_eq!(group_by_day("ana", &events), first);
}

#[test]
fn test_last_in_of_the_day_wins() {
    let events = vec![
        ev("ana", EventType::In, "2025-09-01T08:00:00+02:00"),
        ev("ana", EventType::In, "2025-09-01T09:00:00+02:00"),
        ev("ana", EventType::Out, "2025-09-01T17:00:00+02:00"),
    ];
    let days = group_by_day("ana", &events);
    assert_eq!(days[0].in_ts, Some(ts("2025-09-01T09:00:00+02:00")));
    assert_eq!(days[0].hours(), Some(8.0));
}

#[test]
fn test_day_uses_the_recorded_offset() {
    // 23:30 in New York is already the next day in UTC
    let events = vec![ev("ana", EventType::In, "2025-09-30T23:30:00-04:00")];
    let days = group_by_day("ana", &events);
    assert_eq!(days[0].date, d("2025-09-30"));
}

#[test]
fn test_user_without_events_has_no_days() {
    assert!(group_by_day("ana", &[]).is_empty());
    assert!(group_by_day("nobody", &full_day("2025-09-01")).is_empty());
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn test_zero_data_user() {
    let ov = Core::build_overview(&ana(), &[], &[], d("2025-09-03"));

    assert_eq!(ov.status, EmployeeStatus::Inactive);
    assert_eq!(ov.weekly.total, 0.0);
    assert_eq!(ov.weekly.target, 40.0);
    assert_eq!(ov.weekly.percent, 0.0);
    assert!(!ov.weekly.on_vacation);
    assert_eq!(ov.month.total, 0.0);
    assert_eq!(ov.vacations.remaining, 30);
}

#[test]
fn test_vacation_overrides_everything() {
    let mut user = ana();
    user.vacations = vec![VacationRange::new("ana-v1", d("2025-09-01"), d("2025-09-05"))];
    let absences = vec![Absence::new("ana", d("2025-09-03"), "Sick leave", None)];
    let events = vec![ev("ana", EventType::In, "2025-09-03T09:00:00+02:00")];

    let ov = Core::build_overview(&user, &events, &absences, d("2025-09-03"));
    assert_eq!(ov.status, EmployeeStatus::OnVacation);
    assert_eq!(ov.weekly.target, 0.0);
    assert_eq!(ov.weekly.percent, 100.0);
    assert!(ov.weekly.on_vacation);
}

#[test]
fn test_vacation_bounds_are_inclusive() {
    let ranges = vec![VacationRange::new("v", d("2025-09-01"), d("2025-09-05"))];
    assert!(is_on_vacation(&ranges, d("2025-09-01")));
    assert!(is_on_vacation(&ranges, d("2025-09-05")));
    assert!(!is_on_vacation(&ranges, d("2025-09-06")));

    let inverted = vec![VacationRange::new("v", d("2025-09-05"), d("2025-09-01"))];
    assert!(!is_on_vacation(&inverted, d("2025-09-03")));
}

#[test]
fn test_absent_shows_custom_reason_for_other() {
    let absences = vec![
        Absence::new("bob", d("2025-09-03"), "Training", None),
        Absence::new("ana", d("2025-09-03"), "Other", Some("Dentist")),
    ];

    let status = employee_status(&ana(), &[], &absences, d("2025-09-03"));
    assert_eq!(
        status,
        EmployeeStatus::Absent {
            reason: "Dentist".to_string()
        }
    );
    assert_eq!(status.describe(), "Absent (Dentist)");

    let found = find_absence("bob", d("2025-09-03"), &absences).expect("bob absence");
    assert_eq!(found.display_reason(), "Training");
}

#[test]
fn test_in_then_out_is_inactive() {
    let events = full_day("2025-09-03");
    let status = employee_status(&ana(), &events, &[], d("2025-09-03"));
    assert_eq!(status, EmployeeStatus::Inactive);
}

#[test]
fn test_open_in_from_yesterday_is_working() {
    let mut events = full_day("2025-09-01");
    events.push(ev("ana", EventType::In, "2025-09-02T22:00:00+02:00"));

    let status = employee_status(&ana(), &events, &[], d("2025-09-03"));
    assert_eq!(status, EmployeeStatus::Working);
}

// ---------------------------------------------------------------------------
// weekly
// ---------------------------------------------------------------------------

#[test]
fn test_week_bounds_monday_to_sunday() {
    assert_eq!(week_bounds(d("2025-09-03")), (d("2025-09-01"), d("2025-09-07")));
    assert_eq!(week_bounds(d("2025-09-01")), (d("2025-09-01"), d("2025-09-07")));
    assert_eq!(week_bounds(d("2025-09-07")), (d("2025-09-01"), d("2025-09-07")));
}

#[test]
fn test_one_absence_lowers_target_to_32() {
    let absences = vec![Absence::new("ana", d("2025-09-02"), "Sick leave", None)];
    let stats = weekly_stats(&ana(), &[], false, &absences, d("2025-09-03"));
    assert_eq!(stats.target, 32.0);
}

#[test]
fn test_absences_outside_week_or_of_others_are_ignored() {
    let absences = vec![
        Absence::new("ana", d("2025-08-29"), "Sick leave", None),
        Absence::new("bob", d("2025-09-02"), "Sick leave", None),
    ];
    let stats = weekly_stats(&ana(), &[], false, &absences, d("2025-09-03"));
    assert_eq!(stats.target, 40.0);
}

#[test]
fn test_more_absences_than_working_days_floor_at_zero() {
    let absences: Vec<Absence> = (1..=7)
        .map(|day| Absence::new("ana", d(&format!("2025-09-0{day}")), "Sick leave", None))
        .collect();
    let stats = weekly_stats(&ana(), &[], false, &absences, d("2025-09-03"));
    assert_eq!(stats.target, 0.0);
    assert_eq!(stats.percent, 100.0);
}

#[test]
fn test_zero_working_days_with_absence_has_zero_target() {
    let mut user = ana();
    user.working_days_per_week = 0;
    let absences = vec![Absence::new("ana", d("2025-09-02"), "Training", None)];

    let stats = weekly_stats(&user, &[], false, &absences, d("2025-09-03"));
    assert_eq!(stats.target, 0.0);
    assert_eq!(stats.percent, 100.0);
}

#[test]
fn test_weekly_total_and_percent_capped() {
    let mut events = full_day("2025-09-01");
    events.extend(full_day("2025-09-02"));
    // previous week, not counted
    events.extend(full_day("2025-08-29"));
    // open day contributes nothing
    events.push(ev("ana", EventType::In, "2025-09-03T09:00:00+02:00"));

    let stats = weekly_stats(&ana(), &events, false, &[], d("2025-09-03"));
    assert_eq!(stats.total, 17.0);
    assert!((stats.percent - 42.5).abs() < 1e-9);

    let mut part_time = ana();
    part_time.weekly_hours = 10.0;
    let stats = weekly_stats(&part_time, &events, false, &[], d("2025-09-03"));
    assert_eq!(stats.percent, 100.0);
}

// ---------------------------------------------------------------------------
// monthly
// ---------------------------------------------------------------------------

#[test]
fn test_monthly_totals_match_daily_sum() {
    let mut events = full_day("2025-08-28");
    events.extend(full_day("2025-09-01"));
    events.extend(full_day("2025-09-02"));
    events.push(ev("ana", EventType::In, "2025-09-03T09:00:00+02:00"));
    events.push(ev("bob", EventType::In, "2025-09-01T08:00:00+02:00"));
    events.push(ev("bob", EventType::Out, "2025-09-01T12:00:00+02:00"));

    let summaries = monthly_summaries(&events);
    let keys: Vec<&str> = summaries.iter().map(|s| s.month_key.as_str()).collect();
    assert_eq!(keys, vec!["2025-09", "2025-08"]);

    let monthly_total: f64 = summaries.iter().map(|s| s.total_hours).sum();
    let daily_total: f64 = ["ana", "bob"]
        .iter()
        .flat_map(|u| group_by_day(u, &events))
        .map(|g| g.worked_hours())
        .sum();
    assert!((monthly_total - daily_total).abs() < 1e-9);

    // ana 2x8.5 plus bob 4, counted per user
    let sept = &summaries[0];
    assert_eq!(sept.total_hours, 21.0);
    assert_eq!(sept.days_worked, 3);
    assert_eq!(sept.avg_hours_per_day, 7.0);
}

#[test]
fn test_month_without_complete_days_has_zero_average() {
    let events = vec![ev("ana", EventType::In, "2025-09-03T09:00:00+02:00")];
    let summaries = monthly_summaries(&events);
    assert_eq!(summaries[0].days_worked, 0);
    assert_eq!(summaries[0].avg_hours_per_day, 0.0);
}

#[test]
fn test_current_month_stats() {
    let mut events = full_day("2025-08-28");
    events.extend(full_day("2025-09-01"));

    let stats = current_month_stats("ana", &events, d("2025-09-15"));
    assert_eq!(stats.month_key, "2025-09");
    assert_eq!(stats.total, 8.5);
    assert_eq!(stats.days_worked, 1);
}

// ---------------------------------------------------------------------------
// vacations
// ---------------------------------------------------------------------------

#[test]
fn test_vacation_summary_counts_inclusive_days() {
    let mut user = ana();
    user.vacations = vec![
        VacationRange::new("ana-v1", d("2025-08-01"), d("2025-08-10")),
        VacationRange::new("ana-v2", d("2025-12-24"), d("2025-12-24")),
        VacationRange::new("bad", d("2025-10-10"), d("2025-10-01")),
    ];

    let s = vacation_summary(&user);
    assert_eq!(s.total, 30);
    assert_eq!(s.used, 11);
    assert_eq!(s.remaining, 19);
}

#[test]
fn test_vacation_summary_can_go_negative() {
    let mut user = ana();
    user.total_vacation_days = 5;
    user.vacations = vec![VacationRange::new("ana-v1", d("2025-08-01"), d("2025-08-10"))];
    assert_eq!(vacation_summary(&user).remaining, -5);
}

// ---------------------------------------------------------------------------
// reporting
// ---------------------------------------------------------------------------

#[test]
fn test_date_range_filter_uses_wall_clock() {
    let events = vec![
        ev("ana", EventType::In, "2025-08-31T23:59:59-05:00"),
        ev("ana", EventType::In, "2025-09-01T00:00:00+09:00"),
        ev("ana", EventType::Out, "2025-09-30T23:59:59+02:00"),
        ev("ana", EventType::In, "2025-10-01T00:00:00+00:00"),
    ];

    let sept = filter_by_date_range(&events, Some(d("2025-09-01")), Some(d("2025-09-30")));
    assert_eq!(sept.len(), 2);

    let from = filter_by_date_range(&events, Some(d("2025-09-01")), None);
    assert_eq!(from.len(), 3);

    let until = filter_by_date_range(&events, None, Some(d("2025-08-31")));
    assert_eq!(until.len(), 1);

    assert_eq!(filter_by_date_range(&events, None, None), events);
}

#[test]
fn test_report_rows_ascending_with_total() {
    let mut events = full_day("2025-09-02");
    events.extend(full_day("2025-09-01"));
    events.push(ev("ana", EventType::In, "2025-09-03T09:00:00+02:00"));

    let (rows, total) = report_rows(&events);
    let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-09-01", "2025-09-02", "2025-09-03"]);

    assert_eq!(rows[0].entry, "09:00");
    assert_eq!(rows[0].exit, "17:30");
    assert_eq!(rows[2].exit, "--:--");
    assert_eq!(rows[2].hours, 0.0);
    assert_eq!(total, 17.0);
    assert_eq!(rows[0].cells()[3], "8.50h");
}

#[test]
fn test_work_history_merges_absences() {
    let mut events = full_day("2025-09-01");
    events.extend(full_day("2025-09-03"));
    let absences = vec![
        Absence::new("ana", d("2025-09-02"), "Sick leave", None),
        // a day with scans stays a worked day
        Absence::new("ana", d("2025-09-03"), "Training", None),
        Absence::new("bob", d("2025-09-04"), "Training", None),
    ];

    let history = work_history("ana", &events, &absences);
    let dates: Vec<NaiveDate> = history.iter().map(HistoryEntry::date).collect();
    assert_eq!(dates, vec![d("2025-09-03"), d("2025-09-02"), d("2025-09-01")]);

    assert!(matches!(history[0], HistoryEntry::Worked(_)));
    assert!(matches!(&history[1], HistoryEntry::Absent(a) if a.predefined_reason == "Sick leave"));
}

// ---------------------------------------------------------------------------
// scan rule
// ---------------------------------------------------------------------------

#[test]
fn test_scan_alternates_in_out_then_stops() {
    let now = ts("2025-09-01T18:00:00+02:00");
    assert_eq!(next_event_type("ana", &[], &now), Some(EventType::In));

    let one = vec![ev("ana", EventType::In, "2025-09-01T09:00:00+02:00")];
    assert_eq!(next_event_type("ana", &one, &now), Some(EventType::Out));

    let two = full_day("2025-09-01");
    assert_eq!(next_event_type("ana", &two, &now), None);

    // scans of another day or user do not count
    let tomorrow = ts("2025-09-02T08:00:00+02:00");
    assert_eq!(next_event_type("ana", &two, &tomorrow), Some(EventType::In));
    assert_eq!(next_event_type("bob", &two, &now), Some(EventType::In));
}

#[test]
fn test_out_at_same_instant_as_in_is_inactive() {
    // newest-first with equal timestamps: the OUT is listed first
    let at = "2025-09-01T09:00:00+02:00";
    let events = vec![ev("ana", EventType::Out, at), ev("ana", EventType::In, at)];
    let status = employee_status(&ana(), &events, &[], d("2025-09-01"));
    assert_eq!(status, EmployeeStatus::Inactive);

    // persisted ids decide regardless of slice order
    let mut inn = ev("ana", EventType::In, at);
    inn.id = 1;
    let mut out = ev("ana", EventType::Out, at);
    out.id = 2;
    for events in [vec![inn.clone(), out.clone()], vec![out, inn]] {
        let status = employee_status(&ana(), &events, &[], d("2025-09-01"));
        assert_eq!(status, EmployeeStatus::Inactive);
    }
}

// ---------------------------------------------------------------------------
// range
// ---------------------------------------------------------------------------

#[test]
fn test_month_range_covers_whole_month() {
    assert_eq!(
        parse_range("2024-09").expect("month"),
        (Some(d("2024-09-01")), Some(d("2024-09-30")))
    );
    assert_eq!(
        parse_range("2024-02").expect("leap month"),
        (Some(d("2024-02-01")), Some(d("2024-02-29")))
    );
    assert_eq!(parse_range(":2025-03").expect("open start"), (None, Some(d("2025-03-31"))));
    assert_eq!(parse_range("all").expect("all"), (None, None));
}

#[test]
fn test_malformed_month_is_rejected() {
    for raw in ["2024x09", "2024/09", "+202-09", "2024-13", "2025-05:2025-01"] {
        assert!(parse_range(raw).is_err(), "{raw} should be rejected");
    }
}
