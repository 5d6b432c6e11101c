use chrono::NaiveDate;
use rclockin::config::Config;
use rclockin::core::scan::ScanLogic;
use rclockin::core::status::employee_status;
use rclockin::db::absences::{delete_absence, insert_absence, load_absences, load_absences_by_date};
use rclockin::db::companies::{assign_company, insert_company, load_companies};
use rclockin::db::initialize::init_db;
use rclockin::db::log::{load_log, ttlog};
use rclockin::db::migrate::run_pending_migrations;
use rclockin::db::pool::DbPool;
use rclockin::db::queries::{insert_event, load_events};
use rclockin::db::users::{
    delete_vacation, hard_delete_user, insert_vacation, load_all_users, load_user, load_users,
    next_vacation_id, require_user, soft_delete_user, update_vacation, upsert_user,
};
use rclockin::errors::AppError;
use rclockin::models::absence::Absence;
use rclockin::models::company::Company;
use rclockin::models::event::{Event, parse_timestamp};
use rclockin::models::event_type::EventType;
use rclockin::models::status::EmployeeStatus;
use rclockin::models::user::{Role, User};
use rclockin::models::vacation::VacationRange;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// In-memory store with ana and bob registered
fn pool_with_users() -> DbPool {
    let pool = DbPool::in_memory().expect("open in-memory db");
    init_db(&pool.conn).expect("init db");

    upsert_user(&pool.conn, &User::new("ana", "Ana Ruiz", "ana@example.com")).expect("add ana");
    upsert_user(&pool.conn, &User::new("bob", "Bob Stone", "bob@example.com")).expect("add bob");
    pool
}

fn scan(pool: &mut DbPool, user: &str, at: &str) -> Result<Event, AppError> {
    ScanLogic::apply(pool, user, "Office-1", parse_timestamp(at).expect("valid ts"))
}

#[test]
fn test_migrations_are_applied_once() {
    let pool = DbPool::in_memory().expect("open in-memory db");
    assert_eq!(run_pending_migrations(&pool.conn).expect("first run"), 2);
    assert_eq!(run_pending_migrations(&pool.conn).expect("second run"), 0);
}

#[test]
fn test_user_roundtrip_with_vacations() {
    let pool = pool_with_users();

    let mut ana = require_user(&pool.conn, "ana").expect("ana");
    ana.role = Role::Admin;
    ana.weekly_hours = 32.0;
    ana.working_days_per_week = 4;
    upsert_user(&pool.conn, &ana).expect("update ana");

    let id = next_vacation_id(&pool.conn, "ana").expect("vacation id");
    assert_eq!(id, "ana-v1");
    insert_vacation(
        &pool.conn,
        "ana",
        &VacationRange::new(&id, d("2025-08-01"), d("2025-08-10")),
    )
    .expect("insert vacation");

    let loaded = load_user(&pool.conn, "ana").expect("load").expect("exists");
    assert!(loaded.is_admin());
    assert_eq!(loaded.weekly_hours, 32.0);
    assert_eq!(loaded.working_days_per_week, 4);
    assert_eq!(loaded.vacations.len(), 1);
    assert_eq!(loaded.vacations[0].days(), 10);

    assert_eq!(next_vacation_id(&pool.conn, "ana").expect("next id"), "ana-v2");
}

#[test]
fn test_profile_validation() {
    let pool = pool_with_users();

    let mut u = User::new("carl", "Carl", "carl@example.com");
    u.weekly_hours = 0.0;
    assert!(matches!(upsert_user(&pool.conn, &u), Err(AppError::InvalidValue(_))));

    let mut u = User::new("carl", "Carl", "carl@example.com");
    u.working_days_per_week = 8;
    assert!(matches!(upsert_user(&pool.conn, &u), Err(AppError::InvalidValue(_))));

    let u = User::new("carl", "Carl", "not-an-email");
    assert!(matches!(upsert_user(&pool.conn, &u), Err(AppError::InvalidValue(_))));

    assert!(load_user(&pool.conn, "carl").expect("load").is_none());
}

#[test]
fn test_inverted_vacation_is_rejected() {
    let pool = pool_with_users();
    let bad = VacationRange::new("ana-v1", d("2025-08-10"), d("2025-08-01"));

    assert!(matches!(
        insert_vacation(&pool.conn, "ana", &bad),
        Err(AppError::InvalidRange(_))
    ));
    assert!(require_user(&pool.conn, "ana").expect("ana").vacations.is_empty());
}

#[test]
fn test_vacation_edit_and_remove() {
    let pool = pool_with_users();
    let v = VacationRange::new("ana-v1", d("2025-08-01"), d("2025-08-10"));
    insert_vacation(&pool.conn, "ana", &v).expect("insert");

    let moved = VacationRange::new("ana-v1", d("2025-09-01"), d("2025-09-03"));
    update_vacation(&pool.conn, "ana", &moved).expect("update");
    assert_eq!(require_user(&pool.conn, "ana").expect("ana").vacations, vec![moved]);

    // vacation ids are scoped to their owner
    assert!(matches!(
        delete_vacation(&pool.conn, "bob", "ana-v1"),
        Err(AppError::VacationNotFound(_))
    ));
    delete_vacation(&pool.conn, "ana", "ana-v1").expect("delete");
    assert!(require_user(&pool.conn, "ana").expect("ana").vacations.is_empty());
}

#[test]
fn test_soft_and_hard_delete() {
    let mut pool = pool_with_users();
    scan(&mut pool, "bob", "2025-09-01T09:00:00+02:00").expect("scan");

    soft_delete_user(&pool.conn, "ana").expect("soft delete");
    let active: Vec<String> = load_users(&pool.conn).expect("users").into_iter().map(|u| u.id).collect();
    assert_eq!(active, vec!["bob".to_string()]);
    assert_eq!(load_all_users(&pool.conn).expect("all users").len(), 2);
    assert!(require_user(&pool.conn, "ana").expect("ana").deleted_at.is_some());

    hard_delete_user(&mut pool.conn, "bob").expect("hard delete");
    assert!(load_user(&pool.conn, "bob").expect("load").is_none());
    assert!(load_events(&pool.conn, Some("bob")).expect("events").is_empty());

    assert!(matches!(
        hard_delete_user(&mut pool.conn, "bob"),
        Err(AppError::UserNotFound(_))
    ));
}

#[test]
fn test_events_are_loaded_newest_first_across_offsets() {
    let pool = pool_with_users();
    // text order differs from time order
    for at in [
        "2025-09-01T10:00:00+02:00", // 08:00Z
        "2025-09-01T09:00:00+00:00", // 09:00Z
        "2025-09-01T07:30:00+00:00", // 07:30Z
    ] {
        let ev = Event::new(
            "ana",
            "Ana Ruiz",
            parse_timestamp(at).expect("valid ts"),
            EventType::In,
            "Office-1",
        );
        insert_event(&pool.conn, &ev).expect("insert event");
    }

    let times: Vec<String> = load_events(&pool.conn, Some("ana"))
        .expect("events")
        .iter()
        .map(|e| e.timestamp_str())
        .collect();
    assert_eq!(
        times,
        vec![
            "2025-09-01T09:00:00+00:00",
            "2025-09-01T10:00:00+02:00",
            "2025-09-01T07:30:00+00:00",
        ]
    );

    assert!(load_events(&pool.conn, Some("bob")).expect("events").is_empty());
    assert_eq!(load_events(&pool.conn, None).expect("events").len(), 3);
}

#[test]
fn test_scan_in_out_then_day_completed() {
    let mut pool = pool_with_users();

    let first = scan(&mut pool, "ana", "2025-09-01T09:00:00+02:00").expect("in");
    assert_eq!(first.kind, EventType::In);
    assert!(first.id > 0);

    let second = scan(&mut pool, "ana", "2025-09-01T17:30:00+02:00").expect("out");
    assert_eq!(second.kind, EventType::Out);

    let third = scan(&mut pool, "ana", "2025-09-01T18:00:00+02:00");
    assert!(matches!(third, Err(AppError::DayCompleted(_))));

    let next_day = scan(&mut pool, "ana", "2025-09-02T08:00:00+02:00").expect("next day");
    assert_eq!(next_day.kind, EventType::In);

    let log = load_log(&pool.conn).expect("log");
    assert_eq!(log.iter().filter(|l| l.operation == "scan").count(), 3);
}

#[test]
fn test_out_scanned_at_same_instant_leaves_user_inactive() {
    let mut pool = pool_with_users();

    let at = "2025-09-01T09:00:00+02:00";
    scan(&mut pool, "ana", at).expect("in");
    let out = scan(&mut pool, "ana", at).expect("out");
    assert_eq!(out.kind, EventType::Out);

    let user = load_user(&pool.conn, "ana").expect("load").expect("ana exists");
    let events = load_events(&pool.conn, Some("ana")).expect("events");
    assert_eq!(employee_status(&user, &events, &[], d("2025-09-01")), EmployeeStatus::Inactive);
}

#[test]
fn test_scan_rejections() {
    let mut pool = pool_with_users();

    assert!(matches!(
        scan(&mut pool, "ghost", "2025-09-01T09:00:00+02:00"),
        Err(AppError::UserNotFound(_))
    ));

    let empty = ScanLogic::apply(
        &mut pool,
        "ana",
        "  ",
        parse_timestamp("2025-09-01T09:00:00+02:00").expect("valid ts"),
    );
    assert!(matches!(empty, Err(AppError::InvalidValue(_))));

    soft_delete_user(&pool.conn, "ana").expect("soft delete");
    assert!(matches!(
        scan(&mut pool, "ana", "2025-09-01T09:00:00+02:00"),
        Err(AppError::UserDeleted(_))
    ));
}

#[test]
fn test_absence_store() {
    let pool = pool_with_users();

    let sick = insert_absence(
        &pool.conn,
        &Absence::new("ana", d("2025-09-02"), "Sick leave", Some("ignored")),
    )
    .expect("sick");
    insert_absence(
        &pool.conn,
        &Absence::new("ana", d("2025-09-05"), "Other", Some("Moving house")),
    )
    .expect("other");
    insert_absence(&pool.conn, &Absence::new("bob", d("2025-09-02"), "Training", None))
        .expect("bob");

    let ana = load_absences(&pool.conn, Some("ana")).expect("absences");
    assert_eq!(ana.len(), 2);
    assert_eq!(ana[0].date, d("2025-09-05"));
    assert_eq!(ana[0].display_reason(), "Moving house");
    assert_eq!(ana[1].custom_reason, None);

    assert_eq!(load_absences_by_date(&pool.conn, &d("2025-09-02")).expect("by date").len(), 2);

    delete_absence(&pool.conn, sick).expect("delete");
    assert!(matches!(
        delete_absence(&pool.conn, sick),
        Err(AppError::AbsenceNotFound(_))
    ));
    assert_eq!(load_absences(&pool.conn, None).expect("all").len(), 2);
}

#[test]
fn test_company_assignment() {
    let pool = pool_with_users();
    insert_company(&pool.conn, &Company::new("acme", "Acme", "b12345678", Some("ana")))
        .expect("company");

    let companies = load_companies(&pool.conn).expect("companies");
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].tax_id, "B12345678");

    assign_company(&pool.conn, "bob", Some("acme")).expect("assign");
    assert_eq!(
        require_user(&pool.conn, "bob").expect("bob").company_id.as_deref(),
        Some("acme")
    );

    assert!(matches!(
        assign_company(&pool.conn, "bob", Some("nope")),
        Err(AppError::CompanyNotFound(_))
    ));

    assign_company(&pool.conn, "bob", None).expect("detach");
    assert!(require_user(&pool.conn, "bob").expect("bob").company_id.is_none());
}

#[test]
fn test_internal_log_newest_first() {
    let pool = pool_with_users();
    ttlog(&pool.conn, "first", "ana", "one").expect("log");
    ttlog(&pool.conn, "second", "bob", "two").expect("log");

    let lines = load_log(&pool.conn).expect("log");
    assert_eq!(lines[0].operation, "second");
    assert_eq!(lines[1].target, "ana");
}

#[test]
fn test_config_defaults_for_missing_fields() {
    let cfg = Config::from_yaml("database: /tmp/x.sqlite\n").expect("parse config");
    assert_eq!(cfg.database, "/tmp/x.sqlite");
    assert_eq!(cfg.default_location, "Office-1");
    assert_eq!(cfg.default_weekly_hours, 40.0);
    assert_eq!(cfg.default_working_days, 5);
    assert_eq!(cfg.default_vacation_days, 30);

    assert!(matches!(Config::from_yaml("database: [1, 2"), Err(AppError::Config(_))));
}
