mod common;
use common::{attendance_workbook, cells, hours_workbook, roster, today};
use rollcall::backend::{LocalWorkbook, Role, SheetBackend};
use rollcall::config::{AttendanceConfig, HoursConfig, WriteMode};
use rollcall::core::attendance::AttendanceLogic;
use rollcall::core::context::Context;
use rollcall::core::hours::{HoursLogic, HoursOutcome, detail_title};
use rollcall::errors::AppError;

const HEADER: [&str; 6] = ["Name", "1-1-20", "12-31-30", "A", "E", "P"];

fn overview_rows(root: &std::path::Path) -> Vec<Vec<String>> {
    let wb = LocalWorkbook::new(root);
    let sheet = wb.open_required("NHS Attendance (Responses)").unwrap();
    wb.read_rows(&sheet, "Overview").unwrap()
}

#[test]
fn test_member_without_responses_is_written_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = attendance_workbook(dir.path(), &HEADER, &[]);
    let mut ctx = Context::new(Box::new(wb), today());

    AttendanceLogic::sync(
        &mut ctx,
        &AttendanceConfig::default(),
        &roster(&[("a@x.edu", "Alice")]),
    )
    .unwrap();

    assert_eq!(
        overview_rows(dir.path()),
        vec![cells(&HEADER), cells(&["Alice", "A", "", "1", "0", "0"])]
    );
}

#[test]
fn test_responses_land_in_sorted_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = attendance_workbook(
        dir.path(),
        &HEADER,
        &[
            &["t1", "b@x.edu", "1-1-20", "P"],
            &["t2", "a@x.edu", "1-1-20", "P"],
            &["t3", "a@x.edu", "1-1-20", "E"],
        ],
    );
    let mut ctx = Context::new(Box::new(wb), today());

    AttendanceLogic::sync(
        &mut ctx,
        &AttendanceConfig::default(),
        &roster(&[("b@x.edu", "Bob"), ("a@x.edu", "Alice")]),
    )
    .unwrap();

    let rows = overview_rows(dir.path());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], cells(&["Alice", "E", "", "0", "1", "0"]));
    assert_eq!(rows[2], cells(&["Bob", "P", "", "0", "0", "1"]));
}

#[test]
fn test_zero_members_leave_header_and_one_blank_row() {
    let dir = tempfile::tempdir().unwrap();
    let (mut wb, sheet) = attendance_workbook(dir.path(), &HEADER, &[]);
    // stale rows from an earlier run
    wb.write_range(
        &sheet,
        "Overview",
        2,
        1,
        &[cells(&["Old", "P", "", "0", "0", "1"]), cells(&["Older"])],
    )
    .unwrap();
    let mut ctx = Context::new(Box::new(wb), today());

    let overview =
        AttendanceLogic::sync(&mut ctx, &AttendanceConfig::default(), &roster(&[])).unwrap();

    assert!(overview.records.is_empty());
    let rows = overview_rows(dir.path());
    assert_eq!(rows.len(), 2);
    assert!(rows[1].iter().all(String::is_empty));
}

#[test]
fn test_sync_shrinks_overview_to_member_count() {
    let dir = tempfile::tempdir().unwrap();
    let (mut wb, sheet) = attendance_workbook(dir.path(), &HEADER, &[]);
    wb.resize_rows(&sheet, "Overview", 10).unwrap();
    let mut ctx = Context::new(Box::new(wb), today());

    AttendanceLogic::sync(
        &mut ctx,
        &AttendanceConfig::default(),
        &roster(&[("a@x.edu", "Alice"), ("b@x.edu", "Bob")]),
    )
    .unwrap();

    assert_eq!(overview_rows(dir.path()).len(), 3);
}

#[test]
fn test_per_cell_mode_matches_batch_mode() {
    let responses: [&[&str]; 2] = [
        &["t1", "a@x.edu", "12-31-30", "E"],
        &["t2", "b@x.edu", "1-1-20", "Present"],
    ];
    let members = roster(&[("a@x.edu", "Alice"), ("b@x.edu", "Bob")]);

    let mut results = Vec::new();
    for mode in [WriteMode::Batch, WriteMode::PerCell] {
        let dir = tempfile::tempdir().unwrap();
        let (wb, _) = attendance_workbook(dir.path(), &HEADER, &responses);
        let mut ctx = Context::new(Box::new(wb), today());
        let cfg = AttendanceConfig {
            write_mode: mode,
            ..AttendanceConfig::default()
        };

        AttendanceLogic::sync(&mut ctx, &cfg, &members).unwrap();
        results.push(overview_rows(dir.path()));
    }

    assert_eq!(results[0], results[1]);
}

#[test]
fn test_repeated_sync_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = attendance_workbook(dir.path(), &HEADER, &[&["t", "a@x.edu", "1-1-20", "P"]]);
    let mut ctx = Context::new(Box::new(wb), today());
    let members = roster(&[("a@x.edu", "Alice")]);

    AttendanceLogic::sync(&mut ctx, &AttendanceConfig::default(), &members).unwrap();
    let first = overview_rows(dir.path());
    AttendanceLogic::sync(&mut ctx, &AttendanceConfig::default(), &members).unwrap();

    assert_eq!(first, overview_rows(dir.path()));
}

#[test]
fn test_unknown_responder_leaves_overview_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = attendance_workbook(dir.path(), &HEADER, &[&["t", "z@x.edu", "1-1-20", "P"]]);
    let mut ctx = Context::new(Box::new(wb), today());

    let err = AttendanceLogic::sync(
        &mut ctx,
        &AttendanceConfig::default(),
        &roster(&[("a@x.edu", "Alice")]),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::UnknownIdentity(_)));
    assert_eq!(overview_rows(dir.path()), vec![cells(&HEADER)]);
}

#[test]
fn test_offline_workbook_surfaces_as_offline() {
    let dir = tempfile::tempdir().unwrap();
    let wb = LocalWorkbook::new(dir.path().join("missing"));
    let mut ctx = Context::new(Box::new(wb), today());

    let err = AttendanceLogic::sync(&mut ctx, &AttendanceConfig::default(), &roster(&[]))
        .unwrap_err();
    assert!(matches!(err, AppError::Offline));
}

fn hours_cfg() -> HoursConfig {
    HoursConfig {
        admin_emails: vec!["advisor@x.edu".to_string()],
        ..HoursConfig::default()
    }
}

const HOURS_ROWS: [&[&str]; 3] = [
    &["t1", "a@x.edu", "In Hours", "10/1/2026", "Food drive", "3", "Ms. Lee", "p1.jpg"],
    &["t2", "a@x.edu", "Out Hours", "10/2/2026", "Park cleanup", "12", "Mr. Kim", "p2.jpg"],
    &["t3", "b@x.edu", "In Hours", "10/3/2026", "Tutoring", "1.5", "Ms. Lee", "p3.jpg"],
];

#[test]
fn test_hours_sync_creates_shared_detail_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = hours_workbook(dir.path(), &HOURS_ROWS);
    let mut ctx = Context::new(Box::new(wb), today());
    let members = roster(&[("a@x.edu", "Alice Adams"), ("b@x.edu", "Bob Brown")]);

    let (cfg, outcome) = HoursLogic::sync(&mut ctx, hours_cfg(), &members).unwrap();

    assert_eq!(cfg.last_checked_entries, 3);
    let HoursOutcome::Updated { processed, records } = outcome else {
        panic!("expected an update");
    };
    assert_eq!(processed, 3);
    assert_eq!(records.len(), 2);

    let wb = LocalWorkbook::new(dir.path());
    let alice = wb
        .open_required(&detail_title(&cfg, "Alice Adams"))
        .unwrap();
    assert_eq!(alice.title, "Alice Adams's Hours");

    let grants = wb.permissions(&alice).unwrap();
    assert_eq!(grants.len(), 2);
    assert_eq!(grants[0].email, "a@x.edu");
    assert_eq!(grants[0].role, Role::Reader);
    assert!(grants[0].notify);
    assert!(grants[0].message.as_deref().unwrap().starts_with("Hi Alice,"));
    assert_eq!(grants[1].email, "advisor@x.edu");
    assert!(!grants[1].notify);

    let in_rows = wb.read_rows(&alice, "In Hours").unwrap();
    assert_eq!(
        in_rows[1],
        cells(&["10/1/2026", "Food drive", "3", "Ms. Lee", "p1.jpg"])
    );
    let out_rows = wb.read_rows(&alice, "Out Hours").unwrap();
    assert_eq!(out_rows[1][1], "Park cleanup");

    let detail_overview = wb.read_rows(&alice, "Overview").unwrap();
    assert_eq!(
        detail_overview[2],
        cells(&["a@x.edu", "Alice Adams", "3", "7", "12", "0"])
    );

    let responses = wb.open_required("NHS Hour Submission (Responses)").unwrap();
    let overview = wb.read_rows(&responses, "Overview").unwrap();
    assert_eq!(overview.len(), 4);
    assert_eq!(&overview[2][..6], &cells(&["a@x.edu", "Alice Adams", "3", "7", "12", "0"])[..]);
    assert!(overview[2][6].ends_with(&alice.id));
    assert_eq!(&overview[3][..6], &cells(&["b@x.edu", "Bob Brown", "1.5", "8.5", "0", "10"])[..]);
}

#[test]
fn test_hours_sync_skips_when_nothing_new() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = hours_workbook(dir.path(), &HOURS_ROWS);
    let mut ctx = Context::new(Box::new(wb), today());
    let members = roster(&[("a@x.edu", "Alice Adams"), ("b@x.edu", "Bob Brown")]);

    let (cfg, _) = HoursLogic::sync(&mut ctx, hours_cfg(), &members).unwrap();
    let (cfg, outcome) = HoursLogic::sync(&mut ctx, cfg, &members).unwrap();

    assert_eq!(outcome, HoursOutcome::NoNewEntries { seen: 3 });
    assert_eq!(cfg.last_checked_entries, 3);
}

#[test]
fn test_hours_sync_reuses_existing_detail_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let (wb, _) = hours_workbook(dir.path(), &HOURS_ROWS[..1]);
    let mut ctx = Context::new(Box::new(wb), today());
    let members = roster(&[("a@x.edu", "Alice Adams")]);

    let (mut cfg, _) = HoursLogic::sync(&mut ctx, hours_cfg(), &members).unwrap();
    // force a second full pass
    cfg.last_checked_entries = 0;
    HoursLogic::sync(&mut ctx, cfg, &members).unwrap();

    let wb = LocalWorkbook::new(dir.path());
    let copies = wb
        .list_spreadsheets()
        .unwrap()
        .into_iter()
        .filter(|s| s.title == "Alice Adams's Hours")
        .count();
    assert_eq!(copies, 1);
}
