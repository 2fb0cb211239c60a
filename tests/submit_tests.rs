mod common;
use chrono::NaiveDate;
use common::{FakeSubmitter, roster};
use rollcall::config::FormConfig;
use rollcall::core::submit::{
    HttpFormSubmitter, Overflow, SubmitOutcome, Submission, form_fields, submit_or_defer,
};
use rollcall::core::take::{Intake, TakeLogic, TakeSummary, prompt_known_email};
use rollcall::errors::AppError;
use rollcall::models::status::Status;
use std::fs;
use std::io::Cursor;
use std::sync::atomic::AtomicBool;

fn submission(email: &str) -> Submission {
    Submission {
        email: email.to_string(),
        status: Status::Present,
        date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
    }
}

fn form() -> FormConfig {
    FormConfig {
        form_id: "abc123".into(),
        email_field: "entry.1".into(),
        status_field: "entry.2".into(),
        date_field: "entry.3".into(),
        ..FormConfig::default()
    }
}

#[test]
fn test_form_fields_split_the_date() {
    let fields = form_fields(&form(), &submission("a@x.edu"));

    let expected: Vec<(String, String)> = [
        ("entry.1", "a@x.edu"),
        ("entry.2", "P"),
        ("entry.3_year", "2026"),
        ("entry.3_month", "10"),
        ("entry.3_day", "17"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(fields, expected);
}

#[test]
fn test_form_url_substitutes_form_id() {
    assert_eq!(
        form().url(),
        "https://docs.google.com/forms/d/e/abc123/formResponse"
    );
}

#[test]
fn test_http_submitter_requires_form_id() {
    let result = HttpFormSubmitter::new(FormConfig::default());
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_accepted_submission_skips_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let overflow = Overflow::new(dir.path().join("overflow.csv"));
    let submitter = FakeSubmitter::answering(200);

    let outcome = submit_or_defer(&submitter, &overflow, &submission("a@x.edu")).unwrap();

    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(!overflow.path().exists());
}

#[test]
fn test_server_error_is_appended_to_overflow() {
    let dir = tempfile::tempdir().unwrap();
    let overflow = Overflow::new(dir.path().join("overflow.csv"));
    let submitter = FakeSubmitter::answering(500);

    let first = submit_or_defer(&submitter, &overflow, &submission("a@x.edu")).unwrap();
    submit_or_defer(&submitter, &overflow, &submission("b@x.edu")).unwrap();

    assert_eq!(
        first,
        SubmitOutcome::Deferred {
            reason: "HTTP 500".into()
        }
    );

    let content = fs::read_to_string(overflow.path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "recorded_at,email,status,date,reason");
    assert!(lines[1].ends_with(",a@x.edu,P,2026-10-17,HTTP 500"));
    assert!(lines[2].contains("b@x.edu"));
}

#[test]
fn test_transport_failure_is_deferred() {
    let dir = tempfile::tempdir().unwrap();
    let overflow = Overflow::new(dir.path().join("nested").join("overflow.csv"));
    let submitter = FakeSubmitter::unreachable();

    let outcome = submit_or_defer(&submitter, &overflow, &submission("a@x.edu")).unwrap();

    assert!(matches!(outcome, SubmitOutcome::Deferred { ref reason } if reason.contains("connection refused")));
    assert!(overflow.path().exists());
}

#[test]
fn test_prompt_repeats_until_known_email() {
    let members = roster(&[("a@x.edu", "Alice")]);
    let mut input = Cursor::new("nobody@x.edu\n  a@x.edu  \n");

    let stop = AtomicBool::new(false);

    let email = prompt_known_email(&mut input, &members, "Email: ", &stop).unwrap();
    assert_eq!(email.as_deref(), Some("a@x.edu"));
}

#[test]
fn test_prompt_ends_on_blank_line_or_eof() {
    let members = roster(&[("a@x.edu", "Alice")]);

    let stop = AtomicBool::new(false);

    let mut blank = Cursor::new("\na@x.edu\n");
    assert_eq!(prompt_known_email(&mut blank, &members, "> ", &stop).unwrap(), None);

    let mut eof = Cursor::new("");
    assert_eq!(prompt_known_email(&mut eof, &members, "> ", &stop).unwrap(), None);
}

#[test]
fn test_manual_entry_keeps_going_after_failed_submission() {
    let dir = tempfile::tempdir().unwrap();
    let members = roster(&[("a@x.edu", "Alice"), ("b@x.edu", "Bob")]);
    let overflow = Overflow::new(dir.path().join("overflow.csv"));
    let submitter = FakeSubmitter::answering(500);
    let intake = Intake {
        roster: &members,
        submitter: &submitter,
        overflow: &overflow,
        stop: &AtomicBool::new(false),
    };
    let mut input = Cursor::new("a@x.edu\nstranger@x.edu\nb@x.edu\n\n");

    let summary = TakeLogic::manual(
        &intake,
        &mut input,
        Status::Excused,
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
    )
    .unwrap();

    assert_eq!(
        summary,
        TakeSummary {
            submitted: 0,
            deferred: 2
        }
    );
    let sent = submitter.sent.borrow();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|s| s.status == Status::Excused));
    assert_eq!(sent[1].email, "b@x.edu");
}

#[test]
fn test_raised_stop_flag_ends_prompt_without_reading() {
    let members = roster(&[("a@x.edu", "Alice")]);
    let stop = AtomicBool::new(true);
    let mut input = Cursor::new("a@x.edu\n");

    assert_eq!(prompt_known_email(&mut input, &members, "> ", &stop).unwrap(), None);
    assert_eq!(input.position(), 0);
}

#[test]
fn test_interrupted_manual_entry_submits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let members = roster(&[("a@x.edu", "Alice")]);
    let overflow = Overflow::new(dir.path().join("overflow.csv"));
    let submitter = FakeSubmitter::answering(200);
    let stop = AtomicBool::new(true);
    let intake = Intake {
        roster: &members,
        submitter: &submitter,
        overflow: &overflow,
        stop: &stop,
    };
    let mut input = Cursor::new("a@x.edu\n");

    let summary = TakeLogic::manual(
        &intake,
        &mut input,
        Status::Present,
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
    )
    .unwrap();

    assert_eq!(summary, TakeSummary::default());
    assert!(submitter.sent.borrow().is_empty());
}
