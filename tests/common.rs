#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rollcall::backend::{LocalWorkbook, SpreadsheetRef};
use rollcall::core::roster::Roster;
use rollcall::core::submit::{FormSubmitter, Submission};
use rollcall::errors::{AppError, AppResult};
use rollcall::models::identity::Identity;
use std::cell::RefCell;
use std::fs;
use std::path::Path;

pub fn rc() -> Command {
    cargo_bin_cmd!("rollcall")
}

/// Fixed reference date so past/future classification is stable.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

pub fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter().map(|r| cells(r)).collect()
}

pub fn roster(members: &[(&str, &str)]) -> Roster {
    Roster::from_identities(members.iter().map(|(e, n)| Identity::new(*e, *n)))
}

pub fn write_people(path: &Path, members: &[(&str, &str)]) {
    let body: String = members
        .iter()
        .map(|(email, name)| format!("{email},{name}\n"))
        .collect();
    fs::write(path, body).expect("write people file");
}

/// Workbook with an attendance spreadsheet: overview header + responses.
pub fn attendance_workbook(
    root: &Path,
    header: &[&str],
    responses: &[&[&str]],
) -> (LocalWorkbook, SpreadsheetRef) {
    let mut wb = LocalWorkbook::new(root);
    let sheet = wb
        .create_spreadsheet("NHS Attendance (Responses)")
        .expect("create attendance spreadsheet");

    wb.put_worksheet(&sheet, "Overview", &[cells(header)])
        .expect("overview");

    let mut rows = vec![cells(&["Timestamp", "Student Email", "Date", "State"])];
    rows.extend(responses.iter().map(|r| cells(r)));
    wb.put_worksheet(&sheet, "Responses", &rows)
        .expect("responses");

    (wb, sheet)
}

pub const HOURS_HEADER: [&str; 8] = [
    "Timestamp",
    "Email Address",
    "Type of Hours",
    "Date of Service",
    "Task/Type of Service",
    "Number of Service Hours",
    "Contact of Service Supervisor",
    "Photo of Signed Hour Sheet",
];

/// Workbook with the hours responses spreadsheet and the detail template.
pub fn hours_workbook(root: &Path, responses: &[&[&str]]) -> (LocalWorkbook, SpreadsheetRef) {
    let mut wb = LocalWorkbook::new(root);
    let sheet = wb
        .create_spreadsheet("NHS Hour Submission (Responses)")
        .expect("create hours spreadsheet");

    let mut rows = vec![cells(&HOURS_HEADER)];
    rows.extend(responses.iter().map(|r| cells(r)));
    wb.put_worksheet(&sheet, "Responses", &rows).expect("responses");
    wb.put_worksheet(
        &sheet,
        "Overview",
        &grid(&[
            &["Volunteer hours"],
            &["Email", "Name", "In", "In left", "Out", "Out left", "Sheet"],
        ]),
    )
    .expect("overview");

    let template = wb.create_spreadsheet("Template").expect("template");
    let entry_header = cells(&["Date", "Task", "Hours", "Contact", "Photo"]);
    wb.put_worksheet(&template, "In Hours", &[entry_header.clone()])
        .expect("in hours");
    wb.put_worksheet(&template, "Out Hours", &[entry_header])
        .expect("out hours");
    wb.put_worksheet(
        &template,
        "Overview",
        &grid(&[
            &["My hours"],
            &["Email", "Name", "In", "In left", "Out", "Out left"],
        ]),
    )
    .expect("template overview");

    (wb, sheet)
}

/// Form submitter that answers with canned status codes and records calls.
pub struct FakeSubmitter {
    pub status: u16,
    pub unreachable: bool,
    pub sent: RefCell<Vec<Submission>>,
}

impl FakeSubmitter {
    pub fn answering(status: u16) -> Self {
        Self {
            status,
            unreachable: false,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            status: 0,
            unreachable: true,
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl FormSubmitter for FakeSubmitter {
    fn submit(&self, submission: &Submission) -> AppResult<u16> {
        self.sent.borrow_mut().push(submission.clone());
        if self.unreachable {
            return Err(AppError::Submission("connection refused".into()));
        }
        Ok(self.status)
    }
}
