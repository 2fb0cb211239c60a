use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

/// Classification of a header cell of the overview sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Session { date: NaiveDate },
    NotASession,
}

/// Value held by a record for one session column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Slot {
    Blank,
    Status(Status),
    /// Reported text that is not a known status code; kept verbatim.
    Other(String),
}

impl Slot {
    /// Interpret a reported value: known codes become a status, empty text a blank.
    pub fn from_reported(value: &str) -> Self {
        if value.trim().is_empty() {
            return Slot::Blank;
        }
        match Status::from_code(value) {
            Some(status) => Slot::Status(status),
            None => Slot::Other(value.to_string()),
        }
    }

    pub fn status(&self) -> Option<Status> {
        match self {
            Slot::Status(s) => Some(*s),
            _ => None,
        }
    }

    /// Cell text written to the sheet.
    pub fn as_cell(&self) -> String {
        match self {
            Slot::Blank => String::new(),
            Slot::Status(s) => s.code().to_string(),
            Slot::Other(text) => text.clone(),
        }
    }
}
