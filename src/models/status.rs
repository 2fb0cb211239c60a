use clap::ValueEnum;
use serde::Serialize;

/// Attendance status recorded for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
pub enum Status {
    Present,
    Excused,
    Absent,
}

impl Status {
    /// Every status, in the order the summary columns are counted.
    pub const ALL: [Status; 3] = [Status::Absent, Status::Excused, Status::Present];

    pub fn code(&self) -> &'static str {
        match self {
            Status::Present => "P",
            Status::Excused => "E",
            Status::Absent => "A",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Excused => "Excused",
            Status::Absent => "Absent",
        }
    }

    /// Accepts the one-letter code or the full word, case-insensitively.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "P" | "PRESENT" => Some(Status::Present),
            "E" | "EXCUSED" => Some(Status::Excused),
            "A" | "ABSENT" => Some(Status::Absent),
            _ => None,
        }
    }
}
