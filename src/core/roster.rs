//! Roster loading and session classification.

use crate::config::{DateFormat, PastRule};
use crate::errors::AppResult;
use crate::models::identity::Identity;
use crate::models::session::{SessionKind, Slot};
use crate::models::status::Status;
use crate::ui::messages::warning;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub fn looks_like_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Known identities for one run: email → display name.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: HashMap<String, String>,
}

impl Roster {
    /// Read a two-column `email,name` file. Lines whose first column is not
    /// an email address (such as a header line) are skipped with a warning.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut names = HashMap::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let email = record.get(0).unwrap_or("");
            let name = record.get(1).unwrap_or("");

            if email.is_empty() {
                continue;
            }
            if !looks_like_email(email) {
                warning(format!(
                    "{}:{}: skipping '{}' (not an email address)",
                    path.display(),
                    line + 1,
                    email
                ));
                continue;
            }
            names.insert(email.to_string(), name.to_string());
        }

        Ok(Self { names })
    }

    pub fn from_identities<I: IntoIterator<Item = Identity>>(identities: I) -> Self {
        Self {
            names: identities.into_iter().map(|i| (i.email, i.name)).collect(),
        }
    }

    pub fn name_of(&self, email: &str) -> Option<&str> {
        self.names.get(email).map(String::as_str)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.names.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every identity, sorted by display name then email.
    pub fn identities(&self) -> Vec<Identity> {
        let mut all: Vec<Identity> = self
            .names
            .iter()
            .map(|(email, name)| Identity::new(email, name))
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
        all
    }
}

/// Decide whether a header cell names a dated session.
///
/// Dashed headers (`M-D-YY`) take their century from `today`; a year token
/// longer than two digits is read as a full year.
pub fn classify_header(label: &str, format: DateFormat, today: NaiveDate) -> SessionKind {
    let separator = match format {
        DateFormat::Dashed => '-',
        DateFormat::Slashed => '/',
    };

    let parts: Vec<&str> = label.trim().split(separator).collect();
    let [month, day, year] = parts.as_slice() else {
        return SessionKind::NotASession;
    };
    let all_digits = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    if ![*month, *day, *year].into_iter().all(all_digits) {
        return SessionKind::NotASession;
    }

    let numbers = (
        month.parse::<u32>().ok(),
        day.parse::<u32>().ok(),
        year.parse::<i32>().ok(),
    );
    let (Some(month), Some(day), Some(mut full_year)) = numbers else {
        return SessionKind::NotASession;
    };

    if format == DateFormat::Dashed && year.len() <= 2 {
        full_year += today.year() - today.year() % 100;
    }

    match NaiveDate::from_ymd_opt(full_year, month, day) {
        Some(date) => SessionKind::Session { date },
        None => SessionKind::NotASession,
    }
}

/// Known sessions of the overview sheet with their default values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPlan {
    defaults: Vec<(String, Slot)>,
}

impl SessionPlan {
    /// Build the plan from the overview header row. The first cell is the
    /// name column and never a session.
    pub fn from_header(
        header: &[String],
        format: DateFormat,
        past_rule: PastRule,
        today: NaiveDate,
    ) -> Self {
        let mut defaults: Vec<(String, Slot)> = Vec::new();

        for label in header.iter().skip(1) {
            let SessionKind::Session { date } = classify_header(label, format, today) else {
                continue;
            };
            if defaults.iter().any(|(l, _)| l == label) {
                continue;
            }

            let held = match past_rule {
                PastRule::OnOrBeforeToday => date <= today,
                PastRule::BeforeToday => date < today,
            };
            let slot = if held {
                Slot::Status(Status::Absent)
            } else {
                Slot::Blank
            };
            defaults.push((label.clone(), slot));
        }

        Self { defaults }
    }

    /// Fresh copy of the default slots for a new record.
    pub fn default_slots(&self) -> Vec<(String, Slot)> {
        self.defaults.clone()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.defaults.iter().any(|(l, _)| l == label)
    }

    /// Header label of the session a response names, ignoring surrounding blanks.
    pub fn label_for(&self, session: &str) -> Option<&str> {
        let session = session.trim();
        self.defaults
            .iter()
            .map(|(l, _)| l.as_str())
            .find(|l| l.trim() == session)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Number of sessions that default to Absent.
    pub fn past_count(&self) -> usize {
        self.defaults
            .iter()
            .filter(|(_, slot)| *slot == Slot::Status(Status::Absent))
            .count()
    }
}
