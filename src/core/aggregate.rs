//! Folding raw response rows into one record per member.

use crate::config::{AttendanceConfig, HoursColumns};
use crate::core::roster::{Roster, SessionPlan};
use crate::errors::{AppError, AppResult};
use crate::models::hours::{HoursEntry, HoursKind, HoursRecord};
use crate::models::record::AttendanceRecord;
use crate::models::response::ResponseRow;
use crate::models::session::Slot;
use std::collections::HashMap;

/// Column titles the attendance aggregation reads from each response.
#[derive(Debug, Clone)]
pub struct AttendanceColumns {
    pub email: String,
    pub date: String,
    pub status: String,
}

impl From<&AttendanceConfig> for AttendanceColumns {
    fn from(cfg: &AttendanceConfig) -> Self {
        Self {
            email: cfg.email_column.clone(),
            date: cfg.date_column.clone(),
            status: cfg.status_column.clone(),
        }
    }
}

fn required<'a>(row: &'a ResponseRow, column: &str) -> AppResult<&'a str> {
    row.get(column)
        .map(str::trim)
        .ok_or_else(|| AppError::MissingColumn(column.to_string()))
}

/// Build one attendance record per member.
///
/// With `include_roster`, every roster member gets a record even without a
/// single response. A responder missing from the roster aborts with
/// [`AppError::UnknownIdentity`]. When a member reports the same session
/// twice, the later row wins.
pub fn aggregate_attendance(
    rows: &[ResponseRow],
    roster: &Roster,
    plan: &SessionPlan,
    columns: &AttendanceColumns,
    include_roster: bool,
) -> AppResult<Vec<AttendanceRecord>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<AttendanceRecord> = Vec::new();

    if include_roster {
        for identity in roster.identities() {
            index.insert(identity.email.clone(), records.len());
            records.push(AttendanceRecord::new(
                &identity.email,
                &identity.name,
                plan.default_slots(),
            ));
        }
    }

    for row in rows {
        let email = required(row, &columns.email)?;
        let session = required(row, &columns.date)?;
        let status = required(row, &columns.status)?;

        let position = match index.get(email) {
            Some(&i) => i,
            None => {
                let name = roster
                    .name_of(email)
                    .ok_or_else(|| AppError::UnknownIdentity(email.to_string()))?;
                index.insert(email.to_string(), records.len());
                records.push(AttendanceRecord::new(email, name, plan.default_slots()));
                records.len() - 1
            }
        };

        if let Some(label) = plan.label_for(session) {
            records[position].set_slot(label, Slot::from_reported(status));
        }
    }

    for record in records.iter_mut() {
        record.finalize();
    }
    records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));

    Ok(records)
}

/// Hour requirements applied to every member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Requirements {
    pub in_hours: f64,
    pub out_hours: f64,
}

fn parse_hours(email: &str, value: &str) -> AppResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| AppError::InvalidHours {
            email: email.to_string(),
            value: value.to_string(),
        })
}

/// Build one hours record per member that logged at least one activity.
///
/// Rows whose type column equals `columns.in_value` go to the In bucket,
/// every other row to the Out bucket. Members missing from the roster are
/// named by their email address.
pub fn aggregate_hours(
    rows: &[ResponseRow],
    roster: &Roster,
    columns: &HoursColumns,
    requirements: Requirements,
) -> AppResult<Vec<HoursRecord>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut records: Vec<HoursRecord> = Vec::new();

    for row in rows {
        let email = required(row, &columns.email)?;

        let position = match index.get(email) {
            Some(&i) => i,
            None => {
                let name = roster.name_of(email).unwrap_or(email);
                index.insert(email.to_string(), records.len());
                records.push(HoursRecord::new(
                    email,
                    name,
                    requirements.in_hours,
                    requirements.out_hours,
                ));
                records.len() - 1
            }
        };

        let kind = if row.value(&columns.kind).trim() == columns.in_value {
            HoursKind::In
        } else {
            HoursKind::Out
        };

        let entry = HoursEntry {
            date: row.value(&columns.date).to_string(),
            task: row.value(&columns.task).to_string(),
            hours: parse_hours(email, row.value(&columns.hours))?,
            contact: row.value(&columns.contact).to_string(),
            photo: row.value(&columns.photo).to_string(),
        };
        records[position].bucket_mut(kind).add(entry);
    }

    records.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
    Ok(records)
}
