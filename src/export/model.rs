// src/export/model.rs

use crate::core::attendance::AttendanceOverview;
use serde_json::{Map, Value};

/// Flat table of the attendance overview: the sheet header plus one row per member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverviewTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl From<&AttendanceOverview> for OverviewTable {
    fn from(overview: &AttendanceOverview) -> Self {
        Self {
            headers: overview.header.clone(),
            rows: overview.rows(),
        }
    }
}

impl OverviewTable {
    /// Rows as JSON objects keyed by column title.
    pub(crate) fn to_objects(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }
}
