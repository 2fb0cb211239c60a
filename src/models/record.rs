use super::session::Slot;
use super::status::Status;
use serde::Serialize;

/// Number of sessions per status for one member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub present: usize,
    pub excused: usize,
    pub absent: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Present => self.present,
            Status::Excused => self.excused,
            Status::Absent => self.absent,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.excused + self.absent
    }

    fn bump(&mut self, status: Status) {
        match status {
            Status::Present => self.present += 1,
            Status::Excused => self.excused += 1,
            Status::Absent => self.absent += 1,
        }
    }
}

/// Aggregated attendance of one member across every known session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub email: String,
    pub name: String,
    /// Session label and value, in header order
    pub slots: Vec<(String, Slot)>,
    pub counts: StatusCounts,
}

impl AttendanceRecord {
    pub fn new(email: &str, name: &str, slots: Vec<(String, Slot)>) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            slots,
            counts: StatusCounts::default(),
        }
    }

    pub fn slot(&self, label: &str) -> Option<&Slot> {
        self.slots.iter().find(|(l, _)| l == label).map(|(_, s)| s)
    }

    /// Overwrite the slot of a known session. Returns false for unknown labels.
    pub fn set_slot(&mut self, label: &str, value: Slot) -> bool {
        match self.slots.iter_mut().find(|(l, _)| l == label) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Recount statuses from the current slots.
    pub fn finalize(&mut self) {
        let mut counts = StatusCounts::default();
        for status in self.slots.iter().filter_map(|(_, s)| s.status()) {
            counts.bump(status);
        }
        self.counts = counts;
    }

    /// Cell text for the overview column titled `key`, if the record has one.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "Name" => return Some(self.name.clone()),
            "Email" | "Email Address" | "Student Email" => return Some(self.email.clone()),
            _ => {}
        }

        if let Some(slot) = self.slot(key) {
            return Some(slot.as_cell());
        }

        Status::ALL
            .iter()
            .find(|s| s.code() == key)
            .map(|s| self.counts.get(*s).to_string())
    }
}
