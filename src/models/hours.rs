use serde::Serialize;

/// The two independently tracked hour categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoursKind {
    In,
    Out,
}

impl HoursKind {
    /// Name of the detail worksheet holding entries of this kind.
    pub fn worksheet(&self) -> &'static str {
        match self {
            HoursKind::In => "In Hours",
            HoursKind::Out => "Out Hours",
        }
    }
}

/// One logged service activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursEntry {
    pub date: String,
    pub task: String,
    pub hours: f64,
    pub contact: String,
    pub photo: String,
}

impl HoursEntry {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.task.clone(),
            format_hours(self.hours),
            self.contact.clone(),
            self.photo.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursBucket {
    pub required: f64,
    pub total: f64,
    pub entries: Vec<HoursEntry>,
}

impl HoursBucket {
    pub fn new(required: f64) -> Self {
        Self {
            required,
            total: 0.0,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: HoursEntry) {
        self.total += entry.hours;
        self.entries.push(entry);
    }

    /// Hours still missing to meet the requirement, never negative.
    pub fn remaining(&self) -> f64 {
        (self.required - self.total).max(0.0)
    }
}

/// Volunteer hours of one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursRecord {
    pub email: String,
    pub name: String,
    pub in_hours: HoursBucket,
    pub out_hours: HoursBucket,
}

impl HoursRecord {
    pub fn new(email: &str, name: &str, required_in: f64, required_out: f64) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            in_hours: HoursBucket::new(required_in),
            out_hours: HoursBucket::new(required_out),
        }
    }

    pub fn bucket(&self, kind: HoursKind) -> &HoursBucket {
        match kind {
            HoursKind::In => &self.in_hours,
            HoursKind::Out => &self.out_hours,
        }
    }

    pub fn bucket_mut(&mut self, kind: HoursKind) -> &mut HoursBucket {
        match kind {
            HoursKind::In => &mut self.in_hours,
            HoursKind::Out => &mut self.out_hours,
        }
    }

    /// Summary row: email, name, in total, in remaining, out total, out remaining.
    pub fn summary_row(&self) -> Vec<String> {
        vec![
            self.email.clone(),
            self.name.clone(),
            format_hours(self.in_hours.total),
            format_hours(self.in_hours.remaining()),
            format_hours(self.out_hours.total),
            format_hours(self.out_hours.remaining()),
        ]
    }
}

/// Whole hours print without a fractional part.
pub fn format_hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
