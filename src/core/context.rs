use crate::backend::SheetBackend;
use chrono::NaiveDate;

/// Per-run collaborators, built once and handed to every component.
pub struct Context {
    pub backend: Box<dyn SheetBackend>,
    /// Reference date for past/future session classification
    pub today: NaiveDate,
}

impl Context {
    pub fn new(backend: Box<dyn SheetBackend>, today: NaiveDate) -> Self {
        Self { backend, today }
    }
}
