//! Taking attendance: scanner loop and manual console entry.

use crate::core::roster::Roster;
use crate::core::scanner::{ScanReader, ScannerIds};
use crate::core::submit::{FormSubmitter, Overflow, SubmitOutcome, Submission, submit_or_defer};
use crate::errors::AppResult;
use crate::models::status::Status;
use crate::ui::messages::{info, success, warning};
use chrono::NaiveDate;
use std::io::{self, BufRead, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Counts of one intake session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TakeSummary {
    pub submitted: usize,
    pub deferred: usize,
}

impl TakeSummary {
    fn record(&mut self, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Submitted => self.submitted += 1,
            SubmitOutcome::Deferred { .. } => self.deferred += 1,
        }
    }
}

/// Ask for an email until a roster member is entered.
/// A blank line, end of input or a raised `stop` flag returns `None`.
pub fn prompt_known_email(
    input: &mut dyn BufRead,
    roster: &Roster,
    prompt: &str,
    stop: &AtomicBool,
) -> AppResult<Option<String>> {
    loop {
        if stop.load(Ordering::Relaxed) {
            return Ok(None);
        }
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = match input.read_line(&mut line) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => 0,
            Err(e) => return Err(e.into()),
        };
        if read == 0 || stop.load(Ordering::Relaxed) {
            return Ok(None);
        }

        let email = line.trim();
        if email.is_empty() {
            return Ok(None);
        }
        if roster.contains(email) {
            return Ok(Some(email.to_string()));
        }
        warning(format!("'{email}' is not on the roster, try again."));
    }
}

/// Submission sink shared by the intake loops.
pub struct Intake<'a> {
    pub roster: &'a Roster,
    pub submitter: &'a dyn FormSubmitter,
    pub overflow: &'a Overflow,
    /// Raised by Ctrl-C; the loops stop at the next input
    pub stop: &'a AtomicBool,
}

impl Intake<'_> {
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

impl Intake<'_> {
    fn mark(&self, email: &str, status: Status, date: NaiveDate) -> AppResult<SubmitOutcome> {
        let submission = Submission {
            email: email.to_string(),
            status,
            date,
        };
        let outcome = submit_or_defer(self.submitter, self.overflow, &submission)?;

        if outcome == SubmitOutcome::Submitted {
            let name = self.roster.name_of(email).unwrap_or(email);
            success(format!("{name}: {} on {date}", status.label()));
        }
        Ok(outcome)
    }
}

pub struct TakeLogic;

impl TakeLogic {
    /// Console entry: one email per line until a blank line, end of input or Ctrl-C.
    pub fn manual(
        intake: &Intake<'_>,
        input: &mut dyn BufRead,
        status: Status,
        date: NaiveDate,
    ) -> AppResult<TakeSummary> {
        info(format!(
            "Recording '{}' for {date}. Leave the line empty to finish.",
            status.label()
        ));

        let mut summary = TakeSummary::default();
        while let Some(email) = prompt_known_email(input, intake.roster, "Email: ", intake.stop)? {
            let outcome = intake.mark(&email, status, date)?;
            summary.record(&outcome);
        }
        Ok(summary)
    }

    /// Scanner loop: every scan marks the member present. Unknown ids are
    /// registered through `input` before the loop goes on.
    pub fn scanner<R: Read>(
        intake: &Intake<'_>,
        reader: &mut ScanReader<R>,
        ids: &mut ScannerIds,
        input: &mut dyn BufRead,
        date: NaiveDate,
    ) -> AppResult<TakeSummary> {
        info(format!("Waiting for scans ({} known ids)", ids.len()));

        let mut summary = TakeSummary::default();
        while !intake.stopped() {
            let Some(id) = reader.next_scan()? else {
                break;
            };
            if intake.stopped() {
                break;
            }

            let known = ids
                .email_for(&id)
                .filter(|email| intake.roster.contains(email))
                .map(str::to_string);

            let email = match known {
                Some(email) => email,
                None => {
                    warning(format!("Unknown scanner id {id}"));
                    let prompt = format!("Email to register for {id}: ");
                    match prompt_known_email(input, intake.roster, &prompt, intake.stop)? {
                        Some(email) => {
                            ids.register(&id, &email)?;
                            info(format!("Registered {id} for {email}"));
                            email
                        }
                        None => {
                            warning(format!("Scan {id} skipped"));
                            continue;
                        }
                    }
                }
            };

            let outcome = intake.mark(&email, Status::Present, date)?;
            summary.record(&outcome);
        }
        Ok(summary)
    }
}
