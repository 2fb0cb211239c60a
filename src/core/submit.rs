//! Status submission to the attendance form, with a local overflow file
//! for submissions the form did not accept.

use crate::config::FormConfig;
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::ui::messages::warning;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One attendance mark to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub status: Status,
    pub date: NaiveDate,
}

pub trait FormSubmitter {
    /// Send the submission and return the HTTP status code.
    /// Transport failures are returned as errors.
    fn submit(&self, submission: &Submission) -> AppResult<u16>;
}

/// Field name/value pairs posted for a submission.
pub fn form_fields(form: &FormConfig, submission: &Submission) -> Vec<(String, String)> {
    let date = submission.date;
    vec![
        (form.email_field.clone(), submission.email.clone()),
        (
            form.status_field.clone(),
            submission.status.code().to_string(),
        ),
        (format!("{}_year", form.date_field), date.year().to_string()),
        (format!("{}_month", form.date_field), date.month().to_string()),
        (format!("{}_day", form.date_field), date.day().to_string()),
    ]
}

/// Posts submissions to the form response endpoint.
pub struct HttpFormSubmitter {
    client: reqwest::blocking::Client,
    form: FormConfig,
}

impl HttpFormSubmitter {
    pub fn new(form: FormConfig) -> AppResult<Self> {
        if form.form_id.trim().is_empty() {
            return Err(AppError::Config("form.form_id is not set".into()));
        }

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(form.timeout_secs))
            .build()
            .map_err(|e| AppError::Submission(e.to_string()))?;

        Ok(Self { client, form })
    }
}

impl FormSubmitter for HttpFormSubmitter {
    fn submit(&self, submission: &Submission) -> AppResult<u16> {
        let response = self
            .client
            .post(self.form.url())
            .form(&form_fields(&self.form, submission))
            .send()
            .map_err(|e| AppError::Submission(e.to_string()))?;

        Ok(response.status().as_u16())
    }
}

#[derive(Debug, Serialize)]
struct OverflowRecord<'a> {
    recorded_at: String,
    email: &'a str,
    status: &'static str,
    date: String,
    reason: &'a str,
}

/// Append-only CSV of submissions kept for manual reconciliation.
#[derive(Debug, Clone)]
pub struct Overflow {
    path: PathBuf,
}

impl Overflow {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, submission: &Submission, reason: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let is_new = !self.path.exists() || std::fs::metadata(&self.path)?.len() == 0;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);

        writer.serialize(OverflowRecord {
            recorded_at: Local::now().to_rfc3339(),
            email: &submission.email,
            status: submission.status.code(),
            date: submission.date.format("%Y-%m-%d").to_string(),
            reason,
        })?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Written to the overflow file instead
    Deferred { reason: String },
}

/// Submit once; anything but a 200 lands in the overflow file and the
/// caller carries on.
pub fn submit_or_defer(
    submitter: &dyn FormSubmitter,
    overflow: &Overflow,
    submission: &Submission,
) -> AppResult<SubmitOutcome> {
    let reason = match submitter.submit(submission) {
        Ok(200) => return Ok(SubmitOutcome::Submitted),
        Ok(code) => format!("HTTP {code}"),
        Err(e) => e.to_string(),
    };

    warning(format!(
        "Submission for {} failed ({}); saved to {}",
        submission.email,
        reason,
        overflow.path().display()
    ));
    overflow.append(submission, &reason)?;

    Ok(SubmitOutcome::Deferred { reason })
}
