use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Date layout used by the session headers of the overview sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `M-D-YY`, century taken from the current date
    Dashed,
    /// `M/D/YYYY`
    Slashed,
}

/// Which sessions count as already held when filling defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PastRule {
    OnOrBeforeToday,
    BeforeToday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMode {
    /// One range write per sheet
    Batch,
    /// One update per cell
    PerCell,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceConfig {
    pub spreadsheet: String,
    pub responses_sheet: String,
    pub overview_sheet: String,
    pub email_column: String,
    pub date_column: String,
    pub status_column: String,
    pub date_format: DateFormat,
    pub past_rule: PastRule,
    pub write_mode: WriteMode,
    /// Give every roster member a row, even without responses
    pub include_roster: bool,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "NHS Attendance (Responses)".to_string(),
            responses_sheet: "Responses".to_string(),
            overview_sheet: "Overview".to_string(),
            email_column: "Student Email".to_string(),
            date_column: "Date".to_string(),
            status_column: "State".to_string(),
            date_format: DateFormat::Dashed,
            past_rule: PastRule::OnOrBeforeToday,
            write_mode: WriteMode::Batch,
            include_roster: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursConfig {
    pub spreadsheet: String,
    pub responses_sheet: String,
    pub overview_sheet: String,
    pub template: String,
    pub detail_title: String,
    pub welcome_message: String,
    pub detail_link: String,
    pub admin_emails: Vec<String>,
    pub required_in: f64,
    pub required_out: f64,
    pub first_row: usize,
    /// Watermark: number of response rows already processed
    pub last_checked_entries: usize,
    pub columns: HoursColumns,
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "NHS Hour Submission (Responses)".to_string(),
            responses_sheet: "Responses".to_string(),
            overview_sheet: "Overview".to_string(),
            template: "Template".to_string(),
            detail_title: "{full_name}'s Hours".to_string(),
            welcome_message: "Hi {first_name}, this is the spreadsheet you can use to view your logged hours. Please save this to your school account's Google Drive. Please allow for up to 24 hours for new activities to appear.".to_string(),
            detail_link: "https://docs.google.com/spreadsheets/d/{id}".to_string(),
            admin_emails: Vec::new(),
            required_in: 10.0,
            required_out: 10.0,
            first_row: 3,
            last_checked_entries: 0,
            columns: HoursColumns::default(),
        }
    }
}

/// Column titles of the hours response sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursColumns {
    pub email: String,
    pub kind: String,
    pub in_value: String,
    pub date: String,
    pub task: String,
    pub hours: String,
    pub contact: String,
    pub photo: String,
}

impl Default for HoursColumns {
    fn default() -> Self {
        Self {
            email: "Email Address".to_string(),
            kind: "Type of Hours".to_string(),
            in_value: "In Hours".to_string(),
            date: "Date of Service".to_string(),
            task: "Task/Type of Service".to_string(),
            hours: "Number of Service Hours".to_string(),
            contact: "Contact of Service Supervisor".to_string(),
            photo: "Photo of Signed Hour Sheet".to_string(),
        }
    }
}

/// Coordinates of the attendance form used for submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub endpoint: String,
    pub form_id: String,
    pub email_field: String,
    pub status_field: String,
    pub date_field: String,
    pub timeout_secs: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://docs.google.com/forms/d/e/{form_id}/formResponse".to_string(),
            form_id: String::new(),
            email_field: String::new(),
            status_field: String::new(),
            date_field: String::new(),
            timeout_secs: 30,
        }
    }
}

impl FormConfig {
    pub fn url(&self) -> String {
        self.endpoint.replace("{form_id}", &self.form_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub device: String,
    pub start_byte: u8,
    pub end_byte: u8,
    pub debounce_ms: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            device: "/dev/ttyACM0".to_string(),
            start_byte: 0x02,
            end_byte: 0x03,
            debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub workbook_dir: String,
    pub people_file: String,
    pub scanner_ids_file: String,
    pub overflow_file: String,
    #[serde(default)]
    pub attendance: AttendanceConfig,
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base(&Self::config_dir())
    }
}

impl Config {
    /// Defaults with every local file placed under `base`.
    pub fn with_base(base: &Path) -> Self {
        let at = |name: &str| base.join(name).to_string_lossy().to_string();
        Self {
            workbook_dir: at("workbook"),
            people_file: at("people.csv"),
            scanner_ids_file: at("scanner_ids.csv"),
            overflow_file: at("overflow.csv"),
            attendance: AttendanceConfig::default(),
            hours: HoursConfig::default(),
            form: FormConfig::default(),
            scanner: ScannerConfig::default(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rollcall")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rollcall")
        }
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollcall.conf")
    }

    /// Load configuration from `path`, or return defaults if the file does not exist
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Write the whole configuration document back to `path`
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|_| AppError::ConfigSave)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)
    }

    pub fn workbook_path(&self) -> PathBuf {
        expand_tilde(&self.workbook_dir)
    }

    pub fn people_path(&self) -> PathBuf {
        expand_tilde(&self.people_file)
    }

    pub fn scanner_ids_path(&self) -> PathBuf {
        expand_tilde(&self.scanner_ids_file)
    }

    pub fn overflow_path(&self) -> PathBuf {
        expand_tilde(&self.overflow_file)
    }

    /// Create the config file (unless it exists) and the local workbook directory
    pub fn init_all(path: &Path, workbook: Option<&str>) -> AppResult<Self> {
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_dir);
        fs::create_dir_all(&base)?;

        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            Self::with_base(&base)
        };

        if let Some(dir) = workbook {
            config.workbook_dir = dir.to_string();
        }

        config.save(path)?;
        fs::create_dir_all(config.workbook_path())?;

        Ok(config)
    }
}
