//! Scanner framing and the scanner-ID lookup file.

use crate::config::ScannerConfig;
use crate::errors::AppResult;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufReader, Bytes, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Splits a byte stream into scanned identifiers.
///
/// Bytes between a start and an end marker form one identifier. Bytes
/// arriving within the debounce window after an end marker are dropped.
#[derive(Debug)]
pub struct FrameDecoder {
    start: u8,
    end: u8,
    debounce: Duration,
    buffer: Vec<u8>,
    in_frame: bool,
    quiet_until: Option<Instant>,
}

impl FrameDecoder {
    pub fn new(start: u8, end: u8, debounce: Duration) -> Self {
        Self {
            start,
            end,
            debounce,
            buffer: Vec::new(),
            in_frame: false,
            quiet_until: None,
        }
    }

    pub fn from_config(cfg: &ScannerConfig) -> Self {
        Self::new(
            cfg.start_byte,
            cfg.end_byte,
            Duration::from_millis(cfg.debounce_ms),
        )
    }

    /// Feed one byte received at `now`. Returns an identifier when a frame closes.
    pub fn push(&mut self, byte: u8, now: Instant) -> Option<String> {
        if let Some(until) = self.quiet_until {
            if now < until {
                return None;
            }
            self.quiet_until = None;
        }

        if byte == self.start {
            self.buffer.clear();
            self.in_frame = true;
            return None;
        }

        if !self.in_frame {
            return None;
        }

        if byte == self.end {
            self.in_frame = false;
            self.quiet_until = Some(now + self.debounce);
            let id = String::from_utf8_lossy(&self.buffer).trim().to_string();
            self.buffer.clear();
            return (!id.is_empty()).then_some(id);
        }

        self.buffer.push(byte);
        None
    }
}

/// Reads identifiers from a scanner device (or any byte stream).
pub struct ScanReader<R: Read> {
    bytes: Bytes<BufReader<R>>,
    decoder: FrameDecoder,
}

impl<R: Read> ScanReader<R> {
    pub fn new(inner: R, decoder: FrameDecoder) -> Self {
        Self {
            bytes: BufReader::new(inner).bytes(),
            decoder,
        }
    }

    /// Next scanned identifier, or `None` once the stream ends.
    pub fn next_scan(&mut self) -> AppResult<Option<String>> {
        for byte in self.bytes.by_ref() {
            if let Some(id) = self.decoder.push(byte?, Instant::now()) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

/// Mapping scanner id → email, backed by an append-only `id,email` file.
#[derive(Debug, Clone)]
pub struct ScannerIds {
    path: PathBuf,
    emails: HashMap<String, String>,
}

impl ScannerIds {
    /// Load the file; a missing file means no registered ids.
    pub fn load(path: &Path) -> AppResult<Self> {
        let mut emails = HashMap::new();

        if path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .trim(csv::Trim::All)
                .from_path(path)?;
            for record in reader.records() {
                let record = record?;
                if let (Some(id), Some(email)) = (record.get(0), record.get(1))
                    && !id.is_empty()
                {
                    emails.insert(id.to_string(), email.to_string());
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            emails,
        })
    }

    pub fn email_for(&self, id: &str) -> Option<&str> {
        self.emails.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Remember a new id, appending it to the file.
    pub fn register(&mut self, id: &str, email: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record([id, email])?;
        writer.flush()?;

        self.emails.insert(id.to_string(), email.to_string());
        Ok(())
    }
}
