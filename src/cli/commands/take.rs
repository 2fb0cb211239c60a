use super::{RunEnv, load_roster, offline_ok};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::Roster;
use crate::core::scanner::{FrameDecoder, ScanReader, ScannerIds};
use crate::core::submit::{HttpFormSubmitter, Overflow};
use crate::core::take::{Intake, TakeLogic, TakeSummary};
use crate::errors::{AppError, AppResult};
use crate::models::status::Status;
use crate::ui::messages::{error, header, info, warning};
use crate::utils::date;
use chrono::NaiveDate;
use std::fs::File;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Which intake loop `take` runs.
enum Mode {
    Scanner { device: String },
    Manual { status: Status, date: NaiveDate },
}

/// Handle the `take` command: collect marks, then run the attendance pass.
///
/// The attendance pass runs even when intake fails part way, so marks
/// already submitted reach the overview; the intake error is reported after.
pub fn handle(cmd: &Commands, cfg: &Config, env: &RunEnv) -> AppResult<()> {
    if let Commands::Take {
        scanner,
        device,
        manual: _,
        excused,
        backfill,
        date: backfill_date,
        status,
    } = cmd
    {
        let mode = if *scanner {
            Mode::Scanner {
                device: device.clone().unwrap_or_else(|| cfg.scanner.device.clone()),
            }
        } else if *backfill {
            let raw = backfill_date
                .as_deref()
                .ok_or_else(|| AppError::InvalidDate("--backfill needs --date".into()))?;
            let day = date::parse_date(raw).ok_or_else(|| AppError::InvalidDate(raw.into()))?;
            let status =
                status.ok_or_else(|| AppError::InvalidStatus("--backfill needs --status".into()))?;
            Mode::Manual { status, date: day }
        } else if *excused {
            Mode::Manual {
                status: Status::Excused,
                date: env.today,
            }
        } else {
            Mode::Manual {
                status: Status::Present,
                date: env.today,
            }
        };

        let roster = load_roster(cfg)?;
        let stop = interrupt_flag();
        let intake = collect_marks(cfg, env, &roster, &mode, &stop);

        header("Updating attendance overview");
        let synced = offline_ok(super::attendance::sync(cfg, env));

        if let (Err(_), Err(e)) = (&intake, &synced) {
            error(format!("Error: {e}"));
        }
        return intake.and(synced);
    }

    Ok(())
}

/// Flag raised by the first Ctrl-C; a second one quits immediately.
fn interrupt_flag() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();

    let installed = ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::Relaxed) {
            std::process::exit(130);
        }
        eprintln!("\nStopping after the current input (Ctrl-C again to quit)");
    });
    if let Err(e) = installed {
        warning(format!("Ctrl-C handler not installed: {e}"));
    }

    stop
}

fn collect_marks(
    cfg: &Config,
    env: &RunEnv,
    roster: &Roster,
    mode: &Mode,
    stop: &AtomicBool,
) -> AppResult<()> {
    let submitter = HttpFormSubmitter::new(cfg.form.clone())?;
    let overflow = Overflow::new(cfg.overflow_path());
    let intake = Intake {
        roster,
        submitter: &submitter,
        overflow: &overflow,
        stop,
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let summary: TakeSummary = match mode {
        Mode::Scanner { device } => {
            let port = File::open(device)?;
            let mut reader = ScanReader::new(port, FrameDecoder::from_config(&cfg.scanner));
            let mut ids = ScannerIds::load(&cfg.scanner_ids_path())?;
            TakeLogic::scanner(&intake, &mut reader, &mut ids, &mut input, env.today)?
        }
        Mode::Manual { status, date } => {
            TakeLogic::manual(&intake, &mut input, *status, *date)?
        }
    };

    info(format!(
        "{} submitted, {} saved for later",
        summary.submitted, summary.deferred
    ));
    if summary.deferred > 0 {
        warning(format!(
            "Reconcile {} by hand once the form is reachable",
            overflow.path().display()
        ));
    }

    Ok(())
}
