//! Volunteer-hours sync: overview rows plus one detail spreadsheet per member.

use crate::backend::{Permission, Role, SheetBackend, SpreadsheetRef};
use crate::config::{HoursConfig, WriteMode};
use crate::core::aggregate::{Requirements, aggregate_hours};
use crate::core::context::Context;
use crate::core::roster::Roster;
use crate::core::writer::{Placement, write_block, write_rows};
use crate::errors::AppResult;
use crate::models::hours::{HoursKind, HoursRecord};
use crate::ui::messages::{info, success};

const DETAIL_OVERVIEW_SHEET: &str = "Overview";
const DETAIL_OVERVIEW_ROW: usize = 3;
const DETAIL_FIRST_ENTRY_ROW: usize = 2;
const ENTRY_COLUMNS: usize = 5;
const OVERVIEW_COLUMNS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum HoursOutcome {
    /// The response count did not grow past the watermark
    NoNewEntries { seen: usize },
    Updated {
        processed: usize,
        records: Vec<HoursRecord>,
    },
}

pub struct HoursLogic;

impl HoursLogic {
    /// Run the hours pass. The returned configuration carries the advanced
    /// watermark; persisting it is up to the caller.
    pub fn sync(
        ctx: &mut Context,
        mut cfg: HoursConfig,
        roster: &Roster,
    ) -> AppResult<(HoursConfig, HoursOutcome)> {
        let responses = ctx.backend.open_required(&cfg.spreadsheet)?;
        let rows = ctx.backend.records(&responses, &cfg.responses_sheet)?;

        if rows.len() <= cfg.last_checked_entries {
            info("No new entries");
            return Ok((cfg, HoursOutcome::NoNewEntries { seen: rows.len() }));
        }

        let requirements = Requirements {
            in_hours: cfg.required_in,
            out_hours: cfg.required_out,
        };
        let records = aggregate_hours(&rows, roster, &cfg.columns, requirements)?;
        info(format!(
            "Parsed all {} entries for {} users",
            rows.len(),
            records.len()
        ));

        let mut overview_rows = Vec::with_capacity(records.len());
        for record in &records {
            let detail = ensure_detail_sheet(ctx.backend.as_mut(), &cfg, record)?;
            update_detail_sheet(ctx.backend.as_mut(), &detail, record)?;

            let mut row = record.summary_row();
            row.push(cfg.detail_link.replace("{id}", &detail.id));
            overview_rows.push(row);

            success(format!("Done updating {}'s hours", record.name));
        }

        let placement = Placement {
            sheet: &responses,
            worksheet: &cfg.overview_sheet,
            first_row: cfg.first_row,
            width: OVERVIEW_COLUMNS,
            mode: WriteMode::Batch,
        };
        write_rows(ctx.backend.as_mut(), placement, &overview_rows)?;

        cfg.last_checked_entries = rows.len();
        let outcome = HoursOutcome::Updated {
            processed: rows.len(),
            records,
        };
        Ok((cfg, outcome))
    }
}

/// Title of a member's detail spreadsheet.
pub fn detail_title(cfg: &HoursConfig, name: &str) -> String {
    cfg.detail_title.replace("{full_name}", name)
}

/// Open the member's detail spreadsheet, creating and sharing it from the
/// template when it does not exist yet.
pub fn ensure_detail_sheet(
    backend: &mut dyn SheetBackend,
    cfg: &HoursConfig,
    record: &HoursRecord,
) -> AppResult<SpreadsheetRef> {
    let title = detail_title(cfg, &record.name);
    if let Some(sheet) = backend.open(&title)? {
        return Ok(sheet);
    }

    let template = backend.open_required(&cfg.template)?;
    let sheet = backend.copy_spreadsheet(&template, &title)?;
    info(format!("Created new sheet for {}", record.name));

    share_detail_sheet(backend, cfg, &sheet, record)?;
    info(format!("Shared new sheet for {}", record.name));

    Ok(sheet)
}

/// Share with the member (welcome message) and every administrator (silently).
fn share_detail_sheet(
    backend: &mut dyn SheetBackend,
    cfg: &HoursConfig,
    sheet: &SpreadsheetRef,
    record: &HoursRecord,
) -> AppResult<()> {
    let first_name = record.name.split(' ').next().unwrap_or(&record.name);
    let welcome = cfg.welcome_message.replace("{first_name}", first_name);

    backend.share(
        sheet,
        &Permission {
            email: record.email.clone(),
            role: Role::Reader,
            notify: true,
            message: Some(welcome),
        },
    )?;

    for admin in &cfg.admin_emails {
        backend.share(
            sheet,
            &Permission {
                email: admin.clone(),
                role: Role::Reader,
                notify: false,
                message: None,
            },
        )?;
    }

    Ok(())
}

fn update_detail_sheet(
    backend: &mut dyn SheetBackend,
    sheet: &SpreadsheetRef,
    record: &HoursRecord,
) -> AppResult<()> {
    for kind in [HoursKind::In, HoursKind::Out] {
        let entries: Vec<Vec<String>> = record
            .bucket(kind)
            .entries
            .iter()
            .map(|e| e.to_row())
            .collect();

        let placement = Placement {
            sheet,
            worksheet: kind.worksheet(),
            first_row: DETAIL_FIRST_ENTRY_ROW,
            width: ENTRY_COLUMNS,
            mode: WriteMode::Batch,
        };
        write_rows(backend, placement, &entries)?;
    }

    let placement = Placement {
        sheet,
        worksheet: DETAIL_OVERVIEW_SHEET,
        first_row: DETAIL_OVERVIEW_ROW,
        width: OVERVIEW_COLUMNS - 1,
        mode: WriteMode::Batch,
    };
    write_block(backend, placement, &[record.summary_row()])
}
