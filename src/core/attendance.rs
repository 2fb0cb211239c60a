use crate::config::AttendanceConfig;
use crate::core::aggregate::{AttendanceColumns, aggregate_attendance};
use crate::core::context::Context;
use crate::core::roster::{Roster, SessionPlan};
use crate::core::writer::{Placement, project, write_rows};
use crate::errors::AppResult;
use crate::models::record::AttendanceRecord;
use crate::ui::messages::{info, success};

/// First data row of the attendance overview (row 1 is the header).
pub const FIRST_DATA_ROW: usize = 2;

/// Aggregated attendance ready to be written or exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceOverview {
    pub header: Vec<String>,
    pub records: Vec<AttendanceRecord>,
}

impl AttendanceOverview {
    /// Records projected onto the header columns.
    pub fn rows(&self) -> Vec<Vec<String>> {
        project(&self.header, &self.records, "")
    }
}

/// High-level logic of the attendance aggregate-and-write pass.
pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Read the overview header and every response, and aggregate them.
    pub fn collect(
        ctx: &Context,
        cfg: &AttendanceConfig,
        roster: &Roster,
    ) -> AppResult<AttendanceOverview> {
        let spreadsheet = ctx.backend.open_required(&cfg.spreadsheet)?;
        let header = ctx.backend.row_values(&spreadsheet, &cfg.overview_sheet, 1)?;
        let plan = SessionPlan::from_header(&header, cfg.date_format, cfg.past_rule, ctx.today);

        let rows = ctx.backend.records(&spreadsheet, &cfg.responses_sheet)?;
        info(format!(
            "Read {} responses against {} sessions",
            rows.len(),
            plan.len()
        ));

        let records = aggregate_attendance(
            &rows,
            roster,
            &plan,
            &AttendanceColumns::from(cfg),
            cfg.include_roster,
        )?;

        Ok(AttendanceOverview { header, records })
    }

    /// Aggregate and write the overview sheet.
    pub fn sync(
        ctx: &mut Context,
        cfg: &AttendanceConfig,
        roster: &Roster,
    ) -> AppResult<AttendanceOverview> {
        let overview = Self::collect(ctx, cfg, roster)?;
        let spreadsheet = ctx.backend.open_required(&cfg.spreadsheet)?;

        let rows = overview.rows();
        let placement = Placement {
            sheet: &spreadsheet,
            worksheet: &cfg.overview_sheet,
            first_row: FIRST_DATA_ROW,
            width: overview.header.len(),
            mode: cfg.write_mode,
        };
        write_rows(ctx.backend.as_mut(), placement, &rows)?;

        success(format!(
            "Attendance overview updated for {} members",
            overview.records.len()
        ));
        Ok(overview)
    }
}
