use super::{RunEnv, load_roster, offline_ok, open_context};
use crate::config::Config;
use crate::core::hours::{HoursLogic, HoursOutcome};
use crate::errors::AppResult;
use crate::models::hours::format_hours;
use crate::ui::messages::success;
use crate::utils::colors::paint_remaining;
use crate::utils::table::Table;

/// Handle the `hours` command and persist the advanced watermark.
pub fn handle(cfg: &Config, env: &RunEnv) -> AppResult<()> {
    offline_ok(sync(cfg, env))
}

fn sync(cfg: &Config, env: &RunEnv) -> AppResult<()> {
    let roster = load_roster(cfg)?;
    let mut ctx = open_context(cfg, env);

    let (hours_cfg, outcome) = HoursLogic::sync(&mut ctx, cfg.hours.clone(), &roster)?;

    let HoursOutcome::Updated { processed, records } = outcome else {
        return Ok(());
    };

    // Only the watermark changes; overrides from the command line stay out of the file.
    let mut stored = Config::load(&env.config_path)?;
    stored.hours.last_checked_entries = hours_cfg.last_checked_entries;
    stored.save(&env.config_path)?;
    success(format!("Processed {processed} entries"));

    let mut table = Table::new(
        ["Name", "In", "In left", "Out", "Out left"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );
    for r in &records {
        let in_left = r.in_hours.remaining();
        let out_left = r.out_hours.remaining();
        table.add_row(vec![
            r.name.clone(),
            format_hours(r.in_hours.total),
            paint_remaining(in_left, &format_hours(in_left)),
            format_hours(r.out_hours.total),
            paint_remaining(out_left, &format_hours(out_left)),
        ]);
    }
    println!("{}", table.render());

    Ok(())
}
