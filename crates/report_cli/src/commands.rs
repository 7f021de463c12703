//! Text reports over a loaded [`RecordStore`]
use anyhow::{anyhow, bail};
use clap::Args;
use contracts::dashboards::d400_lead_report::aggregate::{branch_distribution, status_counts};
use contracts::dashboards::d400_lead_report::dates::DateReader;
use contracts::dashboards::d400_lead_report::export::{export_file_name, to_csv};
use contracts::dashboards::d400_lead_report::filter::MONTH_NAMES;
use contracts::dashboards::d400_lead_report::{
    Choice, DrillDown, DrillLevel, FilterSelection, GroupId, LeadStatus, RecordStore,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Filter flags shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Month: 1-12 or a month name
    #[arg(long)]
    pub month: Option<String>,
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub employee: Option<String>,
    #[arg(long)]
    pub sector: Option<String>,
}

impl FilterArgs {
    pub fn selection(&self) -> anyhow::Result<FilterSelection> {
        let month = match self.month.as_deref() {
            None => Choice::All,
            Some(value) => parse_month(value)?,
        };
        let text = |value: &Option<String>| match value {
            Some(value) => Choice::from_select(value),
            None => Choice::All,
        };
        Ok(FilterSelection {
            month,
            branch: text(&self.branch),
            employee: text(&self.employee),
            sector: text(&self.sector),
        })
    }
}

/// "3", "mar", "March" -> month index 2; "All" -> no month filter
pub fn parse_month(value: &str) -> anyhow::Result<Choice<u32>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("all") {
        return Ok(Choice::All);
    }
    if let Ok(number) = value.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(Choice::Only(number - 1));
        }
        bail!("Month must be between 1 and 12, got {}", number);
    }
    let lower = value.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|name| {
            let name = name.to_lowercase();
            lower.len() >= 3 && name.starts_with(&lower)
        })
        .map(|index| Choice::Only(index as u32))
        .ok_or_else(|| anyhow!("Unknown month: {}", value))
}

/// Status tiles and branch distribution of the active view
pub fn summary(store: &RecordStore, selection: &FilterSelection, dates: &DateReader) -> String {
    let active = store.active_view(selection, dates);
    let counts = status_counts(&active, store.schema());
    let branches = branch_distribution(&active);

    let mut out = String::new();
    let _ = writeln!(out, "Leads: {} of {} loaded", active.len(), store.len());
    let _ = writeln!(out, "  {:<20} {:>8}", "Total", counts.total);
    for status in LeadStatus::ALL {
        let _ = writeln!(out, "  {:<20} {:>8}", status.label(), counts.get(status));
    }
    let _ = writeln!(out, "By branch:");
    for (branch, count) in branches.counts() {
        let _ = writeln!(out, "  {:<20} {:>8}", branch, count);
    }
    out
}

/// Walk Status -> Sector -> Detail as far as the given keys reach
pub fn drill(
    store: &RecordStore,
    selection: &FilterSelection,
    dates: &DateReader,
    status: &str,
    branch: Option<&str>,
    sector: Option<&str>,
) -> anyhow::Result<String> {
    if sector.is_some() && branch.is_none() {
        bail!("A sector row can only be opened under a branch row");
    }

    let active = store.active_view(selection, dates);
    let mut drill = DrillDown::new();
    let mut level = drill.open_status(&active, store.schema(), status).clone();

    if let Some(branch) = branch {
        let id = find_row(&level, branch)?;
        level = drill.open_sector(id)?.clone();
    }
    if let Some(sector) = sector {
        let id = find_row(&level, sector)?;
        level = drill.open_detail(id)?.clone();
    }

    Ok(render_level(&level))
}

fn find_row(level: &DrillLevel, key: &str) -> anyhow::Result<GroupId> {
    level
        .summary_rows()
        .iter()
        .find(|row| row.key == key)
        .map(|row| row.id)
        .ok_or_else(|| anyhow!("No group '{}' in \"{}\"", key, level.title()))
}

pub fn render_level(level: &DrillLevel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", level.title());
    match level {
        DrillLevel::Status { rows, .. } | DrillLevel::Sector { rows, .. } => {
            for row in rows {
                let _ = writeln!(out, "  {:<30} {:>8}", row.key, row.count);
            }
        }
        DrillLevel::Detail { rows } => {
            let _ = writeln!(
                out,
                "  {:<30} {:<25} {}",
                "Business Category", "Owner Name", "Owner Contact"
            );
            for row in rows {
                let _ = writeln!(
                    out,
                    "  {:<30} {:<25} {}",
                    row.business_category, row.owner_name, row.owner_contact
                );
            }
        }
    }
    out
}

/// Write the active view to `<out_dir>/<prefix>_<millis>.csv`.
///
/// Returns `None` when the active view is empty; no file is written then.
pub fn export(
    store: &RecordStore,
    selection: &FilterSelection,
    dates: &DateReader,
    prefix: &str,
    out_dir: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    let active = store.active_view(selection, dates);
    let csv = to_csv(&active);
    if csv.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(export_file_name(prefix, chrono::Utc::now().timestamp_millis()));
    std::fs::write(&path, csv)?;
    tracing::info!("Exported {} leads to {}", active.len(), path.display());
    Ok(Some(path))
}
