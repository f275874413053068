use crate::domain::model::{ReportDataset, Verdict};
use crate::utils::error::{Result, WatchError};
use chrono::NaiveDate;

/// Publication date format embedded in the report: two-digit month/day/year.
pub const REPORT_DATE_FORMAT: &str = "%m/%d/%y";

/// Row/column of the publication date cell.
pub const REPORT_DATE_CELL: (usize, usize) = (0, 1);

pub fn report_date(dataset: &ReportDataset) -> Result<NaiveDate> {
    let (row, col) = REPORT_DATE_CELL;
    let cell = dataset.cell(row, col).ok_or_else(|| {
        WatchError::structural(format!("report date cell ({}, {}) is missing", row, col))
    })?;

    NaiveDate::parse_from_str(cell, REPORT_DATE_FORMAT).map_err(|e| {
        WatchError::structural(format!("unparseable report date {:?}: {}", cell, e))
    })
}

/// Freshness check: accept iff `0 <= age_days <= threshold_days`. A report
/// dated in the future is reported as its own verdict so the caller can
/// surface the anomaly instead of treating it as trivially fresh.
///
/// A date that fails to parse is a structural error, not staleness; the
/// retry loop must not see it as another reason to refetch.
pub fn validate(dataset: &ReportDataset, today: NaiveDate, threshold_days: i64) -> Result<Verdict> {
    let date = report_date(dataset)?;
    let age_days = (today - date).num_days();

    Ok(if age_days < 0 {
        Verdict::FutureDated { age_days }
    } else if age_days <= threshold_days {
        Verdict::Fresh { age_days }
    } else {
        Verdict::Stale { age_days }
    })
}
