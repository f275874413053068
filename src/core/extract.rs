use crate::core::validate::REPORT_DATE_CELL;
use crate::domain::model::{FieldDelta, InventorySummary, ReportDataset};
use crate::utils::error::{Result, WatchError};

// Fixed coordinates into table 4 of the weekly report. Crude excludes the
// Strategic Petroleum Reserve.
const CRUDE: (usize, usize) = (2, 3);
const CUSHING: (usize, usize) = (5, 3);
const GASOLINE: (usize, usize) = (11, 3);
const DISTILLATES: (usize, usize) = (17, 3);

/// Pulls the named inventory changes out of a validated dataset. Any missing
/// or non-numeric coordinate means the report layout changed, which no amount
/// of refetching will fix.
pub fn extract_summary(dataset: &ReportDataset) -> Result<InventorySummary> {
    let (row, col) = REPORT_DATE_CELL;
    let report_date = dataset
        .cell(row, col)
        .ok_or_else(|| {
            WatchError::structural(format!("report date cell ({}, {}) is missing", row, col))
        })?
        .to_string();

    Ok(InventorySummary {
        report_date,
        crude: delta("Crude Oil", dataset, CRUDE)?,
        gasoline: delta("Gasoline", dataset, GASOLINE)?,
        distillates: delta("Distillates", dataset, DISTILLATES)?,
        cushing: delta("Cushing", dataset, CUSHING)?,
    })
}

fn delta(name: &'static str, dataset: &ReportDataset, at: (usize, usize)) -> Result<FieldDelta> {
    Ok(FieldDelta {
        name,
        value: dataset.numeric_cell(at.0, at.1)?,
    })
}
