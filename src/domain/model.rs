use crate::utils::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One parsed line of the tabular report, in file order.
pub type ReportRow = Vec<String>;

/// A captured snapshot of the tabular report. Immutable once built; each
/// download attempt replaces the previous dataset entirely, never merges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDataset {
    rows: Vec<ReportRow>,
}

impl ReportDataset {
    pub fn new(rows: Vec<ReportRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Numeric interpretation happens here, at extraction time. A missing or
    /// non-numeric cell means the report layout changed upstream.
    pub fn numeric_cell(&self, row: usize, col: usize) -> Result<f64> {
        let cell = self.cell(row, col).ok_or_else(|| {
            WatchError::structural(format!("cell ({}, {}) is out of range", row, col))
        })?;
        cell.trim().parse::<f64>().map_err(|_| {
            WatchError::structural(format!("cell ({}, {}) is not numeric: {:?}", row, col, cell))
        })
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| WatchError::structural(format!("CSV serialization failed: {}", e)))
    }
}

/// A dataset together with the instant the download completed, used for
/// runtime reporting at the end of the run.
#[derive(Debug, Clone)]
pub struct FetchedReport {
    pub dataset: ReportDataset,
    pub captured_at: Instant,
}

/// Freshness verdict for a captured dataset. A future-dated report is its own
/// case so the anomaly can be surfaced instead of passing as fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fresh { age_days: i64 },
    Stale { age_days: i64 },
    FutureDated { age_days: i64 },
}

/// A named period-over-period change pulled from a fixed report coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDelta {
    pub name: &'static str,
    pub value: f64,
}

impl FieldDelta {
    /// Explicit sign, millions-of-barrels suffix: `+1.2M`, `-0.8M`, `+0M`.
    pub fn formatted(&self) -> String {
        format!("{:+}M", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventorySummary {
    pub report_date: String,
    pub crude: FieldDelta,
    pub gasoline: FieldDelta,
    pub distillates: FieldDelta,
    pub cushing: FieldDelta,
}

impl InventorySummary {
    pub fn render(&self) -> String {
        let mut out = String::from("\nEIA CRUDE OIL INVENTORIES REPORT\n");
        for delta in [&self.crude, &self.gasoline, &self.distillates, &self.cushing] {
            out.push_str(&format!("• {}: {}\n", delta.name, delta.formatted()));
        }
        out
    }
}

/// Document-space bounding box for the snapshot crop. Encodes an assumption
/// about the upstream document's fixed layout, so it stays configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CropRect {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}
