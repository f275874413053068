pub mod acquire;
pub mod document;
pub mod extract;
pub mod pipeline;
pub mod schedule;
pub mod validate;

pub use crate::domain::model::{
    FetchedReport, FieldDelta, InventorySummary, ReportDataset, Verdict,
};
pub use crate::domain::ports::{ConfigProvider, DocumentEngine, ReportSource, Storage};
pub use crate::utils::error::Result;
