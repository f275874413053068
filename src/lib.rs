pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{http::HttpReportSource, pdf::PdfiumEngine, storage::LocalStorage};
pub use crate::config::WatchConfig;
pub use crate::core::{
    pipeline::{ReportPipeline, RunReport},
    schedule::OneShotTrigger,
};
pub use crate::utils::error::{Result, WatchError};
