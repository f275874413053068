use crate::domain::model::{CropRect, ReportDataset};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Outbound fetch interface for the report and its companion documents.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_tabular(&self, url: &str) -> Result<ReportDataset>;
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>>;
}

/// Paged-document capability: text blocks from a page, and a cropped raster
/// of a page. The concrete engine is an external collaborator. The pipeline
/// runs on a single task, so engines need not be thread-safe; the pdfium
/// binding in particular is not.
pub trait DocumentEngine {
    fn text_blocks(&self, document: &[u8], page_index: usize) -> Result<Vec<String>>;

    /// Renders `rect` (in document coordinates) of the given page at `zoom`
    /// and returns PNG-encoded bytes.
    fn render_region(
        &self,
        document: &[u8],
        page_index: usize,
        rect: CropRect,
        zoom: f32,
    ) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_url(&self) -> &str;
    fn summary_url(&self) -> &str;
    fn overview_url(&self) -> &str;
    fn freshness_days(&self) -> i64;
    /// 0 means unlimited, the reference behavior.
    fn max_attempts(&self) -> u32;
    fn retry_delay(&self) -> Duration;
    fn crop_rect(&self) -> CropRect;
    fn zoom(&self) -> f32;
}
