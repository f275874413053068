use crate::core::acquire::{acquire_fresh_report, AcquireSettings};
use crate::core::document::{render_snapshot, summarize_document};
use crate::core::extract::extract_summary;
use crate::domain::model::InventorySummary;
use crate::domain::ports::{ConfigProvider, DocumentEngine, ReportSource, Storage};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub const REPORT_DATA_ARTIFACT: &str = "report_data.csv";
pub const SUMMARY_PDF_ARTIFACT: &str = "report_summary.pdf";
pub const OVERVIEW_PDF_ARTIFACT: &str = "report_overview.pdf";
pub const SNAPSHOT_ARTIFACT: &str = "report_image.png";

/// Both companion documents use their first page.
const DOCUMENT_PAGE: usize = 0;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: InventorySummary,
    pub commentary: String,
    pub runtime_secs: f64,
}

/// The full acquisition pipeline, run exactly once per process: acquire a
/// fresh dataset, extract the inventory deltas, then summarize and snapshot
/// the companion documents.
pub struct ReportPipeline<S, E, T, C>
where
    S: ReportSource,
    E: DocumentEngine,
    T: Storage,
    C: ConfigProvider,
{
    source: S,
    engine: E,
    storage: T,
    config: C,
}

impl<S, E, T, C> ReportPipeline<S, E, T, C>
where
    S: ReportSource,
    E: DocumentEngine,
    T: Storage,
    C: ConfigProvider,
{
    pub fn new(source: S, engine: E, storage: T, config: C) -> Self {
        Self {
            source,
            engine,
            storage,
            config,
        }
    }

    pub async fn run(&self, today: NaiveDate) -> Result<RunReport> {
        tracing::info!("running comparison");

        let settings = AcquireSettings {
            data_url: self.config.data_url().to_string(),
            freshness_days: self.config.freshness_days(),
            max_attempts: self.config.max_attempts(),
            retry_delay: self.config.retry_delay(),
            artifact_name: REPORT_DATA_ARTIFACT.to_string(),
        };

        let fetched = acquire_fresh_report(&self.source, &self.storage, &settings, today).await?;
        let summary = extract_summary(&fetched.dataset)?;
        tracing::info!("extracted deltas for report dated {}", summary.report_date);

        tracing::info!("fetching summary document");
        let summary_doc = self.source.fetch_document(self.config.summary_url()).await?;
        let commentary = summarize_document(
            &self.engine,
            &self.storage,
            &summary_doc,
            SUMMARY_PDF_ARTIFACT,
            DOCUMENT_PAGE,
        )
        .await?;

        tracing::info!("rendering overview snapshot");
        let overview_doc = self
            .source
            .fetch_document(self.config.overview_url())
            .await?;
        render_snapshot(
            &self.engine,
            &self.storage,
            &overview_doc,
            OVERVIEW_PDF_ARTIFACT,
            SNAPSHOT_ARTIFACT,
            DOCUMENT_PAGE,
            self.config.crop_rect(),
            self.config.zoom(),
        )
        .await?;

        Ok(RunReport {
            summary,
            commentary,
            runtime_secs: fetched.captured_at.elapsed().as_secs_f64(),
        })
    }
}
