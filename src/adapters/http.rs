use crate::domain::model::{ReportDataset, ReportRow};
use crate::domain::ports::ReportSource;
use crate::utils::error::{Result, WatchError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Outbound HTTP fetcher. Every request carries an explicit timeout so the
/// acquisition loop stays retryable instead of wedging on a stuck origin.
pub struct HttpReportSource {
    client: Client,
}

impl HttpReportSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ReportSource for HttpReportSource {
    async fn fetch_tabular(&self, url: &str) -> Result<ReportDataset> {
        let body = self.get_bytes(url).await?;
        parse_tabular(&body)
    }

    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
        self.get_bytes(url).await
    }
}

/// Parses the report body as headerless, ragged CSV.
///
/// The upstream file ends with a stray byte that is not valid UTF-8. A decode
/// error on the final record is tolerated and the rows captured so far stand;
/// a decode error followed by more records means the file itself is broken.
pub fn parse_tabular(body: &[u8]) -> Result<ReportDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut rows: Vec<ReportRow> = Vec::new();
    let mut records = reader.records();

    while let Some(record) = records.next() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
            Err(err) => {
                if records.next().is_some() {
                    return Err(WatchError::Csv(err));
                }
                tracing::debug!("ignoring malformed trailing record: {}", err);
                break;
            }
        }
    }

    Ok(ReportDataset::new(rows))
}
