use crate::core::validate::validate;
use crate::domain::model::{FetchedReport, ReportDataset, Verdict};
use crate::domain::ports::{ReportSource, Storage};
use crate::utils::error::{Result, WatchError};
use chrono::NaiveDate;
use std::time::{Duration, Instant};

pub struct AcquireSettings {
    pub data_url: String,
    pub freshness_days: i64,
    /// 0 means retry until the origin cooperates, the intended operating mode
    /// when the loop starts right at release time.
    pub max_attempts: u32,
    /// Delay between attempts after a transport failure. A stale report is
    /// refetched immediately; the network round-trip is delay enough.
    pub retry_delay: Duration,
    pub artifact_name: String,
}

/// The acquisition loop: retry the download until it both succeeds and yields
/// a fresh edition. Two independent retry reasons, one exit on success:
/// transport failures wait out `retry_delay`, stale reports refetch at once,
/// structural errors abort. Each attempt's dataset fully replaces the last.
pub async fn acquire_fresh_report<S, T>(
    source: &S,
    storage: &T,
    settings: &AcquireSettings,
    today: NaiveDate,
) -> Result<FetchedReport>
where
    S: ReportSource,
    T: Storage,
{
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        let dataset = match source.fetch_tabular(&settings.data_url).await {
            Ok(dataset) => {
                tracing::info!("report download succeeded (attempt {})", attempts);
                dataset
            }
            Err(err) if err.is_retryable() => {
                tracing::warn!("download attempt {} failed: {}", attempts, err);
                if exhausted(settings, attempts) {
                    return Err(WatchError::RetriesExhausted { attempts });
                }
                tokio::time::sleep(settings.retry_delay).await;
                continue;
            }
            Err(err) => return Err(err),
        };
        let captured_at = Instant::now();

        persist_artifact(storage, &settings.artifact_name, &dataset).await;

        match validate(&dataset, today, settings.freshness_days)? {
            Verdict::Fresh { age_days } => {
                tracing::info!(
                    "valid report: {} days old (limit {})",
                    age_days,
                    settings.freshness_days
                );
                return Ok(FetchedReport {
                    dataset,
                    captured_at,
                });
            }
            Verdict::FutureDated { age_days } => {
                tracing::warn!(
                    "report is dated {} days in the future; proceeding with it",
                    -age_days
                );
                return Ok(FetchedReport {
                    dataset,
                    captured_at,
                });
            }
            Verdict::Stale { age_days } => {
                tracing::info!(
                    "report is {} days old (limit {}), refetching",
                    age_days,
                    settings.freshness_days
                );
                if exhausted(settings, attempts) {
                    return Err(WatchError::RetriesExhausted { attempts });
                }
            }
        }
    }
}

fn exhausted(settings: &AcquireSettings, attempts: u32) -> bool {
    settings.max_attempts != 0 && attempts >= settings.max_attempts
}

/// Audit copy of the captured rows. Best-effort: a failed write is logged and
/// never blocks the data from reaching the caller.
async fn persist_artifact<T: Storage>(storage: &T, name: &str, dataset: &ReportDataset) {
    match dataset.to_csv_bytes() {
        Ok(bytes) => {
            if let Err(err) = storage.write_file(name, &bytes).await {
                tracing::warn!("failed to persist {}: {}", name, err);
            }
        }
        Err(err) => tracing::warn!("failed to serialize {}: {}", name, err),
    }
}
