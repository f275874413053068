use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use wpsr_watch::core::acquire::{acquire_fresh_report, AcquireSettings};
use wpsr_watch::domain::model::ReportDataset;
use wpsr_watch::domain::ports::ReportSource;
use wpsr_watch::utils::error::{Result, WatchError};
use wpsr_watch::LocalStorage;

enum Step {
    Fail,
    Report(ReportDataset),
}

struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    attempts: AtomicU32,
}

impl ScriptedSource {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            attempts: AtomicU32::new(0),
        }
    }

    fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReportSource for ScriptedSource {
    async fn fetch_tabular(&self, url: &str) -> Result<ReportDataset> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.steps.lock().unwrap().pop_front() {
            Some(Step::Report(dataset)) => Ok(dataset),
            Some(Step::Fail) => Err(WatchError::Status {
                status: 500,
                url: url.to_string(),
            }),
            None => panic!("fetch_tabular called after the scripted sequence ended"),
        }
    }

    async fn fetch_document(&self, _url: &str) -> Result<Vec<u8>> {
        panic!("fetch_document is not part of the acquisition loop")
    }
}

fn dated_dataset(date: &str) -> ReportDataset {
    ReportDataset::new(vec![vec!["Data 1".to_string(), date.to_string()]])
}

fn settings(max_attempts: u32) -> AcquireSettings {
    AcquireSettings {
        data_url: "http://localhost/table4.csv".to_string(),
        freshness_days: 11,
        max_attempts,
        retry_delay: Duration::from_millis(1),
        artifact_name: "report_data.csv".to_string(),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

#[tokio::test]
async fn retries_through_failures_and_staleness_until_fresh() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    // fail, fail, success-but-stale, success-fresh: exactly 4 attempts.
    let source = ScriptedSource::new(vec![
        Step::Fail,
        Step::Fail,
        Step::Report(dated_dataset("05/01/24")),
        Step::Report(dated_dataset("05/22/24")),
    ]);

    let fetched = acquire_fresh_report(&source, &storage, &settings(0), today())
        .await
        .unwrap();

    assert_eq!(source.attempts(), 4);
    assert_eq!(fetched.dataset.cell(0, 1), Some("05/22/24"));

    // The audit artifact reflects the last capture.
    let artifact = std::fs::read_to_string(temp_dir.path().join("report_data.csv")).unwrap();
    assert!(artifact.contains("05/22/24"));
}

#[tokio::test]
async fn structural_error_aborts_without_another_attempt() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let source = ScriptedSource::new(vec![
        Step::Report(dated_dataset("not a date")),
        Step::Report(dated_dataset("05/22/24")),
    ]);

    let err = acquire_fresh_report(&source, &storage, &settings(0), today())
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    assert_eq!(source.attempts(), 1);
}

#[tokio::test]
async fn max_attempts_valve_stops_transport_retries() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let source = ScriptedSource::new(vec![Step::Fail, Step::Fail, Step::Fail]);

    let err = acquire_fresh_report(&source, &storage, &settings(3), today())
        .await
        .unwrap_err();

    assert!(matches!(err, WatchError::RetriesExhausted { attempts: 3 }));
    assert_eq!(source.attempts(), 3);
}

#[tokio::test]
async fn max_attempts_valve_stops_staleness_retries() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let source = ScriptedSource::new(vec![
        Step::Report(dated_dataset("01/01/24")),
        Step::Report(dated_dataset("01/01/24")),
    ]);

    let err = acquire_fresh_report(&source, &storage, &settings(2), today())
        .await
        .unwrap_err();

    assert!(matches!(err, WatchError::RetriesExhausted { attempts: 2 }));
}

#[tokio::test]
async fn future_dated_report_is_returned_not_retried() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let source = ScriptedSource::new(vec![Step::Report(dated_dataset("06/10/24"))]);

    let fetched = acquire_fresh_report(&source, &storage, &settings(0), today())
        .await
        .unwrap();

    assert_eq!(source.attempts(), 1);
    assert_eq!(fetched.dataset.cell(0, 1), Some("06/10/24"));
}
