use chrono::NaiveDate;
use wpsr_watch::core::validate::{report_date, validate};
use wpsr_watch::domain::model::{ReportDataset, Verdict};

fn dataset_with_date(date: &str) -> ReportDataset {
    ReportDataset::new(vec![vec!["Data 1".to_string(), date.to_string()]])
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
}

#[test]
fn accepts_at_threshold_rejects_one_past_it() {
    // 05/22/24 seen on 2024-06-02 is 11 days old.
    let dataset = dataset_with_date("05/22/24");

    assert_eq!(
        validate(&dataset, today(), 11).unwrap(),
        Verdict::Fresh { age_days: 11 }
    );
    assert_eq!(
        validate(&dataset, today(), 10).unwrap(),
        Verdict::Stale { age_days: 11 }
    );
}

#[test]
fn boundary_holds_across_thresholds() {
    let dataset = dataset_with_date("05/22/24");

    for threshold in 0..30 {
        let verdict = validate(&dataset, today(), threshold).unwrap();
        if threshold >= 11 {
            assert_eq!(verdict, Verdict::Fresh { age_days: 11 });
        } else {
            assert_eq!(verdict, Verdict::Stale { age_days: 11 });
        }
    }
}

#[test]
fn future_dated_report_is_flagged() {
    let dataset = dataset_with_date("06/10/24");

    assert_eq!(
        validate(&dataset, today(), 7).unwrap(),
        Verdict::FutureDated { age_days: -8 }
    );
}

#[test]
fn same_day_report_is_fresh() {
    let dataset = dataset_with_date("06/02/24");

    assert_eq!(
        validate(&dataset, today(), 0).unwrap(),
        Verdict::Fresh { age_days: 0 }
    );
}

#[test]
fn unparseable_date_is_structural_not_retryable() {
    let dataset = dataset_with_date("Released May 22");

    let err = validate(&dataset, today(), 7).unwrap_err();
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("unparseable report date"));
}

#[test]
fn missing_date_cell_is_structural() {
    let dataset = ReportDataset::new(vec![vec!["only one cell".to_string()]]);

    assert!(report_date(&dataset).is_err());
    assert!(!validate(&dataset, today(), 7).unwrap_err().is_retryable());
}
