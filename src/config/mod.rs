pub mod file;

use crate::domain::model::CropRect;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{
    validate_finite_range, validate_non_empty_string, validate_range, validate_url, Validate,
};
use chrono::NaiveDateTime;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "wpsr-watch")]
#[command(about = "Waits for the weekly petroleum report release, downloads it and prints the inventory deltas")]
pub struct WatchConfig {
    /// Optional TOML file; fills in settings not given on the command line.
    /// Flags passed explicitly always win over file values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "https://ir.eia.gov/wpsr/table4.csv")]
    pub data_url: String,

    #[arg(long, default_value = "https://ir.eia.gov/wpsr/wpsrsummary.pdf")]
    pub summary_url: String,

    #[arg(long, default_value = "https://ir.eia.gov/wpsr/overview.pdf")]
    pub overview_url: String,

    /// Scheduled release instant, e.g. 2024-05-27T15:46 (local time). When
    /// omitted the pipeline runs immediately.
    #[arg(long, value_parser = parse_release_instant)]
    pub release_at: Option<NaiveDateTime>,

    /// Signed offset applied to the fire instant, to run just before the
    /// scheduled time.
    #[arg(long, default_value_t = -1.5, allow_negative_numbers = true)]
    pub fire_early_secs: f64,

    /// Maximum acceptable report age in days before a refetch.
    #[arg(long, default_value_t = 7)]
    pub freshness_days: i64,

    /// Safety valve for the retry loop; 0 retries until it succeeds.
    #[arg(long, default_value_t = 0)]
    pub max_attempts: u32,

    /// Delay between attempts after a transport failure.
    #[arg(long, default_value_t = 250)]
    pub retry_delay_ms: u64,

    #[arg(long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Snapshot crop rectangle in document points: x0,y0,x1,y1.
    #[arg(long, value_parser = parse_crop_rect, default_value = "0,0,612,225")]
    pub crop: CropRect,

    /// Snapshot render quality multiplier.
    #[arg(long, default_value_t = 2.0)]
    pub zoom: f32,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl WatchConfig {
    /// Parses the command line, then applies the TOML file when one is given.
    /// File values only replace settings the operator left at their defaults;
    /// an explicit flag always wins.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::args_os())
    }

    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().get_matches_from(args);
        let mut config = Self::from_arg_matches(&matches).map_err(|e| WatchError::Config {
            message: e.to_string(),
        })?;

        if let Some(path) = config.config.clone() {
            let overrides = file::FileConfig::from_file(&path)?;
            overrides.apply(&mut config, |field| {
                matches.value_source(field) == Some(ValueSource::CommandLine)
            });
        }

        Ok(config)
    }
}

impl ConfigProvider for WatchConfig {
    fn data_url(&self) -> &str {
        &self.data_url
    }

    fn summary_url(&self) -> &str {
        &self.summary_url
    }

    fn overview_url(&self) -> &str {
        &self.overview_url
    }

    fn freshness_days(&self) -> i64 {
        self.freshness_days
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    fn crop_rect(&self) -> CropRect {
        self.crop
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("data_url", &self.data_url)?;
        validate_url("summary_url", &self.summary_url)?;
        validate_url("overview_url", &self.overview_url)?;
        validate_non_empty_string("output_path", &self.output_path)?;
        validate_range("freshness_days", self.freshness_days, 0, 3650)?;
        validate_finite_range("fire_early_secs", self.fire_early_secs, -600.0, 600.0)?;
        validate_finite_range("zoom", f64::from(self.zoom), 0.1, 16.0)?;
        validate_range("request_timeout_secs", self.request_timeout_secs, 1, 300)?;

        if self.crop.width() <= 0.0 || self.crop.height() <= 0.0 {
            return Err(WatchError::InvalidConfigValue {
                field: "crop".to_string(),
                value: format!("{:?}", self.crop),
                reason: "Crop rectangle must have positive width and height".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_release_instant(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("expected a date-time like 2024-05-27T15:46, got {:?}", raw))
}

fn parse_crop_rect(raw: &str) -> std::result::Result<CropRect, String> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("crop values must be numbers: {}", e))?;

    match parts.as_slice() {
        [x0, y0, x1, y1] => Ok(CropRect {
            x0: *x0,
            y0: *y0,
            x1: *x1,
            y1: *y1,
        }),
        _ => Err(format!("expected x0,y0,x1,y1, got {:?}", raw)),
    }
}
