use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("document error: {message}")]
    Document { message: String },

    #[error("report structure error: {message}")]
    Structural { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("gave up after {attempts} download attempts")]
    RetriesExhausted { attempts: u32 },
}

impl WatchError {
    pub fn structural(message: impl Into<String>) -> Self {
        WatchError::Structural {
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        WatchError::Document {
            message: message.into(),
        }
    }

    /// Transport-level failures are retried by the acquisition loop.
    /// Everything else aborts the run: retrying cannot fix a layout change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WatchError::Http(_) | WatchError::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
