use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Source unavailable: {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl StatsError {
    pub fn unavailable(location: impl Into<String>, reason: impl Into<String>) -> Self {
        StatsError::SourceUnavailable {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error means the input could not be obtained at all
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, StatsError::SourceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
