/// Error types for the request-handling layer.
/// The analytics functions themselves are total and never fail; only loading,
/// validating and dispatching requests can go wrong.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error("io error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),

    #[error("task error: {0}")]
    Task(String),
}

impl From<std::io::Error> for AnalyticsError {
    fn from(e: std::io::Error) -> Self {
        AnalyticsError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(e: serde_json::Error) -> Self {
        AnalyticsError::Parse(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AnalyticsError {
    fn from(e: tokio::task::JoinError) -> Self {
        AnalyticsError::Task(e.to_string())
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
