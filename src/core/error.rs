use std::fmt;

/// Comprehensive error types for salesboard operations
#[derive(Debug)]
pub enum SalesboardError {
    /// IO error (file operations, sockets, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// CSV reading or writing error
    Csv(csv::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON serialization error
    Json(serde_json::Error),

    /// Data files missing
    DataNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// Dashboard server error
    Server(String),
}

impl fmt::Display for SalesboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalesboardError::Io(err) => write!(f, "IO error: {err}"),
            SalesboardError::Config(msg) => write!(f, "Configuration error: {msg}"),
            SalesboardError::Csv(err) => write!(f, "CSV error: {err}"),
            SalesboardError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            SalesboardError::Json(err) => write!(f, "JSON error: {err}"),
            SalesboardError::DataNotFound(path) => write!(
                f,
                "Data file not found: {path}. Run 'salesboard generate' first."
            ),
            SalesboardError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            SalesboardError::Server(msg) => write!(f, "Server error: {msg}"),
        }
    }
}

impl std::error::Error for SalesboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SalesboardError::Io(err) => Some(err),
            SalesboardError::Csv(err) => Some(err),
            SalesboardError::TomlParsing(err) => Some(err),
            SalesboardError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SalesboardError {
    fn from(err: std::io::Error) -> Self {
        SalesboardError::Io(err)
    }
}

impl From<csv::Error> for SalesboardError {
    fn from(err: csv::Error) -> Self {
        SalesboardError::Csv(err)
    }
}

impl From<toml::de::Error> for SalesboardError {
    fn from(err: toml::de::Error) -> Self {
        SalesboardError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for SalesboardError {
    fn from(err: serde_json::Error) -> Self {
        SalesboardError::Json(err)
    }
}

/// Type alias for Results using SalesboardError
pub type Result<T> = std::result::Result<T, SalesboardError>;
