use thiserror::Error;

/// Error type for invalid operations.
///
/// Load-time failures (`Schema`, `Data`, `Arithmetic`) are fatal and abort
/// the pipeline before any derived series is exposed. `Range` is raised for
/// out-of-bounds horizon requests; per-frame range issues are clamped by the
/// frame mapping instead and never surface as errors.
#[derive(Error, Debug)]
pub enum GwpError {
    /// A required column is missing or misnamed in the input table.
    #[error("schema error: {0}")]
    Schema(String),
    /// The time axis is non-monotonic, irregular, or the table is malformed.
    #[error("data error: {0}")]
    Data(String),
    /// A horizon or lookup request falls outside the loaded series.
    #[error("range error: {0}")]
    Range(String),
    /// Division by a zero reference value outside the t=0 special case.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type for `Result<T, GwpError>`.
pub type GwpResult<T> = Result<T, GwpError>;
