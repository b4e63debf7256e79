use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EcoWattError {
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("'{field}' is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("kWh prediction unavailable: {0}")]
    PredictionUnavailable(String),

    #[error("failed to load tariff from {path}: {reason}")]
    TariffLoad { path: PathBuf, reason: String },

    #[error("invalid tariff: {0}")]
    TariffInvalid(String),

    #[error("failed to load premises profile from {path}: {reason}")]
    ProfileLoad { path: PathBuf, reason: String },

    #[error("invalid premises profile: {0}")]
    ProfileInvalid(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EcoWattError {
    pub(crate) fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EcoWattError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EcoWattError::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
