use thiserror::Error;

/// Rejections from the control-vector entry point.
///
/// A mismatch means the upstream action wiring is broken; nothing is applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapingError {
    #[error("Control dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid range for {field}: min {min} must be below max {max}")]
    InvertedRange { field: &'static str, min: f32, max: f32 },

    #[error("Value out of range for {field}: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

impl ConfigError {
    /// Parse errors can be fixed by editing the file; range errors need retuning.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ConfigError::Json(_) | ConfigError::Yaml(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
