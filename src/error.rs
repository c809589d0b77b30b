use thiserror::Error;

/// Errors raised while building a chart from a dataset and a config.
///
/// Everything here is detected up front; once a `Sunburst` exists, interaction
/// cannot fail.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("dataset is not valid JSON: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("node '{path}' has neither children nor a value")]
    MissingValue { path: String },

    #[error("node '{path}' has invalid value {value}")]
    InvalidValue { path: String, value: f64 },

    #[error("hierarchy has a total value of zero")]
    EmptyHierarchy,

    #[error("invalid chart config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
