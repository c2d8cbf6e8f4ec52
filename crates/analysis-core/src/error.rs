use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Problem with a single financial statement figure.
///
/// Field errors are local to the ratio that needed the figure; they never
/// abort the rest of a financial evaluation.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field} is missing")]
    Missing { field: String },

    #[error("{field} is not numeric: {value:?}")]
    NotNumeric { field: String, value: String },

    #[error("{field} is zero and cannot be used as a denominator")]
    DivisionByZero { field: String },
}

impl FieldError {
    pub fn field(&self) -> &str {
        match self {
            FieldError::Missing { field }
            | FieldError::NotNumeric { field, .. }
            | FieldError::DivisionByZero { field } => field,
        }
    }
}
