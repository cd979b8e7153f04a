use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsightError {
    /// Malformed ticker input. The only error shown to the user directly.
    #[error("Invalid ticker: {0}")]
    Validation(String),

    #[error("Generation service error: {0}")]
    Service(String),

    #[error("Parse error: {reason}")]
    Parse { reason: String, raw_text: String },

    /// Wrong JSON type or an out-of-range enum value.
    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Missing fields: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },
}

impl InsightError {
    pub fn parse(reason: impl Into<String>, raw_text: impl Into<String>) -> Self {
        InsightError::Parse {
            reason: reason.into(),
            raw_text: raw_text.into(),
        }
    }

    /// Raw upstream text attached to a parse failure, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            InsightError::Parse { raw_text, .. } => Some(raw_text),
            _ => None,
        }
    }
}

pub type InsightResult<T> = Result<T, InsightError>;
