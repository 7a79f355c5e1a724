use thiserror::Error;

/// Failure raised by a trace-time helper.
///
/// Only two kinds exist: a semantically wrong value and a wrong runtime type.
/// Both carry nothing beyond the human-readable message; the tracing layer
/// turns them into compilation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("{0}")]
    Value(String),
    #[error("{0}")]
    Type(String),
}

impl TraceError {
    pub fn is_value_error(&self) -> bool {
        matches!(self, TraceError::Value(_))
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self, TraceError::Type(_))
    }

    pub fn message(&self) -> &str {
        match self {
            TraceError::Value(msg) | TraceError::Type(msg) => msg,
        }
    }
}
