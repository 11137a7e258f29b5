use thiserror::Error;

/// Errors raised by matchers.
///
/// The two variants are disjoint: a `Failure` is an assertion outcome and
/// respects the `not()` flag, while a `Usage` error signals a caller mistake
/// with a matcher's argument contract and is never inverted.
#[derive(Debug, Error)]
pub enum AssertError {
    #[error("{message}")]
    Failure {
        message: String,
        /// JSON rendering of the expected value, when one applies.
        expected: Option<String>,
        /// JSON rendering of the actual value, when one applies.
        actual: Option<String>,
    },

    #[error("{0}")]
    Usage(String),
}

impl AssertError {
    pub fn failure(message: impl Into<String>) -> Self {
        AssertError::Failure {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        AssertError::Usage(message.into())
    }

    /// Message plus the expected/actual payloads, for panic output.
    pub fn full_message(&self) -> String {
        match self {
            AssertError::Failure {
                message,
                expected,
                actual,
            } => {
                let mut out = message.clone();
                if let Some(expected) = expected {
                    out.push_str("\n  expected: ");
                    out.push_str(expected);
                }
                if let Some(actual) = actual {
                    out.push_str("\n    actual: ");
                    out.push_str(actual);
                }
                out
            }
            AssertError::Usage(message) => message.clone(),
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, AssertError::Usage(_))
    }
}

pub type Result<T> = std::result::Result<T, AssertError>;
