//! Shared error type across factorium crates.

use thiserror::Error;

/// Exception label recorded for unparseable input.
pub const EXCEPTION_VALUE_ERROR: &str = "ValueError";
/// Exception label recorded for any unanticipated failure.
pub const EXCEPTION_UNEXPECTED: &str = "UnexpectedError";

/// Client-facing error codes (stable API), one per non-200 reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// `number` missing or not an integer.
    InvalidInput,
    /// `number` parsed but is negative.
    NegativeInput,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// Stable string form, used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::InvalidInput => "INVALID_INPUT",
            ClientCode::NegativeInput => "NEGATIVE_INPUT",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status the handler replies with.
    pub fn http_status(self) -> u16 {
        match self {
            ClientCode::InvalidInput | ClientCode::NegativeInput => 400,
            ClientCode::Internal => 500,
        }
    }

    /// Message placed in the `error` field of the reply body.
    pub fn message(self) -> &'static str {
        match self {
            ClientCode::InvalidInput => "Invalid input. Please provide an integer.",
            ClientCode::NegativeInput => "Please provide a non-negative integer.",
            ClientCode::Internal => "Internal server error",
        }
    }

    /// Label for the exception counter, if this outcome counts as one.
    ///
    /// Negative input is a validation rejection and is not counted.
    pub fn exception_type(self) -> Option<&'static str> {
        match self {
            ClientCode::InvalidInput => Some(EXCEPTION_VALUE_ERROR),
            ClientCode::NegativeInput => None,
            ClientCode::Internal => Some(EXCEPTION_UNEXPECTED),
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, FactoError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum FactoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("negative input: {0}")]
    NegativeInput(i64),
    #[error("internal: {0}")]
    Internal(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl FactoError {
    /// Map a request error to its client-facing code.
    ///
    /// Startup config errors never reach a client and have none.
    pub fn client_code(&self) -> Option<ClientCode> {
        match self {
            FactoError::InvalidInput(_) => Some(ClientCode::InvalidInput),
            FactoError::NegativeInput(_) => Some(ClientCode::NegativeInput),
            FactoError::Internal(_) => Some(ClientCode::Internal),
            FactoError::BadConfig(_) | FactoError::UnsupportedVersion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_input_is_not_an_exception() {
        let code = FactoError::NegativeInput(-3).client_code();
        assert_eq!(code, Some(ClientCode::NegativeInput));
        assert_eq!(code.and_then(ClientCode::exception_type), None);
        assert_eq!(code.map(ClientCode::http_status), Some(400));
    }

    #[test]
    fn invalid_and_internal_map_to_labels() {
        let bad = ClientCode::InvalidInput;
        assert_eq!(bad.exception_type(), Some("ValueError"));
        assert_eq!(bad.http_status(), 400);

        let internal = ClientCode::Internal;
        assert_eq!(internal.exception_type(), Some("UnexpectedError"));
        assert_eq!(internal.http_status(), 500);
        assert_eq!(internal.message(), "Internal server error");
    }

    #[test]
    fn config_errors_have_no_client_code() {
        assert_eq!(FactoError::BadConfig("x".into()).client_code(), None);
        assert_eq!(FactoError::UnsupportedVersion.client_code(), None);
    }
}
