//! Error types for the 1secmail client.

use thiserror::Error;

/// Errors returned by [`Client`](crate::Client) operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP request could not be completed, or the server answered with a non-2xx status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be fully read.
    #[error("failed to read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// The address is not of the form `login@domain`.
    #[error("invalid address format: {0:?}")]
    InvalidAddress(String),

    /// The service returned an empty list where at least one item was required.
    #[error("service returned an empty response")]
    EmptyResponse,

    /// A mailbox count of zero was requested.
    #[error("mailbox count must be at least 1")]
    InvalidCount,

    /// The login is reserved by the service and cannot be used.
    #[error("login {0:?} is reserved")]
    ReservedLogin(String),

    /// The domain is not one the service hosts.
    #[error("domain {0:?} is not supported by the service")]
    UnsupportedDomain(String),

    /// Writing a downloaded attachment failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_message() {
        let err = Error::InvalidAddress("nobody".to_string());
        assert_eq!(err.to_string(), "invalid address format: \"nobody\"");
    }

    #[test]
    fn reserved_login_message() {
        let err = Error::ReservedLogin("admin".to_string());
        assert_eq!(err.to_string(), "login \"admin\" is reserved");
    }

    #[test]
    fn decode_error_message() {
        let source = serde_json::from_str::<Vec<String>>("[").unwrap_err();
        let err = Error::Json(source);
        assert!(err.to_string().starts_with("failed to decode response: "));
    }

    #[test]
    fn json_errors_convert() {
        let source = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
