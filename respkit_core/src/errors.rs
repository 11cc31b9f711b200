//! Error types for contract violations raised by the core.

/// Failures that abort the current operation instead of travelling as an envelope.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sort path segment did not resolve against the record's registered schema.
    #[error("unknown sort field '{segment}' in '{path}' for {type_name}")]
    UnknownSortField {
        path: String,
        segment: String,
        type_name: &'static str,
    },
    /// `ensure_success` was called on a failure envelope.
    #[error("response was not successful (code {code})")]
    ResponseNotSuccessful {
        code: String,
        message: Option<String>,
    },
}
