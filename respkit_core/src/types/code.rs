//! Outcome code domains an [`Envelope`](super::Envelope) can be generic over.

use std::borrow::Cow;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A family of outcome codes.
///
/// Each domain supplies the constant table the envelope factories draw from
/// and the predicates that classify a code. Envelopes never decide success on
/// their own: `success` is always `code.is_success()`.
pub trait CodeDomain:
    Clone + fmt::Debug + fmt::Display + PartialEq + Serialize + DeserializeOwned
{
    fn ok() -> Self;
    fn bad_request() -> Self;
    fn unauthorized() -> Self;
    fn forbidden() -> Self;
    fn not_found() -> Self;
    fn conflict() -> Self;
    fn internal_server_error() -> Self;

    /// True for codes in the success range (canonically 200-299).
    fn is_success(&self) -> bool;
    /// True for codes in the client error range (canonically 400-499).
    fn is_client_error(&self) -> bool;
    /// True for codes in the server error range (canonically 500-599).
    fn is_server_error(&self) -> bool;

    /// Closest numeric HTTP status, for transports that need one.
    fn http_status(&self) -> u16;
}

/// Plain integers following the HTTP numbering convention.
impl CodeDomain for i32 {
    fn ok() -> Self {
        200
    }
    fn bad_request() -> Self {
        400
    }
    fn unauthorized() -> Self {
        401
    }
    fn forbidden() -> Self {
        403
    }
    fn not_found() -> Self {
        404
    }
    fn conflict() -> Self {
        409
    }
    fn internal_server_error() -> Self {
        500
    }

    fn is_success(&self) -> bool {
        (200..300).contains(self)
    }
    fn is_client_error(&self) -> bool {
        (400..500).contains(self)
    }
    fn is_server_error(&self) -> bool {
        (500..600).contains(self)
    }

    fn http_status(&self) -> u16 {
        u16::try_from(*self).unwrap_or(500)
    }
}

/// A real HTTP status code. Serializes as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus(pub http::StatusCode);

impl HttpStatus {
    pub fn as_u16(&self) -> u16 {
        self.0.as_u16()
    }
}

impl From<http::StatusCode> for HttpStatus {
    fn from(status: http::StatusCode) -> Self {
        HttpStatus(status)
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_u16())
    }
}

impl Serialize for HttpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0.as_u16())
    }
}

impl<'de> Deserialize<'de> for HttpStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u16::deserialize(deserializer)?;
        http::StatusCode::from_u16(raw)
            .map(HttpStatus)
            .map_err(|e| D::Error::custom(format!("invalid status code {}: {}", raw, e)))
    }
}

impl CodeDomain for HttpStatus {
    fn ok() -> Self {
        HttpStatus(http::StatusCode::OK)
    }
    fn bad_request() -> Self {
        HttpStatus(http::StatusCode::BAD_REQUEST)
    }
    fn unauthorized() -> Self {
        HttpStatus(http::StatusCode::UNAUTHORIZED)
    }
    fn forbidden() -> Self {
        HttpStatus(http::StatusCode::FORBIDDEN)
    }
    fn not_found() -> Self {
        HttpStatus(http::StatusCode::NOT_FOUND)
    }
    fn conflict() -> Self {
        HttpStatus(http::StatusCode::CONFLICT)
    }
    fn internal_server_error() -> Self {
        HttpStatus(http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn is_success(&self) -> bool {
        self.0.is_success()
    }
    fn is_client_error(&self) -> bool {
        self.0.is_client_error()
    }
    fn is_server_error(&self) -> bool {
        self.0.is_server_error()
    }

    fn http_status(&self) -> u16 {
        self.0.as_u16()
    }
}

/// Known symbols and the HTTP status each one stands for.
const SYMBOL_TABLE: &[(&str, u16)] = &[
    ("OK", 200),
    ("CREATED", 201),
    ("ACCEPTED", 202),
    ("NO_CONTENT", 204),
    ("BAD_REQUEST", 400),
    ("UNAUTHORIZED", 401),
    ("FORBIDDEN", 403),
    ("NOT_FOUND", 404),
    ("CONFLICT", 409),
    ("UNPROCESSABLE_ENTITY", 422),
    ("TOO_MANY_REQUESTS", 429),
    ("INTERNAL_SERVER_ERROR", 500),
    ("NOT_IMPLEMENTED", 501),
    ("SERVICE_UNAVAILABLE", 503),
];

/// A symbolic outcome code such as `"NOT_FOUND"`.
///
/// Symbols are classified through a fixed table. Symbols outside the table
/// are failures that belong to neither the client nor the server range and
/// map to HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolicCode(Cow<'static, str>);

impl SymbolicCode {
    pub const OK: SymbolicCode = SymbolicCode(Cow::Borrowed("OK"));
    pub const BAD_REQUEST: SymbolicCode = SymbolicCode(Cow::Borrowed("BAD_REQUEST"));
    pub const UNAUTHORIZED: SymbolicCode = SymbolicCode(Cow::Borrowed("UNAUTHORIZED"));
    pub const FORBIDDEN: SymbolicCode = SymbolicCode(Cow::Borrowed("FORBIDDEN"));
    pub const NOT_FOUND: SymbolicCode = SymbolicCode(Cow::Borrowed("NOT_FOUND"));
    pub const CONFLICT: SymbolicCode = SymbolicCode(Cow::Borrowed("CONFLICT"));
    pub const INTERNAL_SERVER_ERROR: SymbolicCode =
        SymbolicCode(Cow::Borrowed("INTERNAL_SERVER_ERROR"));

    pub fn new(symbol: impl Into<Cow<'static, str>>) -> Self {
        SymbolicCode(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn status(&self) -> Option<u16> {
        SYMBOL_TABLE
            .iter()
            .find(|(symbol, _)| *symbol == self.0)
            .map(|(_, status)| *status)
    }
}

impl fmt::Display for SymbolicCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl CodeDomain for SymbolicCode {
    fn ok() -> Self {
        Self::OK
    }
    fn bad_request() -> Self {
        Self::BAD_REQUEST
    }
    fn unauthorized() -> Self {
        Self::UNAUTHORIZED
    }
    fn forbidden() -> Self {
        Self::FORBIDDEN
    }
    fn not_found() -> Self {
        Self::NOT_FOUND
    }
    fn conflict() -> Self {
        Self::CONFLICT
    }
    fn internal_server_error() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }

    fn is_success(&self) -> bool {
        matches!(self.status(), Some(s) if (200..300).contains(&s))
    }
    fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(s) if (400..500).contains(&s))
    }
    fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(s) if (500..600).contains(&s))
    }

    fn http_status(&self) -> u16 {
        self.status().unwrap_or(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_ranges() {
        assert!(204i32.is_success());
        assert!(!300i32.is_success());
        assert!(404i32.is_client_error());
        assert!(503i32.is_server_error());
        assert!(!600i32.is_server_error());
        assert_eq!((-1i32).http_status(), 500);
    }

    #[test]
    fn http_status_serializes_as_number() {
        let code = HttpStatus::not_found();
        assert_eq!(serde_json::to_string(&code).unwrap(), "404");
        let back: HttpStatus = serde_json::from_str("409").unwrap();
        assert_eq!(back, HttpStatus::conflict());
        assert!(serde_json::from_str::<HttpStatus>("42").is_err());
    }

    #[test]
    fn symbolic_codes_classify_through_table() {
        assert!(SymbolicCode::OK.is_success());
        assert!(SymbolicCode::new("CREATED").is_success());
        assert!(SymbolicCode::NOT_FOUND.is_client_error());
        assert!(SymbolicCode::INTERNAL_SERVER_ERROR.is_server_error());
        assert_eq!(SymbolicCode::CONFLICT.http_status(), 409);
    }

    #[test]
    fn unknown_symbol_is_unclassified_failure() {
        let code = SymbolicCode::new("QUOTA_EXHAUSTED");
        assert!(!code.is_success());
        assert!(!code.is_client_error());
        assert!(!code.is_server_error());
        assert_eq!(code.http_status(), 500);
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"QUOTA_EXHAUSTED\"");
    }
}
