//! The result envelope: one generic value type for operation outcomes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::code::{CodeDomain, HttpStatus, SymbolicCode};
use super::validation::ValidationErrors;
use crate::Error;

/// Outcome of an operation: success flag, code, optional message, payload,
/// validation errors and trace id.
///
/// Envelopes are immutable. The `with_*` methods return a modified copy and
/// leave the receiver untouched. `success` always agrees with
/// `code.is_success()`, `data` is only kept on success and validation errors
/// only on failure.
///
/// Deserialization goes through the same rules: `success` is recomputed from
/// the code, and fields that contradict it are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
#[serde(from = "RawEnvelope<T, C>")]
pub struct Envelope<T = (), C: CodeDomain = i32> {
    success: bool,
    code: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

/// Wire form of an [`Envelope`], before its invariants are applied.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct RawEnvelope<T, C: CodeDomain> {
    #[serde(default)]
    success: Option<bool>,
    code: C,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    validation_errors: Option<ValidationErrors>,
    #[serde(default)]
    trace_id: Option<String>,
    generated_at: DateTime<Utc>,
    #[serde(default)]
    data: Option<T>,
}

impl<T, C: CodeDomain> From<RawEnvelope<T, C>> for Envelope<T, C> {
    fn from(raw: RawEnvelope<T, C>) -> Self {
        let success = raw.code.is_success();
        if raw.success.is_some_and(|claimed| claimed != success) {
            tracing::warn!(
                "success flag disagrees with code {}, using {}",
                raw.code,
                success
            );
        }
        Self {
            success,
            code: raw.code,
            message: raw.message,
            validation_errors: raw
                .validation_errors
                .filter(|errors| !success && !errors.is_empty()),
            trace_id: raw.trace_id,
            generated_at: raw.generated_at,
            data: if success { raw.data } else { None },
        }
    }
}

/// Envelope with integer codes following the HTTP numbering convention.
pub type Response<T = ()> = Envelope<T, i32>;

/// Envelope carrying a real HTTP status code.
pub type StatusResponse<T = ()> = Envelope<T, HttpStatus>;

/// Envelope carrying symbolic string codes.
pub type SymbolicResponse<T = ()> = Envelope<T, SymbolicCode>;

impl<T, C: CodeDomain> Envelope<T, C> {
    fn build(code: C, message: Option<String>, data: Option<T>) -> Self {
        let success = code.is_success();
        Self {
            success,
            code,
            message,
            validation_errors: None,
            trace_id: None,
            generated_at: Utc::now(),
            data: if success { data } else { None },
        }
    }

    /// Success with a payload.
    pub fn success(data: T) -> Self {
        Self::build(C::ok(), None, Some(data))
    }

    /// Success without a payload.
    pub fn ok() -> Self {
        Self::build(C::ok(), None, None)
    }

    pub fn bad_request() -> Self {
        Self::build(C::bad_request(), None, None)
    }

    pub fn create_bad_request(message: impl Into<String>) -> Self {
        Self::build(C::bad_request(), Some(message.into()), None)
    }

    pub fn unauthorized() -> Self {
        Self::build(C::unauthorized(), None, None)
    }

    pub fn forbidden() -> Self {
        Self::build(C::forbidden(), None, None)
    }

    pub fn not_found() -> Self {
        Self::build(C::not_found(), None, None)
    }

    pub fn conflict() -> Self {
        Self::build(C::conflict(), None, None)
    }

    pub fn internal_server_error() -> Self {
        Self::build(C::internal_server_error(), None, None)
    }

    /// Failure with a caller-chosen code.
    ///
    /// The success flag still follows the code, so passing a success-range
    /// code yields a (payload-less) success envelope.
    pub fn create_error(code: C, message: Option<&str>) -> Self {
        if code.is_success() {
            tracing::warn!("create_error called with success code {}", code);
        }
        Self::build(code, message.map(str::to_string), None)
    }

    /// A 400 envelope carrying field-level validation errors.
    pub fn validation_failed(errors: ValidationErrors) -> Self {
        let mut envelope = Self::build(C::bad_request(), None, None);
        if !errors.is_empty() {
            envelope.validation_errors = Some(errors);
        }
        envelope
    }

    /// Converts an unexpected failure into a 500 envelope, keeping only its
    /// description.
    pub fn from_error<E: fmt::Display + ?Sized>(err: &E) -> Self {
        Self::build(C::internal_server_error(), Some(err.to_string()), None)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn code(&self) -> &C {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        self.validation_errors.as_ref()
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn is_success_status_code(&self) -> bool {
        self.code.is_success()
    }

    pub fn is_client_error(&self) -> bool {
        self.code.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.code.is_server_error()
    }

    /// Turns a failure envelope into [`Error::ResponseNotSuccessful`].
    pub fn ensure_success(&self) -> Result<(), Error> {
        if self.success {
            return Ok(());
        }
        Err(Error::ResponseNotSuccessful {
            code: self.code.to_string(),
            message: self.message.clone(),
        })
    }

    /// Maps the payload, keeping every other field.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U, C> {
        Envelope {
            success: self.success,
            code: self.code,
            message: self.message,
            validation_errors: self.validation_errors,
            trace_id: self.trace_id,
            generated_at: self.generated_at,
            data: self.data.map(f),
        }
    }

    /// Re-types the envelope, dropping any payload.
    pub fn without_data<U>(self) -> Envelope<U, C> {
        Envelope {
            success: self.success,
            code: self.code,
            message: self.message,
            validation_errors: self.validation_errors,
            trace_id: self.trace_id,
            generated_at: self.generated_at,
            data: None,
        }
    }
}

impl<T: Clone, C: CodeDomain> Envelope<T, C> {
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self.clone()
        }
    }

    /// Sets the trace id. An id that is already set is kept.
    pub fn with_trace_id(&self, trace_id: impl Into<String>) -> Self {
        let trace_id = trace_id.into();
        if let Some(existing) = &self.trace_id {
            if *existing != trace_id {
                tracing::warn!(
                    "trace id already set to {}, ignoring {}",
                    existing,
                    trace_id
                );
            }
            return self.clone();
        }
        Self {
            trace_id: Some(trace_id),
            ..self.clone()
        }
    }

    /// Attaches validation errors. Ignored on success envelopes.
    pub fn with_validation_errors(&self, errors: ValidationErrors) -> Self {
        if self.success {
            tracing::warn!("validation errors ignored on a success envelope");
            return self.clone();
        }
        Self {
            validation_errors: if errors.is_empty() { None } else { Some(errors) },
            ..self.clone()
        }
    }
}

impl<T, C: CodeDomain> From<Error> for Envelope<T, C> {
    fn from(err: Error) -> Self {
        match err {
            Error::UnknownSortField { .. } => Self::create_bad_request(err.to_string()),
            Error::ResponseNotSuccessful { .. } => Self::from_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: i64,
    }

    #[test]
    fn success_carries_payload() {
        let resp: Response<Payload> = Response::success(Payload { id: 7 });
        assert!(resp.is_success());
        assert_eq!(*resp.code(), 200);
        assert_eq!(resp.data(), Some(&Payload { id: 7 }));
        assert!(resp.is_success_status_code());
        assert!(resp.ensure_success().is_ok());
    }

    #[test]
    fn failure_factories_use_conventional_codes() {
        let cases: Vec<(Response, i32)> = vec![
            (Response::bad_request(), 400),
            (Response::unauthorized(), 401),
            (Response::forbidden(), 403),
            (Response::not_found(), 404),
            (Response::conflict(), 409),
            (Response::internal_server_error(), 500),
        ];
        for (resp, code) in cases {
            assert!(!resp.is_success());
            assert_eq!(*resp.code(), code);
            assert!(resp.data().is_none());
        }
    }

    #[test]
    fn not_found_fails_ensure_success() {
        let resp: Response = Response::not_found();
        let err = resp.ensure_success().unwrap_err();
        assert_eq!(
            err,
            Error::ResponseNotSuccessful {
                code: "404".to_string(),
                message: None
            }
        );
        assert!(resp.is_client_error());
    }

    #[test]
    fn create_error_keeps_caller_code() {
        let resp: Response = Response::create_error(418, Some("teapot"));
        assert!(!resp.is_success());
        assert_eq!(*resp.code(), 418);
        assert_eq!(resp.message(), Some("teapot"));
    }

    #[test]
    fn from_error_is_server_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let resp: Response = Response::from_error(&io);
        assert_eq!(*resp.code(), 500);
        assert!(resp.is_server_error());
        assert_eq!(resp.message(), Some("disk gone"));
    }

    #[test]
    fn with_methods_leave_receiver_untouched() {
        let original: Response = Response::bad_request();
        let errors = ValidationErrors::new().with("name", "required");

        let messaged = original.with_message("bad");
        let traced = original.with_trace_id("trace-1");
        let invalid = original.with_validation_errors(errors.clone());

        assert_eq!(original.message(), None);
        assert_eq!(original.trace_id(), None);
        assert_eq!(original.validation_errors(), None);

        assert_eq!(messaged.message(), Some("bad"));
        assert_eq!(traced.trace_id(), Some("trace-1"));
        assert_eq!(invalid.validation_errors(), Some(&errors));
        assert_eq!(messaged.generated_at(), original.generated_at());
        assert_eq!(*invalid.code(), 400);
    }

    #[test]
    fn trace_id_is_fixed_once_set() {
        let resp: Response = Response::ok().with_trace_id("first");
        let again = resp.with_trace_id("second");
        assert_eq!(again.trace_id(), Some("first"));
    }

    #[test]
    fn success_envelope_rejects_validation_errors() {
        let resp: Response = Response::ok();
        let same = resp.with_validation_errors(ValidationErrors::new().with("x", "y"));
        assert!(same.validation_errors().is_none());
        assert!(same.is_success());
    }

    #[test]
    fn unknown_sort_field_converts_to_bad_request() {
        let err = Error::UnknownSortField {
            path: "address.zip".to_string(),
            segment: "zip".to_string(),
            type_name: "Company",
        };
        let resp: Response<Vec<u8>> = err.into();
        assert_eq!(*resp.code(), 400);
        assert!(resp.message().unwrap().contains("zip"));
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_fields() {
        let resp: Response = Response::create_bad_request("nope")
            .with_validation_errors(ValidationErrors::new().with("name", "required"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 400);
        assert_eq!(json["message"], "nope");
        assert_eq!(json["validationErrors"]["name"][0], "required");
        assert!(json.get("traceId").is_none());
        assert!(json.get("data").is_none());
        assert!(json.get("generatedAt").is_some());
    }

    #[test]
    fn status_and_symbolic_domains_share_the_vocabulary() {
        let status: StatusResponse<Payload> = StatusResponse::success(Payload { id: 1 });
        assert!(status.is_success());
        assert_eq!(status.code().as_u16(), 200);

        let symbolic: SymbolicResponse = SymbolicResponse::not_found();
        assert_eq!(symbolic.code().as_str(), "NOT_FOUND");
        assert!(symbolic.is_client_error());
        let json = serde_json::to_value(&symbolic).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[test]
    fn map_and_without_data() {
        let resp: Response<Payload> = Response::success(Payload { id: 3 });
        let mapped = resp.clone().map(|p| p.id * 2);
        assert_eq!(mapped.data(), Some(&6));
        let bare: Response<String> = resp.without_data();
        assert!(bare.is_success());
        assert!(bare.data().is_none());
    }
}
