//! Mapping envelopes onto an HTTP response: status from `code`, JSON body.

use ::http::StatusCode;
use serde::Serialize;

use crate::types::{CodeDomain, Envelope, ListEnvelope};

/// What a transport needs to send an envelope verbatim.
pub trait IntoHttpResponse {
    /// Status derived from the envelope code; 500 when the code has no valid status.
    fn status_code(&self) -> StatusCode;

    fn to_json(&self) -> Result<String, serde_json::Error>;
}

fn status_for<C: CodeDomain>(code: &C) -> StatusCode {
    StatusCode::from_u16(code.http_status()).unwrap_or_else(|_| {
        tracing::warn!("code {} has no HTTP status, sending 500", code);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

impl<T: Serialize, C: CodeDomain> IntoHttpResponse for Envelope<T, C> {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl<T: Serialize, C: CodeDomain> IntoHttpResponse for ListEnvelope<T, C> {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
