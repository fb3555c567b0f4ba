use pdfdesk_core::OperationResult;
use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, TransportError};

#[derive(Debug, Deserialize)]
struct WireResponse {
    success: bool,
    message: Option<String>,
    filename: Option<String>,
    // Split reports its artifacts under `files`.
    #[serde(alias = "files")]
    filenames: Option<Vec<String>>,
    preview: Option<String>,
    error: Option<String>,
}

impl From<WireResponse> for OperationResult {
    fn from(wire: WireResponse) -> Self {
        OperationResult {
            success: wire.success,
            message: wire.message,
            filename: wire.filename,
            filenames: wire.filenames,
            preview: wire.preview,
            error: wire.error,
        }
    }
}

/// Interpret a service reply. Anything without a boolean `success` field is a
/// transport error, whatever the HTTP status.
pub fn parse_operation_response(status: u16, body: &[u8]) -> Result<OperationResult, TransportError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        TransportError::new(
            failure_for(status),
            format!("response is not valid JSON: {err}"),
        )
    })?;

    if !value.get("success").is_some_and(Value::is_boolean) {
        let message = match value.get("error").and_then(Value::as_str) {
            Some(error) => format!("response has no success flag (server said: {error})"),
            None => "response has no success flag".to_string(),
        };
        return Err(TransportError::new(failure_for(status), message));
    }

    let wire: WireResponse = serde_json::from_value(value).map_err(|err| {
        TransportError::new(
            FailureKind::MalformedResponse,
            format!("unexpected response shape: {err}"),
        )
    })?;
    Ok(wire.into())
}

fn failure_for(status: u16) -> FailureKind {
    if (200..300).contains(&status) {
        FailureKind::MalformedResponse
    } else {
        FailureKind::HttpStatus(status)
    }
}
