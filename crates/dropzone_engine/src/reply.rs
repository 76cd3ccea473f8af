use serde_json::Value;

use crate::{BackendReply, FailureKind, UploadFailure};

pub const CONFIRMATION_FIELD: &str = "uploadConfirmation";
pub const RESULT_FIELD: &str = "geminiResponse";
pub const MESSAGE_FIELD: &str = "message";

/// Interprets a finished HTTP exchange.
///
/// The body must be JSON whatever the status; a body that does not decode is
/// never blamed on the backend's verdict. A non-2xx status is a rejection that
/// may carry a `message` field. Bodies that are JSON but not objects simply
/// have no fields.
pub fn classify_reply(status: u16, body: &[u8]) -> Result<BackendReply, UploadFailure> {
    let value = serde_json::from_slice::<Value>(body).map_err(|err| {
        UploadFailure::new(FailureKind::UndecodableBody { status }, err.to_string())
    })?;

    if !(200..300).contains(&status) {
        return Err(UploadFailure::new(
            FailureKind::Rejected {
                status,
                message: text_field(&value, MESSAGE_FIELD),
            },
            format!("http status {status}"),
        ));
    }

    Ok(BackendReply {
        status,
        confirmation: text_field(&value, CONFIRMATION_FIELD),
        result: value.get(RESULT_FIELD).cloned(),
    })
}

/// Strings as-is, numbers and booleans as their JSON text. Null, arrays and
/// objects count as missing.
fn text_field(value: &Value, field: &str) -> Option<String> {
    match value.get(field)? {
        Value::String(text) => Some(text.clone()),
        scalar @ (Value::Number(_) | Value::Bool(_)) => Some(scalar.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
