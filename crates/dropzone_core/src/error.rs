/// Fallback shown when the backend rejects an upload without a message.
pub(crate) const DEFAULT_REJECTION_MESSAGE: &str = "Error uploading file.";

/// User-facing failure of an upload attempt. `Display` is the exact text shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// Declared media type was not `application/pdf`. Never reaches the network.
    #[error("Invalid file type. Please upload a PDF file.")]
    InvalidFileType,
    /// Backend was reachable but refused the upload.
    #[error("{}", .message.as_deref().unwrap_or(DEFAULT_REJECTION_MESSAGE))]
    ServerRejection { message: Option<String> },
    /// Backend unreachable or the exchange broke down. Details stay in the log.
    #[error("An unexpected error occurred during file upload.")]
    TransportFailure,
}

impl UploadError {
    pub(crate) fn rejected(message: Option<String>) -> Self {
        UploadError::ServerRejection {
            message: message.filter(|m| !m.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::UploadError;

    #[test]
    fn rejection_prefers_server_message() {
        let err = UploadError::rejected(Some("bad doc".into()));
        assert_eq!(err.to_string(), "bad doc");
    }

    #[test]
    fn rejection_without_message_uses_default() {
        assert_eq!(UploadError::rejected(None).to_string(), "Error uploading file.");
        assert_eq!(
            UploadError::rejected(Some(String::new())).to_string(),
            "Error uploading file."
        );
    }

    #[test]
    fn transport_failure_is_generic() {
        assert_eq!(
            UploadError::TransportFailure.to_string(),
            "An unexpected error occurred during file upload."
        );
    }
}
