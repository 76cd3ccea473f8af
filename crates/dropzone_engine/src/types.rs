use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

pub type RequestToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Sending,
    Receiving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    pub token: RequestToken,
    pub stage: Stage,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Progress(UploadProgress),
    UploadCompleted {
        token: RequestToken,
        result: Result<BackendReply, UploadFailure>,
    },
}

/// One file to post. The engine reads it from disk when the upload starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub token: RequestToken,
    pub path: PathBuf,
    pub file_name: String,
    pub media_type: String,
}

/// A 2xx answer with a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: u16,
    pub confirmation: Option<String>,
    pub result: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub kind: FailureKind,
    /// Technical detail for the log. Never shown to the user.
    pub message: String,
}

impl UploadFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-2xx status with a JSON body, carrying its `message` field when present.
    Rejected { status: u16, message: Option<String> },
    /// The body was not JSON, whatever the status.
    UndecodableBody { status: u16 },
    /// The candidate file could not be read.
    Io,
    Timeout,
    Network,
}

impl FailureKind {
    /// True when the backend was reached and refused the upload.
    pub fn is_server_rejection(&self) -> bool {
        matches!(self, FailureKind::Rejected { .. })
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Rejected { status, .. } => write!(f, "rejected with http status {status}"),
            FailureKind::UndecodableBody { status } => {
                write!(f, "undecodable body with http status {status}")
            }
            FailureKind::Io => write!(f, "file read error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
