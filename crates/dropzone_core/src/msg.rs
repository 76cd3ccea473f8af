use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Files dropped onto the intake area. Only the first one is considered.
    FilesDropped(Vec<crate::UploadCandidate>),
    /// File chosen through the select affordance; `None` when the picker was dismissed.
    FilePicked(Option<crate::UploadCandidate>),
    /// Engine progress for a submission. `bytes` is what the stage has moved so far.
    UploadProgress {
        token: crate::RequestToken,
        stage: crate::UploadStage,
        bytes: Option<u64>,
    },
    /// Engine completion for a submission.
    UploadCompleted {
        token: crate::RequestToken,
        outcome: UploadOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// How a submission ended, as far as the coordinator cares.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// 2xx with a decodable JSON body.
    Accepted {
        confirmation: Option<String>,
        result: Option<Value>,
    },
    /// Backend answered with a non-success status.
    Rejected { message: Option<String> },
    /// Backend unreachable, body undecodable, or any other breakdown.
    TransportFailed,
}
