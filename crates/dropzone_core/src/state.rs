use serde::Serialize;
use serde_json::Value;

use crate::view_model::{AppViewModel, Phase, ProgressView};
use crate::{normalize, RenderBlock, UploadError, UploadOutcome};

/// Monotonic identifier of a submission. Only the latest one may settle state.
pub type RequestToken = u64;

/// Shown when the backend accepts an upload without its own confirmation text.
pub const DEFAULT_CONFIRMATION_MESSAGE: &str = "File uploaded successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStage {
    Reading,
    Sending,
    Receiving,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    InProgress {
        token: RequestToken,
        file_name: String,
        stage: Option<UploadStage>,
        bytes: Option<u64>,
    },
    Succeeded {
        confirmation: String,
        payload: Value,
        blocks: Vec<RenderBlock>,
    },
    Failed {
        error: UploadError,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    upload: UploadState,
    last_token: RequestToken,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let mut view = AppViewModel {
            phase: Phase::Idle,
            progress: None,
            success_message: None,
            error_message: None,
            blocks: Vec::new(),
            select_enabled: true,
            dirty: self.dirty,
        };
        match &self.upload {
            UploadState::Idle => {}
            UploadState::InProgress {
                file_name,
                stage,
                bytes,
                ..
            } => {
                view.phase = Phase::Uploading;
                view.select_enabled = false;
                view.progress = Some(ProgressView::new(file_name.clone(), *stage, *bytes));
            }
            UploadState::Succeeded {
                confirmation,
                blocks,
                ..
            } => {
                view.phase = Phase::Succeeded;
                view.success_message = Some(confirmation.clone());
                view.blocks = blocks.clone();
            }
            UploadState::Failed { error } => {
                view.phase = Phase::Failed;
                view.error_message = Some(error.to_string());
            }
        }
        view
    }

    pub fn upload(&self) -> &UploadState {
        &self.upload
    }

    pub fn latest_token(&self) -> RequestToken {
        self.last_token
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.upload, UploadState::InProgress { .. })
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a new submission, superseding whatever was current.
    pub(crate) fn begin_upload(&mut self, file_name: &str) -> RequestToken {
        let token = self.next_token();
        self.upload = UploadState::InProgress {
            token,
            file_name: file_name.to_string(),
            stage: None,
            bytes: None,
        };
        self.dirty = true;
        token
    }

    /// Settles the state with a local failure. Also retires any pending
    /// request, since a user action always supersedes it.
    pub(crate) fn reject(&mut self, error: UploadError) {
        self.next_token();
        self.upload = UploadState::Failed { error };
        self.dirty = true;
    }

    /// Returns false when `token` is not the current in-flight request.
    pub(crate) fn apply_progress(
        &mut self,
        token: RequestToken,
        stage: UploadStage,
        bytes: Option<u64>,
    ) -> bool {
        match &mut self.upload {
            UploadState::InProgress {
                token: current,
                stage: stage_slot,
                bytes: bytes_slot,
                ..
            } if *current == token => {
                *stage_slot = Some(stage);
                *bytes_slot = bytes;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Returns false when `token` is not the current in-flight request.
    pub(crate) fn apply_outcome(&mut self, token: RequestToken, outcome: UploadOutcome) -> bool {
        if !matches!(self.upload, UploadState::InProgress { token: current, .. } if current == token)
        {
            return false;
        }

        self.upload = match outcome {
            UploadOutcome::Accepted {
                confirmation,
                result,
            } => {
                let payload = result
                    .filter(|value| !value.is_null())
                    .unwrap_or_else(|| Value::Object(Default::default()));
                let blocks = normalize(&payload);
                UploadState::Succeeded {
                    confirmation: confirmation
                        .filter(|text| !text.is_empty())
                        .unwrap_or_else(|| DEFAULT_CONFIRMATION_MESSAGE.to_string()),
                    payload,
                    blocks,
                }
            }
            UploadOutcome::Rejected { message } => UploadState::Failed {
                error: UploadError::rejected(message),
            },
            UploadOutcome::TransportFailed => UploadState::Failed {
                error: UploadError::TransportFailure,
            },
        };
        self.dirty = true;
        true
    }

    fn next_token(&mut self) -> RequestToken {
        self.last_token += 1;
        self.last_token
    }
}
