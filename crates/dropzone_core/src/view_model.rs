use serde::Serialize;

use crate::{RenderBlock, UploadStage};

/// Text shown next to the progress indicator.
pub const PROGRESS_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressView {
    pub label: &'static str,
    pub file_name: String,
    pub stage: Option<UploadStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

impl ProgressView {
    pub(crate) fn new(file_name: String, stage: Option<UploadStage>, bytes: Option<u64>) -> Self {
        Self {
            label: PROGRESS_LABEL,
            file_name,
            stage,
            bytes,
        }
    }
}

/// Everything presentation needs. Progress, success and error are mutually
/// exclusive; `blocks` is only non-empty alongside a success message.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppViewModel {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub blocks: Vec<RenderBlock>,
    /// The explicit "select" affordance; disabled while uploading.
    pub select_enabled: bool,
    #[serde(skip)]
    pub dirty: bool,
}
