//! Dropzone engine: IO pipeline and effect execution.
mod engine;
mod reply;
mod types;
mod upload;

pub use engine::{EngineError, EngineHandle};
pub use reply::{classify_reply, CONFIRMATION_FIELD, MESSAGE_FIELD, RESULT_FIELD};
pub use types::{
    BackendReply, EngineEvent, FailureKind, RequestToken, Stage, UploadFailure, UploadProgress,
    UploadRequest,
};
pub use upload::{
    ChannelProgressSink, ProgressSink, ReqwestUploader, UploadSettings, Uploader,
    DEFAULT_ENDPOINT, FILE_FIELD,
};
