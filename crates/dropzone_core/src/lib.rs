//! Dropzone core: intake validation, the upload state machine and the
//! response normalizer. Everything here is pure; IO lives in `dropzone_engine`.
mod blocks;
mod effect;
mod error;
mod intake;
mod msg;
mod normalize;
mod state;
mod update;
mod view_model;

pub use blocks::{CellValue, ListSection, RenderBlock, Severity, TableDescriptor, TableRow};
pub use effect::Effect;
pub use error::UploadError;
pub use intake::{validate, UploadCandidate, ACCEPTED_MEDIA_TYPE};
pub use msg::{Msg, UploadOutcome};
pub use normalize::{
    classify, normalize, ItemGroup, NamedFields, PayloadShape, DEFAULT_TABLE_TITLE,
    GROUPS_FIELD, ROWS_FIELD, SUBJECT_FIELD, UNEXPECTED_FORMAT_MESSAGE,
};
pub use state::{
    AppState, RequestToken, UploadStage, UploadState, DEFAULT_CONFIRMATION_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, Phase, ProgressView, PROGRESS_LABEL};
