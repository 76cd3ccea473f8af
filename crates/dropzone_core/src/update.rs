use dropzone_logging::{dropzone_debug, dropzone_info};

use crate::{intake, AppState, Effect, Msg, UploadCandidate, UploadError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesDropped(candidates) => {
            let mut candidates = candidates.into_iter();
            let Some(candidate) = candidates.next() else {
                return (state, Vec::new());
            };
            let ignored = candidates.count();
            if ignored > 0 {
                dropzone_debug!("Ignoring {} additional dropped file(s)", ignored);
            }
            // Drops are accepted even while uploading; the new request supersedes.
            submit(&mut state, candidate)
        }
        Msg::FilePicked(candidate) => {
            if state.is_uploading() {
                dropzone_debug!("Select ignored while an upload is in progress");
                return (state, Vec::new());
            }
            match candidate {
                Some(candidate) => submit(&mut state, candidate),
                None => Vec::new(),
            }
        }
        Msg::UploadProgress {
            token,
            stage,
            bytes,
        } => {
            if !state.apply_progress(token, stage, bytes) {
                dropzone_debug!("Dropping progress for superseded request {}", token);
            }
            Vec::new()
        }
        Msg::UploadCompleted { token, outcome } => {
            if !state.apply_outcome(token, outcome) {
                dropzone_debug!(
                    "Discarding completion for request {} (latest is {})",
                    token,
                    state.latest_token()
                );
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, candidate: UploadCandidate) -> Vec<Effect> {
    if !intake::validate(&candidate) {
        dropzone_info!(
            "Rejected {:?}: declared type {:?}",
            candidate.name,
            candidate.media_type
        );
        state.reject(UploadError::InvalidFileType);
        return Vec::new();
    }

    let token = state.begin_upload(&candidate.name);
    dropzone_info!(
        "Submitting {:?} ({} bytes) as request {}",
        candidate.name,
        candidate.size,
        token
    );
    vec![Effect::SubmitUpload { token, candidate }]
}
