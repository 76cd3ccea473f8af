use dropzone_core::{
    update, AppState, Effect, Msg, Phase, UploadCandidate, UploadOutcome, UploadStage,
};
use serde_json::json;

fn pdf(name: &str) -> UploadCandidate {
    UploadCandidate::new(format!("/docs/{name}"), name, "application/pdf", 2048)
}

fn token_of(effects: &[Effect]) -> u64 {
    match effects {
        [Effect::SubmitUpload { token, .. }] => *token,
        other => panic!("expected one submit effect, got {other:?}"),
    }
}

fn accepted(confirmation: &str) -> UploadOutcome {
    UploadOutcome::Accepted {
        confirmation: Some(confirmation.to_string()),
        result: Some(json!([{"doc": confirmation}])),
    }
}

#[test]
fn tokens_increase_per_submission() {
    let (state, first) = update(AppState::new(), Msg::FilesDropped(vec![pdf("a.pdf")]));
    let (state, second) = update(state, Msg::FilesDropped(vec![pdf("b.pdf")]));

    assert_eq!(token_of(&first), 1);
    assert_eq!(token_of(&second), 2);
    assert_eq!(state.latest_token(), 2);
}

#[test]
fn later_submission_wins_over_later_resolution() {
    let (state, first) = update(AppState::new(), Msg::FilesDropped(vec![pdf("a.pdf")]));
    let first = token_of(&first);
    // A second drop while the first request is still in flight.
    let (state, second) = update(state, Msg::FilesDropped(vec![pdf("b.pdf")]));
    let second = token_of(&second);

    // The second request resolves first...
    let (state, _) = update(
        state,
        Msg::UploadCompleted {
            token: second,
            outcome: accepted("second"),
        },
    );
    assert_eq!(state.view().success_message.as_deref(), Some("second"));

    // ...and the first one's late answer must not overwrite it.
    let (mut state, _) = update(
        state,
        Msg::UploadCompleted {
            token: first,
            outcome: accepted("first"),
        },
    );
    let view = state.view();
    assert_eq!(view.phase, Phase::Succeeded);
    assert_eq!(view.success_message.as_deref(), Some("second"));
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::UploadCompleted {
            token: first,
            outcome: UploadOutcome::TransportFailed,
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.view().phase, Phase::Succeeded);
}

#[test]
fn stale_resolution_while_latest_pending_is_ignored() {
    let (state, first) = update(AppState::new(), Msg::FilesDropped(vec![pdf("a.pdf")]));
    let (state, second) = update(state, Msg::FilesDropped(vec![pdf("b.pdf")]));

    let (state, _) = update(
        state,
        Msg::UploadCompleted {
            token: token_of(&first),
            outcome: UploadOutcome::Rejected {
                message: Some("old".to_string()),
            },
        },
    );
    assert_eq!(state.view().phase, Phase::Uploading);
    assert_eq!(state.view().progress.unwrap().file_name, "b.pdf");

    let (state, _) = update(
        state,
        Msg::UploadCompleted {
            token: token_of(&second),
            outcome: UploadOutcome::Rejected {
                message: Some("new".to_string()),
            },
        },
    );
    assert_eq!(state.view().error_message.as_deref(), Some("new"));
}

#[test]
fn stale_progress_is_ignored() {
    let (state, first) = update(AppState::new(), Msg::FilesDropped(vec![pdf("a.pdf")]));
    let (mut state, _) = update(state, Msg::FilesDropped(vec![pdf("b.pdf")]));
    state.consume_dirty();

    let (mut state, _) = update(
        state,
        Msg::UploadProgress {
            token: token_of(&first),
            stage: UploadStage::Receiving,
            bytes: Some(10),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.view().progress.unwrap().stage, None);
}

#[test]
fn rejected_drop_retires_in_flight_request() {
    let (state, first) = update(AppState::new(), Msg::FilesDropped(vec![pdf("a.pdf")]));
    let text = UploadCandidate::new("/docs/x.txt", "x.txt", "text/plain", 1);
    let (state, effects) = update(state, Msg::FilesDropped(vec![text]));
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::UploadCompleted {
            token: token_of(&first),
            outcome: accepted("late"),
        },
    );
    assert_eq!(state.view().phase, Phase::Failed);
    assert_eq!(
        state.view().error_message.as_deref(),
        Some("Invalid file type. Please upload a PDF file.")
    );
}
