use std::time::Duration;

use dropzone_core::{Effect, Msg, UploadOutcome, UploadStage};
use dropzone_engine::{
    BackendReply, EngineError, EngineEvent, EngineHandle, FailureKind, Stage, UploadFailure,
    UploadRequest, UploadSettings,
};
use dropzone_logging::dropzone_info;

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: UploadSettings) -> Result<Self, EngineError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { token, candidate } => {
                    dropzone_info!(
                        "SubmitUpload token={} name={:?} size={}",
                        token,
                        candidate.name,
                        candidate.size
                    );
                    self.engine.submit(UploadRequest {
                        token,
                        path: candidate.path,
                        file_name: candidate.name,
                        media_type: candidate.media_type,
                    });
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine event, as a message.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(progress) => Msg::UploadProgress {
            token: progress.token,
            stage: map_stage(progress.stage),
            bytes: progress.bytes,
        },
        EngineEvent::UploadCompleted { token, result } => Msg::UploadCompleted {
            token,
            outcome: map_outcome(result),
        },
    }
}

fn map_stage(stage: Stage) -> UploadStage {
    match stage {
        Stage::Reading => UploadStage::Reading,
        Stage::Sending => UploadStage::Sending,
        Stage::Receiving => UploadStage::Receiving,
    }
}

fn map_outcome(result: Result<BackendReply, UploadFailure>) -> UploadOutcome {
    match result {
        Ok(reply) => UploadOutcome::Accepted {
            confirmation: reply.confirmation,
            result: reply.result,
        },
        Err(UploadFailure {
            kind: FailureKind::Rejected { message, .. },
            ..
        }) => UploadOutcome::Rejected { message },
        Err(_) => UploadOutcome::TransportFailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropzone_engine::UploadProgress;
    use serde_json::json;

    fn failure(kind: FailureKind) -> Result<BackendReply, UploadFailure> {
        Err(UploadFailure {
            kind,
            message: "detail".to_string(),
        })
    }

    #[test]
    fn rejection_keeps_server_message() {
        let outcome = map_outcome(failure(FailureKind::Rejected {
            status: 422,
            message: Some("bad doc".to_string()),
        }));
        assert_eq!(
            outcome,
            UploadOutcome::Rejected {
                message: Some("bad doc".to_string())
            }
        );
    }

    #[test]
    fn other_failures_are_transport_failures() {
        for kind in [
            FailureKind::UndecodableBody { status: 200 },
            FailureKind::Io,
            FailureKind::Timeout,
            FailureKind::Network,
        ] {
            assert_eq!(map_outcome(failure(kind)), UploadOutcome::TransportFailed);
        }
    }

    #[test]
    fn progress_keeps_stage_and_byte_count() {
        let msg = map_event(EngineEvent::Progress(UploadProgress {
            token: 4,
            stage: Stage::Sending,
            bytes: Some(2048),
        }));
        assert_eq!(
            msg,
            Msg::UploadProgress {
                token: 4,
                stage: UploadStage::Sending,
                bytes: Some(2048),
            }
        );
    }

    #[test]
    fn reply_maps_to_accepted() {
        let outcome = map_outcome(Ok(BackendReply {
            status: 200,
            confirmation: Some("ok".to_string()),
            result: Some(json!([])),
        }));
        assert_eq!(
            outcome,
            UploadOutcome::Accepted {
                confirmation: Some("ok".to_string()),
                result: Some(json!([])),
            }
        );
    }
}
