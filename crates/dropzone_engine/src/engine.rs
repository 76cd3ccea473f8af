use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dropzone_logging::{dropzone_info, dropzone_warn};

use crate::upload::{ChannelProgressSink, ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, UploadRequest};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to spawn engine thread: {0}")]
    Thread(#[source] io::Error),
}

enum EngineCommand {
    Submit(UploadRequest),
}

/// Runs uploads on a background runtime. Every submission is independent:
/// nothing is cancelled or queued, and completions are reported in whatever
/// order they finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Result<Self, EngineError> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)))
    }

    pub fn with_uploader(uploader: Arc<dyn Uploader>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("dropzone-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let uploader = uploader.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(uploader.as_ref(), command, event_tx).await;
                    });
                }
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit(request));
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit(request) => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = uploader.upload(&request, &sink).await;
            match &result {
                Ok(reply) => dropzone_info!(
                    "Request {} for {:?} completed with status {}",
                    request.token,
                    request.file_name,
                    reply.status
                ),
                Err(failure) => dropzone_warn!(
                    "Request {} for {:?} failed: {} ({})",
                    request.token,
                    request.file_name,
                    failure.kind,
                    failure.message
                ),
            }
            let _ = event_tx.send(EngineEvent::UploadCompleted {
                token: request.token,
                result,
            });
        }
    }
}
