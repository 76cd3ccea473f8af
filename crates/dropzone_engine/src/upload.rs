use std::time::Duration;

use dropzone_logging::dropzone_debug;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};

use crate::reply::classify_reply;
use crate::{
    BackendReply, EngineEvent, FailureKind, RequestToken, Stage, UploadFailure, UploadProgress,
    UploadRequest,
};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/upload";
/// Multipart field the backend reads the document from.
pub const FILE_FIELD: &str = "pdf";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<BackendReply, UploadFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadFailure::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<BackendReply, UploadFailure> {
        let token = request.token;
        emit_stage(sink, token, Stage::Reading, None);
        let bytes = tokio::fs::read(&request.path).await.map_err(|err| {
            UploadFailure::new(
                FailureKind::Io,
                format!("reading {}: {err}", request.path.display()),
            )
        })?;
        let byte_len = bytes.len() as u64;

        let part = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)
            .map_err(|err| UploadFailure::new(FailureKind::Io, err.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let client = self.build_client()?;
        emit_stage(sink, token, Stage::Sending, Some(byte_len));
        let response = client
            .post(&self.settings.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        dropzone_debug!("Request {} answered with status {}", token, status);
        emit_stage(sink, token, Stage::Receiving, Some(0));

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            body.extend_from_slice(&chunk);
            emit_stage(sink, token, Stage::Receiving, Some(body.len() as u64));
        }

        classify_reply(status, &body)
    }
}

fn emit_stage(sink: &dyn ProgressSink, token: RequestToken, stage: Stage, bytes: Option<u64>) {
    sink.emit(EngineEvent::Progress(UploadProgress {
        token,
        stage,
        bytes,
    }));
}

fn map_reqwest_error(err: reqwest::Error) -> UploadFailure {
    if err.is_timeout() {
        return UploadFailure::new(FailureKind::Timeout, err.to_string());
    }
    UploadFailure::new(FailureKind::Network, err.to_string())
}
