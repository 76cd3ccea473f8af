use std::time::{Duration, Instant};

use dropzone_engine::{
    EngineEvent, EngineHandle, FailureKind, UploadRequest, UploadSettings,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completions(engine: &EngineHandle, expected: usize) -> Vec<(u64, Option<String>)> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut done = Vec::new();
    while done.len() < expected && Instant::now() < deadline {
        if let Some(EngineEvent::UploadCompleted { token, result }) =
            engine.recv_timeout(Duration::from_millis(100))
        {
            let confirmation = result.ok().and_then(|reply| reply.confirmation);
            done.push((token, confirmation));
        }
    }
    done
}

fn request(dir: &TempDir, token: u64, content: &str) -> UploadRequest {
    let path = dir.path().join(format!("doc{token}.pdf"));
    std::fs::write(&path, content).unwrap();
    UploadRequest {
        token,
        path,
        file_name: format!("doc{token}.pdf"),
        media_type: "application/pdf".to_string(),
    }
}

#[test]
fn completions_arrive_in_finish_order() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("slow-document"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(400))
                    .set_body_json(json!({"uploadConfirmation": "slow"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("fast-document"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"uploadConfirmation": "fast"})),
            )
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(UploadSettings {
        endpoint: format!("{}/upload", server.uri()),
        ..UploadSettings::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();

    engine.submit(request(&dir, 1, "slow-document"));
    engine.submit(request(&dir, 2, "fast-document"));

    let done = completions(&engine, 2);
    assert_eq!(
        done,
        vec![(2, Some("fast".to_string())), (1, Some("slow".to_string()))]
    );
}

#[test]
fn failures_are_reported_as_events() {
    let engine = EngineHandle::new(UploadSettings::default()).unwrap();
    let dir = TempDir::new().unwrap();

    engine.submit(UploadRequest {
        token: 9,
        path: dir.path().join("missing.pdf"),
        file_name: "missing.pdf".to_string(),
        media_type: "application/pdf".to_string(),
    });

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        assert!(Instant::now() < deadline, "no completion event");
        if let Some(EngineEvent::UploadCompleted { token, result }) =
            engine.recv_timeout(Duration::from_millis(100))
        {
            assert_eq!(token, 9);
            assert_eq!(result.unwrap_err().kind, FailureKind::Io);
            break;
        }
    }
}
