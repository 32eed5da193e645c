//! Integration tests for the merge-and-download flow.

use std::path::PathBuf;
use std::sync::Mutex;

use remap_client::{DirectorySink, FileSink, MergeError, MergeTransport, execute, run_download};
use remap_core::{
    DOWNLOAD_FAILED_MESSAGE, DownloadControl, DownloadOutcome, Effect, FileId, FileSession,
    HeaderSource, MappingController, MappingMessage, MergeRequest, ToastKind,
};

enum Canned {
    Bytes(&'static [u8]),
    Status(u16, &'static str),
    Offline,
}

struct FakeTransport {
    canned: Canned,
    requests: Mutex<Vec<MergeRequest>>,
}

impl FakeTransport {
    fn new(canned: Canned) -> Self {
        Self {
            canned,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<MergeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl MergeTransport for FakeTransport {
    async fn merge(&self, request: &MergeRequest) -> remap_client::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        match self.canned {
            Canned::Bytes(bytes) => Ok(bytes.to_vec()),
            Canned::Status(status, body) => Err(MergeError::Server {
                status,
                message: body.to_string(),
            }),
            Canned::Offline => Err(MergeError::Network("connection refused".to_string())),
        }
    }
}

struct FullDisk;

impl FileSink for FullDisk {
    fn save(&self, _filename: &str, _bytes: &[u8]) -> remap_client::Result<PathBuf> {
        Err(MergeError::Io("no space left on device".to_string()))
    }
}

fn email_controller() -> (MappingController, FileId) {
    let id = FileId::new("42").unwrap();
    let mut controller = MappingController::new();
    controller
        .register(
            FileSession::new(
                id.clone(),
                "data.xlsx",
                vec!["Email2".to_string()],
                vec!["Email".to_string()],
            )
            .unwrap(),
        )
        .unwrap();
    controller.update(MappingMessage::DragStarted {
        file_id: id.clone(),
        header: "Email2".to_string(),
        source: HeaderSource::Extra,
    });
    controller.update(MappingMessage::Dropped {
        file_id: id.clone(),
        target: "Email".to_string(),
        target_source: HeaderSource::Missing,
    });
    (controller, id)
}

#[tokio::test]
async fn success_saves_csv_named_after_upload() {
    let (mut controller, id) = email_controller();
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let transport = FakeTransport::new(Canned::Bytes(b"Email\nme@example.com\n"));

    let outcome = run_download(&mut controller, &transport, &sink, &id)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DownloadOutcome::Saved {
            filename: "data.csv".to_string()
        }
    );
    let saved = std::fs::read(dir.path().join("data.csv")).unwrap();
    assert_eq!(saved, b"Email\nme@example.com\n");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].file_id, id);
    assert_eq!(
        requests[0].payload.to_json().unwrap(),
        r#"{"mappings":{"Email2":"Email"}}"#
    );

    let session = controller.session(&id).unwrap();
    assert_eq!(session.download_control(), DownloadControl::Ready);
    assert_eq!(controller.toast().unwrap().kind, ToastKind::Success);
}

#[tokio::test]
async fn server_error_shows_body_and_saves_nothing() {
    let (mut controller, id) = email_controller();
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let transport = FakeTransport::new(Canned::Status(500, "bad mapping"));

    let outcome = run_download(&mut controller, &transport, &sink, &id)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        DownloadOutcome::Failed {
            message: "bad mapping".to_string()
        }
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let toast = controller.toast().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "bad mapping");

    let session = controller.session(&id).unwrap();
    assert_eq!(session.mapping().get("Email2"), Some("Email"));
    assert_eq!(session.history_len(), 1);
    assert_eq!(session.download_control(), DownloadControl::Ready);
}

#[tokio::test]
async fn empty_error_body_uses_generic_message() {
    let (mut controller, id) = email_controller();
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(Canned::Status(503, ""));

    run_download(&mut controller, &transport, &DirectorySink::new(dir.path()), &id).await;

    assert_eq!(controller.toast().unwrap().message, DOWNLOAD_FAILED_MESSAGE);
}

#[tokio::test]
async fn network_failure_releases_control() {
    let (mut controller, id) = email_controller();
    let dir = tempfile::tempdir().unwrap();
    let transport = FakeTransport::new(Canned::Offline);

    let outcome = run_download(&mut controller, &transport, &DirectorySink::new(dir.path()), &id)
        .await
        .unwrap();

    assert!(!outcome.is_success());
    assert_eq!(
        controller.session(&id).unwrap().download_control(),
        DownloadControl::Ready
    );
    assert!(!controller.view(&id).unwrap().download.disabled);
}

#[tokio::test]
async fn save_failure_still_releases_control() {
    let (mut controller, id) = email_controller();
    let transport = FakeTransport::new(Canned::Bytes(b"x"));

    let outcome = run_download(&mut controller, &transport, &FullDisk, &id)
        .await
        .unwrap();

    let DownloadOutcome::Failed { message } = outcome else {
        panic!("expected failure");
    };
    assert!(message.contains("no space left"));
    assert_eq!(
        controller.session(&id).unwrap().download_control(),
        DownloadControl::Ready
    );
}

#[tokio::test]
async fn busy_exactly_while_request_is_pending() {
    let (mut controller, id) = email_controller();
    let dir = tempfile::tempdir().unwrap();
    let sink = DirectorySink::new(dir.path());
    let transport = FakeTransport::new(Canned::Bytes(b"x"));

    assert!(!controller.view(&id).unwrap().download.spinner);

    let Effect::Merge(request) = controller.update(MappingMessage::DownloadClicked(id.clone()))
    else {
        panic!("expected a merge request");
    };
    assert!(controller.view(&id).unwrap().download.spinner);

    // A second run while the first is pending does not issue a request.
    assert!(
        run_download(&mut controller, &transport, &sink, &id)
            .await
            .is_none()
    );
    assert!(transport.requests().is_empty());

    let outcome = execute(&transport, &sink, &request).await;
    assert!(controller.view(&id).unwrap().download.spinner);

    controller.update(MappingMessage::DownloadFinished {
        file_id: id.clone(),
        outcome,
    });
    assert!(!controller.view(&id).unwrap().download.spinner);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn unknown_file_issues_no_request() {
    let mut controller = MappingController::new();
    let transport = FakeTransport::new(Canned::Bytes(b"x"));
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_download(
        &mut controller,
        &transport,
        &DirectorySink::new(dir.path()),
        &FileId::new("missing").unwrap(),
    )
    .await;
    assert!(outcome.is_none());
    assert!(transport.requests().is_empty());
}
