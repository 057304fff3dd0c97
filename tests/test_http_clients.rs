extern crate defect_overlay;

use std::time::Duration;
use defect_overlay::common::{CapturedFrame, CoordinateSpace, Detection, DetectionBatch, ScanConfig};
use defect_overlay::data::{CompanyHistoryFilter, ScanEvent, ScanEvents, ScanOwner};
use defect_overlay::detection_runners::{DetectionSource, HistoryClient, HttpDetector};
use defect_overlay::{render_overlay, ScanError};
use reqwest::StatusCode;

use stub_server::{Reply, StubServer};

const SAVED_BODY: &str = r#"{"id": "s1", "image_url": "http://localhost:8000/uploads/s1.jpg"}"#;

fn frame() -> CapturedFrame {
    CapturedFrame::from_jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9], 640, 480)
}

fn config_for(server: &StubServer) -> ScanConfig {
    let mut config = ScanConfig::default();
    config.api_base_url = server.base_url.clone();
    config
}

fn history_client(server: &StubServer) -> (HistoryClient, ScanEvents) {
    let events = ScanEvents::new();
    let client = HistoryClient::new(&config_for(server), events.clone()).unwrap();
    (client, events)
}

fn owner() -> ScanOwner {
    ScanOwner::new("u1", "one@example.com")
}

#[tokio::test]
async fn detector_posts_frame_and_parses_batch() {
    let server = StubServer::start(|_| Reply::json(200, r#"{"detections": [
        {"class": "scratch", "confidence": 0.87, "bbox": [100, 50, 300, 150]},
        {"class": "dent", "confidence": 0.5, "bbox": [1, 2]}
    ]}"#)).await;
    let detector = HttpDetector::new(&config_for(&server)).unwrap();

    let batch = detector.detect(&frame()).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(render_overlay(&batch, CoordinateSpace::reference(1280, 720).unwrap()).len(), 1);

    let request = server.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/v1/predict");
    assert!(request.header("content-type").unwrap().starts_with("multipart/form-data"));
    assert!(request.body_text().contains("name=\"file\"; filename=\"frame.jpg\""));
}

#[tokio::test]
async fn detector_error_status_is_a_transient_failure() {
    let server = StubServer::start(|_| Reply::json(503, "model loading")).await;
    let detector = HttpDetector::new(&config_for(&server)).unwrap();

    match detector.detect(&frame()).await {
        Err(err @ ScanError::UnexpectedStatus { .. }) => {
            assert!(err.is_transient());
            if let ScanError::UnexpectedStatus { status, text } = err {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(text, "model loading");
            }
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn detector_garbage_body_is_a_transient_failure() {
    let server = StubServer::start(|_| Reply::json(200, "<html>oops</html>")).await;
    let detector = HttpDetector::new(&config_for(&server)).unwrap();

    let err = detector.detect(&frame()).await.unwrap_err();
    assert!(matches!(err, ScanError::Json(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn save_scan_sends_fields_and_announces_the_scan() {
    let server = StubServer::start(|_| Reply::json(200, SAVED_BODY)).await;
    let (client, events) = history_client(&server);
    let rx = events.subscribe();
    assert_eq!(client.events().subscriber_count(), 1);

    let batch = DetectionBatch::new(vec![Detection::new("scratch", 0.9).with_bbox(10., 10., 100., 100.)]);
    let saved = client.save_scan("tok", &frame(), &batch, &owner()).await.unwrap();
    assert_eq!(saved.id, "s1");
    assert_eq!(saved.image_url.as_deref(), Some("http://localhost:8000/uploads/s1.jpg"));
    assert_eq!(rx.try_recv().unwrap(), ScanEvent::ScanSaved { id: "s1".to_string() });

    let request = server.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/api/v1/save_scan");
    assert_eq!(request.header("authorization"), Some("Bearer tok"));
    assert_eq!(request.form_field("status").as_deref(), Some("Attention"));
    assert_eq!(request.form_field("user_id").as_deref(), Some("u1"));
    assert_eq!(request.form_field("user_email").as_deref(), Some("one@example.com"));
    let sent: Vec<Detection> = serde_json::from_str(&request.form_field("detections").unwrap()).unwrap();
    assert_eq!(sent, batch.detections);

    client.save_scan("tok", &frame(), &DetectionBatch::empty(), &owner()).await.unwrap();
    assert_eq!(server.last().form_field("status").as_deref(), Some("Clean"));
    assert_eq!(server.last().form_field("detections").as_deref(), Some("[]"));
}

#[tokio::test]
async fn failed_save_announces_nothing() {
    let server = StubServer::start(|_| Reply::json(500, r#"{"detail": "disk full"}"#)).await;
    let (client, events) = history_client(&server);
    let rx = events.subscribe();

    let err = client.save_scan("tok", &frame(), &DetectionBatch::empty(), &owner()).await.unwrap_err();
    assert!(matches!(err, ScanError::UnexpectedStatus { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn list_clamps_the_limit() {
    let server = StubServer::start(|_| Reply::json(200, r#"{"history": [{"id": "a1", "status": "Clean"}]}"#)).await;
    let (client, _) = history_client(&server);

    let records = client.list("tok", 0).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "a1");
    client.list("tok", 500).await.unwrap();
    client.list("tok", 20).await.unwrap();

    let targets: Vec<String> = server.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(targets, vec![
        "/api/v1/history?limit=1",
        "/api/v1/history?limit=100",
        "/api/v1/history?limit=20",
    ]);
    assert_eq!(server.last().header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn delete_encodes_the_id_and_announces_only_on_success() {
    let server = StubServer::start(|req| {
        if req.target.ends_with("missing") {
            Reply::json(404, r#"{"detail": "not found"}"#)
        } else {
            Reply::json(200, r#"{"message": "deleted"}"#)
        }
    }).await;
    let (client, events) = history_client(&server);
    let rx = events.subscribe();

    client.delete("tok", "a/b c").await.unwrap();
    let request = server.last();
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.target, "/api/v1/history/a%2Fb%20c");
    assert_eq!(rx.try_recv().unwrap(), ScanEvent::ScanDeleted { id: "a/b c".to_string() });

    assert!(client.delete("tok", "missing").await.is_err());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn report_downloads_pdf_bytes() {
    let pdf = b"%PDF-1.4\n\xE2\xE3\xCF\xD3\n%%EOF";
    let server = StubServer::start(move |req| {
        if req.header("authorization") == Some("Bearer admin") {
            Reply::bytes(200, pdf)
        } else {
            Reply::json(403, r#"{"detail": "forbidden"}"#)
        }
    }).await;
    let (client, _) = history_client(&server);

    let report = client.report("admin", "r1").await.unwrap();
    assert_eq!(report, pdf.to_vec());
    assert_eq!(server.last().method, "GET");
    assert_eq!(server.last().target, "/api/v1/report/r1");

    match client.report("user", "r1").await {
        Err(ScanError::UnexpectedStatus { status, text }) => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert!(text.contains("forbidden"));
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn company_history_sends_the_filter() {
    let server = StubServer::start(|_| Reply::json(200, r#"{"history": []}"#)).await;
    let (client, _) = history_client(&server);

    let filter = CompanyHistoryFilter::default().with_defect_type("Scratch").with_user_id("u1");
    assert!(client.company_history("admin", &filter).await.unwrap().is_empty());
    assert_eq!(server.last().target, "/api/v1/company/history?defect_type=Scratch&user_id=u1");

    client.company_history("admin", &CompanyHistoryFilter::default()).await.unwrap();
    assert_eq!(server.last().target, "/api/v1/company/history");
}

#[test]
fn history_client_rejects_a_bad_base_url() {
    let mut config = ScanConfig::default();
    config.api_base_url = "not a url".to_string();
    assert!(matches!(HistoryClient::new(&config, ScanEvents::new()), Err(ScanError::InvalidUrl(_))));
}

#[tokio::test]
async fn history_client_uses_the_configured_timeout() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let mut config = ScanConfig::default();
    config.api_base_url = format!("http://{}/api/v1", addr);
    config.request_timeout_ms = 100;
    let client = HistoryClient::new(&config, ScanEvents::new()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), client.list("tok", 10))
        .await
        .expect("request outlived the configured timeout");
    match result {
        Err(ScanError::Request(err)) => assert!(err.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}
