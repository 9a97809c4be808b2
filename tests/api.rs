//! Diagram API integration tests.
//!
//! Drives the Axum router with Router::oneshot and a stub renderer, so no font
//! files are needed.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fen_diagram::api::{self, AppState};
use fen_diagram::diagram::{DiagramRequest, Render};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

#[derive(Default)]
struct StubRenderer {
    requests: Mutex<Vec<DiagramRequest>>,
}

impl Render for StubRenderer {
    fn render(&self, request: &DiagramRequest) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(FAKE_PNG.to_vec())
    }
}

struct FailingRenderer;

impl Render for FailingRenderer {
    fn render(&self, _request: &DiagramRequest) -> Result<Vec<u8>> {
        anyhow::bail!("encoder exploded")
    }
}

fn test_router(renderer: Arc<dyn Render>) -> Router {
    api::router(AppState {
        renderer,
        default_size: 800,
        max_size: 2000,
    })
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).into_owned()
}

#[tokio::test]
async fn test_missing_fen_is_rejected() {
    let stub = Arc::new(StubRenderer::default());
    let response = get(test_router(stub.clone()), "/diagram").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Invalid FEN");
    assert!(stub.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bad_sizes_are_rejected() {
    for size in ["abc", "-5", "2001", "0"] {
        let stub = Arc::new(StubRenderer::default());
        let uri = format!("/diagram?fen=8/8/8/8/8/8/8/8&size={size}");
        let response = get(test_router(stub.clone()), &uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "size={size}");
        assert_eq!(body_text(response).await, "Size should be a positive integer");
        assert!(stub.requests.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_attachment_by_default() {
    let stub = Arc::new(StubRenderer::default());
    let response = get(
        test_router(stub.clone()),
        "/diagram?fen=4k3/8/8/8/8/8/8/4K3%20w%20-%20-%200%201",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(headers[header::CONTENT_LENGTH], FAKE_PNG.len().to_string().as_str());

    let disposition = headers[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\""), "{disposition}");
    assert!(disposition.ends_with(".png\""), "{disposition}");
    let stamp = &disposition["attachment; filename=\"".len()..disposition.len() - ".png\"".len()];
    assert!(stamp.chars().all(|c| c.is_ascii_digit()), "{stamp}");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], FAKE_PNG);

    let requests = stub.requests.lock().unwrap();
    assert_eq!(
        requests[0],
        DiagramRequest {
            fen: "4k3/8/8/8/8/8/8/4K3 w - - 0 1".to_string(),
            reversed: false,
            size: 800,
        }
    );
}

#[tokio::test]
async fn test_inline_reversed_sized() {
    let stub = Arc::new(StubRenderer::default());
    let response = get(
        test_router(stub.clone()),
        "/diagram?fen=8/8/8/8/8/8/8/8&rev=1&inline=1&size=640px",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_DISPOSITION], "inline");

    let requests = stub.requests.lock().unwrap();
    assert!(requests[0].reversed);
    assert_eq!(requests[0].size, 640);
}

#[tokio::test]
async fn test_render_failure_is_server_error() {
    let response = get(test_router(Arc::new(FailingRenderer)), "/diagram?fen=8/8/8/8/8/8/8/8").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
