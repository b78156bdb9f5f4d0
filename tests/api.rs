use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use pdfimages::convert::rasterize::IRasterizeService;
use pdfimages::convert::ConvertService;
use pdfimages::download::DownloadService;
use pdfimages::error::ConvertError;
use pdfimages::routes::create_app;
use pdfimages::state::ServiceCollection;
use pdfimages::upload::ImgbbUploadService;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Stands in for pdfium: only PDFs starting with `%PDF` render, one
/// `page-<n>` buffer per page.
struct FakeRasterize {
    pages: usize,
}

#[async_trait::async_trait]
impl IRasterizeService for FakeRasterize {
    async fn rasterize(&self, pdf: Bytes) -> Result<Vec<Vec<u8>>, ConvertError> {
        if !pdf.starts_with(b"%PDF") {
            return Err(ConvertError::Render("Could not open document.".to_string()));
        }
        Ok((1..=self.pages).map(|page| format!("page-{}", page).into_bytes()).collect())
    }
}

struct TestApp {
    address: String,
    origin: MockServer,
    imgbb: MockServer,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn(pages: usize) -> Self {
        Self::spawn_with_timeout(pages, Duration::from_secs(10)).await
    }

    async fn spawn_with_timeout(pages: usize, request_timeout: Duration) -> Self {
        let origin = MockServer::start().await;
        let imgbb = MockServer::start().await;
        let services = Arc::new(ServiceCollection {
            convert_service: Arc::new(ConvertService {
                download_service: Arc::new(DownloadService::build(Duration::from_secs(5)).unwrap()),
                rasterize_service: Arc::new(FakeRasterize { pages }),
                upload_service: Arc::new(ImgbbUploadService::build("test-key".to_string(), format!("{}/1/upload", imgbb.uri()), Duration::from_secs(5)).unwrap()),
                upload_parallelism: None,
            }),
        });
        let app = create_app(services, request_timeout);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::Server::from_tcp(listener).unwrap().serve(app.into_make_service()).await.unwrap();
        });

        TestApp {
            address,
            origin,
            imgbb,
            client: reqwest::Client::new(),
        }
    }

    async fn serve_pdf(&self, body: &'static [u8]) {
        Mock::given(method("GET"))
            .and(path("/report.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/pdf"))
            .mount(&self.origin)
            .await;
    }

    async fn host_page(&self, encoded_page: &str, url: &str) {
        Mock::given(method("POST"))
            .and(path("/1/upload"))
            .and(body_string_contains(&format!("image={}", encoded_page)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "url": url }, "success": true, "status": 200 })))
            .mount(&self.imgbb)
            .await;
    }

    async fn convert(&self, body: Value) -> (StatusCode, Value) {
        let response = self.client.post(format!("{}/api/convert-pdf", self.address)).json(&body).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    fn pdf_url(&self) -> String {
        format!("{}/report.pdf", self.origin.uri())
    }
}

#[tokio::test]
async fn converts_two_page_pdf_in_page_order() {
    let app = TestApp::spawn(2).await;
    app.serve_pdf(b"%PDF-1.4 two pages").await;
    app.host_page("cGFnZS0x", "https://i.ibb.co/urlA/page.png").await;
    app.host_page("cGFnZS0y", "https://i.ibb.co/urlB/page.png").await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "images": ["https://i.ibb.co/urlA/page.png", "https://i.ibb.co/urlB/page.png"] }));
}

#[tokio::test]
async fn same_pdf_twice_converts_twice() {
    let app = TestApp::spawn(1).await;
    app.serve_pdf(b"%PDF-1.4 one page").await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "url": "https://i.ibb.co/one/page.png" } })))
        .expect(2)
        .mount(&app.imgbb)
        .await;

    for _ in 0..2 {
        let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["images"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn missing_pdf_is_bad_request() {
    let app = TestApp::spawn(1).await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(404)).mount(&app.origin).await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Failed to download PDF. Status code: 404" }));
}

#[tokio::test]
async fn html_page_is_bad_request() {
    let app = TestApp::spawn(1).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html; charset=utf-8"))
        .mount(&app.origin)
        .await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // The mock server may normalise the header, so only the media type is pinned.
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("URL does not point to a PDF file. Content-Type: "));
    assert!(detail.contains("text/html"));
}

#[tokio::test]
async fn unrenderable_pdf_is_server_error() {
    let app = TestApp::spawn(1).await;
    app.serve_pdf(b"garbage").await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Error converting PDF to images." }));
}

#[tokio::test]
async fn empty_pdf_is_server_error() {
    let app = TestApp::spawn(0).await;
    app.serve_pdf(b"%PDF-1.4 no pages").await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "No images were generated." }));
}

#[tokio::test]
async fn one_failed_upload_returns_no_partial_list() {
    let app = TestApp::spawn(3).await;
    app.serve_pdf(b"%PDF-1.4 three pages").await;
    app.host_page("cGFnZS0x", "https://i.ibb.co/a/page.png").await;
    app.host_page("cGFnZS0y", "https://i.ibb.co/b/page.png").await;
    Mock::given(method("POST"))
        .and(body_string_contains("image=cGFnZS0z"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "status_code": 400, "error": { "message": "Invalid image." } })))
        .mount(&app.imgbb)
        .await;

    let (status, body) = app.convert(json!({ "url": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "detail": "Error uploading images." }));
}

#[tokio::test]
async fn malformed_url_is_unprocessable() {
    let app = TestApp::spawn(1).await;

    let (status, body) = app.convert(json!({ "url": "not a url" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("invalid URL"));

    let (status, _) = app.convert(json!({ "link": app.pdf_url() })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn root_and_health() {
    let app = TestApp::spawn(1).await;

    let root: Value = app.client.get(format!("{}/", app.address)).send().await.unwrap().json().await.unwrap();
    assert_eq!(root["name"], "pdfimages");
    assert_eq!(root["_links"]["convert"], "/api/convert-pdf");

    let health = app.client.get(format!("{}/health", app.address)).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn slow_origin_times_out_with_detail() {
    let app = TestApp::spawn_with_timeout(1, Duration::from_millis(300)).await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(&b"%PDF-1.4"[..], "application/pdf").set_delay(Duration::from_secs(3)))
        .mount(&app.origin)
        .await;

    let response = app.client.post(format!("{}/api/convert-pdf", app.address)).json(&json!({ "url": app.pdf_url() })).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "detail": "Request timed out." }));
}
