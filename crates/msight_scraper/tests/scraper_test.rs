//! Extractor tests against a throwaway local HTTP server.

use axum::{
    Json, Router,
    body::{Body, Bytes},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use msight_core::ScraperSettings;
use msight_error::{FetchErrorKind, MsightErrorKind};
use msight_interface::ContentExtractor;
use msight_scraper::WebpageScraper;
use std::net::SocketAddr;

const HOMEPAGE: &str = r#"<!doctype html>
<html>
  <head><title>Example</title></head>
  <body>
    <h2>T1</h2>
    <p>P1</p>
    <p>P2</p>
  </body>
</html>"#;

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn test_router() -> Router {
    Router::new()
        .route("/", get(|| async { Html(HOMEPAGE) }))
        .route("/blank", get(|| async { Html("<html><body></body></html>") }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "not here") }),
        )
        .route(
            "/broken",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/data.json",
            get(|| async { Json(serde_json::json!({"titles": []})) }),
        )
        .route(
            "/latin1",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=iso-8859-1")],
                    b"<html><body><h2>Caf\xE9</h2><p>Cr\xE8me br\xFBl\xE9e</p></body></html>".to_vec(),
                )
                    .into_response()
            }),
        )
        .route(
            "/chunked",
            get(|| async {
                // Streamed without a Content-Length, 64 chunks of 256 bytes.
                let chunks = (0..64).map(|_| Ok::<_, std::io::Error>(Bytes::from(vec![b'x'; 256])));
                (
                    [(header::CONTENT_TYPE, "text/html")],
                    Body::from_stream(futures::stream::iter(chunks)),
                )
                    .into_response()
            }),
        )
        .route(
            "/large",
            get(|| async { Html(format!("<p>{}</p>", "x".repeat(4096))) }),
        )
}

fn scraper() -> WebpageScraper {
    WebpageScraper::new(ScraperSettings::default()).unwrap()
}

#[tokio::test]
async fn test_extracts_homepage() {
    let addr = serve(test_router()).await;

    let content = scraper().extract(&format!("http://{addr}/")).await.unwrap();

    assert_eq!(content.titles(), &["T1"]);
    assert_eq!(content.paragraphs(), &["P1", "P2"]);
    assert!(content.images().is_empty());
}

#[tokio::test]
async fn test_page_without_elements_is_not_an_error() {
    let addr = serve(test_router()).await;

    let content = scraper()
        .extract(&format!("http://{addr}/blank"))
        .await
        .unwrap();

    assert!(content.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let addr = serve(test_router()).await;
    let scraper = scraper();

    for (path, expected) in [("missing", 404), ("broken", 500)] {
        let err = scraper
            .extract(&format!("http://{addr}/{path}"))
            .await
            .unwrap_err();
        match err.kind() {
            MsightErrorKind::Fetch(fetch) => match &fetch.kind {
                FetchErrorKind::Status { status, .. } => assert_eq!(*status, expected),
                other => panic!("Expected status error, got {other:?}"),
            },
            other => panic!("Expected fetch error, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_non_markup_body_is_parse_error() {
    let addr = serve(test_router()).await;

    let err = scraper()
        .extract(&format!("http://{addr}/data.json"))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), MsightErrorKind::Parse(_)));
}

#[tokio::test]
async fn test_declared_charset_is_decoded() {
    let addr = serve(test_router()).await;

    let content = scraper()
        .extract(&format!("http://{addr}/latin1"))
        .await
        .unwrap();

    assert_eq!(content.titles(), &["Café"]);
    assert_eq!(content.paragraphs(), &["Crème brûlée"]);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let addr = serve(test_router()).await;
    let scraper = WebpageScraper::new(ScraperSettings::new("msight-test", 1024)).unwrap();

    let err = scraper
        .extract(&format!("http://{addr}/large"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        MsightErrorKind::Fetch(fetch) if matches!(fetch.kind, FetchErrorKind::Body(_))
    ));
}

#[tokio::test]
async fn test_chunked_body_over_limit_is_rejected() {
    let addr = serve(test_router()).await;
    let scraper = WebpageScraper::new(ScraperSettings::new("msight-test", 1024)).unwrap();

    let err = scraper
        .extract(&format!("http://{addr}/chunked"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        MsightErrorKind::Fetch(fetch) if matches!(fetch.kind, FetchErrorKind::Body(_))
    ));
}

#[tokio::test]
async fn test_chunked_body_within_limit_is_read() {
    let addr = serve(test_router()).await;

    let content = scraper()
        .extract(&format!("http://{addr}/chunked"))
        .await
        .unwrap();

    assert!(content.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    // Reserve a port, then free it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = scraper()
        .extract(&format!("http://{addr}/"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        MsightErrorKind::Fetch(fetch) if matches!(fetch.kind, FetchErrorKind::Request(_))
    ));
}

#[tokio::test]
async fn test_invalid_url_never_hits_network() {
    let err = scraper().extract("not a url").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        MsightErrorKind::Fetch(fetch) if matches!(fetch.kind, FetchErrorKind::InvalidUrl(_))
    ));
}
