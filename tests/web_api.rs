mod mock_apis;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use deckwright::web::{app, AppState};
use deckwright::GeneratorConfig;
use mock_apis::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

const FORM: &str = "application/x-www-form-urlencoded";

fn router(config: GeneratorConfig) -> Router {
    app(AppState::new(config))
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_index_page() {
    let response = router(GeneratorConfig::default())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("<form"));
    assert!(html.contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_status_reports_configured_apis() {
    let config = GeneratorConfig::default().with_pixabay_key(PIXABAY_KEY);
    let response = router(config)
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["apis"],
        json!({"gemini": false, "pexels": false, "pixabay": true})
    );
    assert_eq!(body["image_sources"], json!(["pixabay", "placeholder"]));
    assert_eq!(body["model"], "gemini-2.5-pro");
}

#[tokio::test]
async fn test_topic_suggestions() {
    let response = router(GeneratorConfig::default())
        .oneshot(Request::get("/api/topics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let topics = body_json(response).await;
    let topics = topics.as_array().unwrap();
    assert_eq!(topics.len(), 20);
    assert_eq!(topics[0], "Machine Learning Fundamentals");
}

#[tokio::test]
async fn test_generate_without_content_key() {
    let response = router(GeneratorConfig::default())
        .oneshot(generate_request("topic=Ocean+Conservation&slide_count=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_generate_rejects_short_topic() {
    let config = GeneratorConfig::default().with_gemini_key("test-gemini-key");
    let response = router(config)
        .oneshot(generate_request("topic=AI&slide_count=5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("between 5 and 200"));
}

#[tokio::test]
async fn test_generate_rejects_unknown_image_source() {
    let config = GeneratorConfig::default().with_gemini_key("test-gemini-key");
    let response = router(config)
        .oneshot(generate_request(
            "topic=Ocean+Conservation&slide_count=5&image_source=flickr",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_rejects_malformed_slide_count() {
    let config = GeneratorConfig::default().with_gemini_key("test-gemini-key");
    for body in [
        "topic=Ocean+Conservation&slide_count=-1",
        "topic=Ocean+Conservation&slide_count=many",
        "topic=Ocean+Conservation",
    ] {
        let response = router(config.clone())
            .oneshot(generate_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Slide count"), "{body}");
    }
}

#[tokio::test]
async fn test_generate_rejects_non_form_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"topic":"Ocean Conservation","slide_count":5}"#))
        .unwrap();
    let response = router(GeneratorConfig::default())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_generate_returns_deck() {
    let server = MockServer::start().await;
    mount_gemini_outline(
        &server,
        &json!([
            {"title": "Ocean Conservation", "content": "• Why oceans matter", "slide_type": "title"},
            {"title": "Threats", "content": "• Plastics\n• Overfishing", "slide_type": "concepts"},
            {"title": "What Works", "content": "• Marine reserves", "slide_type": "advantages"}
        ]),
    )
    .await;

    let config = GeneratorConfig::default()
        .with_gemini_key("test-gemini-key")
        .with_gemini_base_url(server.uri());
    let response = router(config)
        .oneshot(generate_request(
            "topic=Ocean+Conservation&slide_count=3&image_source=placeholder",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Ocean_Conservation_presentation.pptx\""
    );

    let bytes = body_bytes(response).await;
    assert_eq!(
        slide_parts(&bytes),
        vec![
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml"
        ]
    );
}
