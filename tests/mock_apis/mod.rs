//! Wiremock stand-ins for the Gemini, Pexels and Pixabay APIs, plus helpers
//! for reading produced decks back.

#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::Path;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GEMINI_MODEL: &str = "gemini-2.5-pro";
pub const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-pro:generateContent";
pub const PEXELS_KEY: &str = "test-pexels-key";
pub const PIXABAY_KEY: &str = "test-pixabay-key";

/// A `generateContent` reply carrying `text` in one part.
pub fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 312,
            "candidatesTokenCount": 845,
            "totalTokenCount": 1157
        }
    })
}

/// Answer outline prompts with `outline` (any JSON value, wrapped in a fence).
pub async fn mount_gemini_outline(server: &MockServer, outline: &serde_json::Value) {
    let text = format!("Here is your outline:\n```json\n{outline:#}\n```");
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(header("x-goog-api-key", "test-gemini-key"))
        .and(body_string_contains("JSON array"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&text)))
        .mount(server)
        .await;
}

/// Answer image description prompts with `description`.
pub async fn mount_gemini_description(server: &MockServer, description: &str) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .and(body_string_contains("stock photo search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(description)))
        .mount(server)
        .await;
}

/// Fail every Gemini request with `status`, expecting exactly `calls` of them.
pub async fn mount_gemini_failure(server: &MockServer, status: u16, calls: u64) {
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("service unavailable"))
        .expect(calls)
        .mount(server)
        .await;
}

/// PNG bytes of a small solid image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 40]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Serve a search hit for every Pexels query pointing at `/photos/landscape.png`
/// on the same server, and serve that photo.
pub async fn mount_pexels_photo(server: &MockServer, searches: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("Authorization", PEXELS_KEY))
        .and(query_param("per_page", "1"))
        .and(query_param("orientation", "landscape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "per_page": 1,
            "photos": [{
                "id": 1,
                "src": {"original": format!("{}/photos/landscape.png", server.uri())}
            }]
        })))
        .expect(searches)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/photos/landscape.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(png_bytes(64, 48)),
        )
        .expect(searches)
        .mount(server)
        .await;
}

/// Serve a Pixabay hit pointing at `/get/photo.png` and that photo.
pub async fn mount_pixabay_photo(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("key", PIXABAY_KEY))
        .and(query_param("image_type", "photo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "totalHits": 1,
            "hits": [{
                "id": 7,
                "webformatURL": format!("{}/get/photo_640.png", server.uri()),
                "largeImageURL": format!("{}/get/photo.png", server.uri())
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/get/photo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(32, 32)))
        .mount(server)
        .await;
}

/// Read one part of a `.pptx` file as text.
pub fn read_part(deck: &Path, name: &str) -> String {
    let file = std::fs::File::open(deck).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut body = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut body)
        .unwrap();
    body
}

/// Names of the slide parts in a `.pptx` byte buffer.
pub fn slide_parts(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

pub fn slide_count(deck: &Path) -> usize {
    slide_parts(&std::fs::read(deck).unwrap()).len()
}

/// Text runs of a slide part, in document order, unescaped.
pub fn slide_texts(xml: &str) -> Vec<String> {
    let mut texts = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find("<a:t>") {
        let after = &rest[start + "<a:t>".len()..];
        let end = after.find("</a:t>").unwrap();
        texts.push(
            quick_xml::escape::unescape(&after[..end])
                .unwrap()
                .into_owned(),
        );
        rest = &after[end..];
    }
    texts
}

/// Paragraph count of the `n`th (0-based) text shape of a slide.
pub fn shape_paragraphs(xml: &str, n: usize) -> usize {
    let body = xml.split("<p:txBody>").nth(n + 1).unwrap();
    let body = &body[..body.find("</p:txBody>").unwrap()];
    body.matches("<a:p>").count()
}
