use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::page::IndexPage;
use super::AppState;
use crate::config::ApiAvailability;
use crate::generator::{
    output_file_name, GenerationRequest, PresentationGenerator, Progress, PPTX_MIME,
    TOPIC_SUGGESTIONS,
};
use crate::images::ImageSource;
use crate::Error;

#[derive(Debug, Serialize)]
pub(crate) struct ApiError {
    error: String,
}

fn err(status: StatusCode, msg: &str) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: msg.to_string(),
        }),
    )
}

fn error_status(e: &Error) -> StatusCode {
    match e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/status", get(status))
        .route("/api/topics", get(topics))
        .route("/api/generate", post(generate))
}

async fn index(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    let page = IndexPage::new(state.config.availability());
    page.render().map(Html).map_err(|e| {
        let e = Error::from(e);
        error!(error = %e, "failed to render index page");
        err(error_status(&e), &e.to_string())
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    apis: ApiAvailability,
    image_sources: Vec<ImageSource>,
    model: String,
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let apis = state.config.availability();
    Json(StatusResponse {
        apis,
        image_sources: apis.image_sources(),
        model: state.config.gemini_model.clone(),
    })
}

async fn topics() -> Json<Vec<&'static str>> {
    Json(TOPIC_SUGGESTIONS.to_vec())
}

/// Form body of `POST /api/generate`. A missing `include_images` counts as
/// unchecked, as browsers omit unchecked boxes. Fields are taken as text so
/// that malformed values are reported through [`ApiError`].
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateForm {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    slide_count: String,
    #[serde(default)]
    image_source: Option<String>,
    #[serde(default)]
    include_images: Option<String>,
}

impl GenerateForm {
    fn into_request(self, default_source: ImageSource) -> Result<GenerationRequest, Error> {
        let image_source = match self.image_source.as_deref().map(str::trim) {
            None | Some("") => default_source,
            Some(value) => value.parse()?,
        };
        let slide_count = self.slide_count.trim().parse::<usize>().map_err(|_| {
            Error::invalid_input(format!(
                "Slide count must be a whole number (got {:?})",
                self.slide_count
            ))
        })?;
        let include_images = matches!(
            self.include_images.as_deref().map(str::trim),
            Some("true" | "on" | "1" | "yes")
        );

        Ok(GenerationRequest::new(self.topic, slide_count)
            .image_source(image_source)
            .include_images(include_images))
    }
}

async fn generate(
    State(state): State<AppState>,
    form: Result<Form<GenerateForm>, FormRejection>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let Form(form) = form.map_err(|rejection| {
        warn!(error = %rejection, "malformed generate form");
        err(StatusCode::BAD_REQUEST, &rejection.body_text())
    })?;

    let fail = |e: Error| {
        let status = error_status(&e);
        if status.is_server_error() {
            error!(error = %e, "generation failed");
        } else {
            warn!(error = %e, "generation rejected");
        }
        err(status, &e.to_string())
    };

    let request = form
        .into_request(state.config.availability().default_image_source())
        .map_err(fail)?;
    request.validate().map_err(fail)?;
    let generator = PresentationGenerator::from_config(&state.config).map_err(fail)?;

    let output = tempfile::Builder::new()
        .prefix("deckwright-")
        .suffix(".pptx")
        .tempfile()
        .map_err(|e| fail(e.into()))?;

    let observer = |progress: Progress| debug!(percent = progress.percent(), ?progress, "progress");
    let generated = generator
        .generate(&request, output.path(), &observer)
        .await
        .map_err(fail)?;

    let bytes = tokio::fs::read(&generated.path)
        .await
        .map_err(|e| fail(e.into()))?;
    drop(output);

    info!(
        topic = %request.topic.trim(),
        slides = generated.slide_count,
        fallback = generated.used_fallback(),
        bytes = bytes.len(),
        "presentation ready"
    );

    let disposition = format!(
        "attachment; filename=\"{}\"",
        output_file_name(&request.topic)
    );
    Ok((
        [
            (header::CONTENT_TYPE, PPTX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
