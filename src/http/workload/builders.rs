use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Request};

use crate::domain::run::{Payload, RunConfig};
use crate::error::{AppError, AppResult, HttpError};
use crate::http::headers::header_map_from_spec;

/// Form field carrying the uploaded file.
const MULTIPART_FIELD: &str = "file";
const MULTIPART_FILE_MIME: &str = "application/octet-stream";

/// Builds a fresh request for one attempt. Configured headers are applied
/// last, so they override the generated multipart `Content-Type`.
pub(crate) async fn build_request(client: &Client, config: &RunConfig) -> AppResult<Request> {
    let mut request_builder = client.request(config.method.clone(), config.url.clone());

    request_builder = match &config.payload {
        Payload::Body(body) if body.is_empty() => request_builder,
        Payload::Body(body) => request_builder.body(body.clone()),
        Payload::Multipart { path } => request_builder.multipart(build_multipart(path).await?),
    };

    request_builder
        .headers(header_map_from_spec(&config.header_spec))
        .build()
        .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))
}

async fn build_multipart(path: &Path) -> AppResult<Form> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        AppError::http(HttpError::ReadMultipartFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let file_name = path
        .file_name()
        .and_then(|value| value.to_str())
        .unwrap_or(MULTIPART_FIELD)
        .to_owned();
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(MULTIPART_FILE_MIME)
        .map_err(|err| AppError::http(HttpError::BuildRequestFailed { source: err }))?;
    Ok(Form::new().part(MULTIPART_FIELD, part))
}
