use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use pdfdesk_core::{FileHandle, OperationRequest, OperationResult};
use pdfdesk_logging::desk_debug;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use url::Url;

use crate::wire::parse_operation_response;
use crate::{FailureKind, TransportError};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// No limit by default; a hung request keeps the indicator capped.
    pub request_timeout: Option<Duration>,
    pub max_artifact_bytes: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_artifact_bytes: 100 * 1024 * 1024,
        }
    }
}

/// The remote document-processing service.
#[async_trait::async_trait]
pub trait ProcessingService: Send + Sync {
    async fn submit(&self, request: &OperationRequest) -> Result<OperationResult, TransportError>;

    async fn retrieve(&self, filename: &str) -> Result<Bytes, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    client: reqwest::Client,
    base: Url,
    settings: ServiceSettings,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, TransportError> {
        let mut base = Url::parse(&settings.base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base,
            settings,
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, TransportError> {
        self.base
            .join(endpoint.trim_start_matches('/'))
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn download_url(&self, filename: &str) -> Result<Url, TransportError> {
        let mut url = self.endpoint_url("api/download/")?;
        url.path_segments_mut()
            .map_err(|_| TransportError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .push(filename);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ProcessingService for ReqwestService {
    async fn submit(&self, request: &OperationRequest) -> Result<OperationResult, TransportError> {
        let url = self.endpoint_url(request.endpoint())?;
        let builder = if request.is_multipart() {
            self.client.post(url).multipart(build_form(request).await?)
        } else {
            self.client.post(url).json(&json_body(request))
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        desk_debug!(
            "{} answered {} with {} bytes",
            request.endpoint(),
            status,
            body.len()
        );
        parse_operation_response(status.as_u16(), &body)
    }

    async fn retrieve(&self, filename: &str) -> Result<Bytes, TransportError> {
        let url = self.download_url(filename)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_artifact_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "artifact too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "artifact too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(bytes))
    }
}

async fn build_form(request: &OperationRequest) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for (field, value) in request.text_fields() {
        form = form.text(field, value);
    }
    for (field, file) in request.file_parts() {
        form = form.part(field, file_part(file).await?);
    }
    Ok(form)
}

async fn file_part(file: &FileHandle) -> Result<Part, TransportError> {
    let content = tokio::fs::read(file.path()).await.map_err(|err| {
        TransportError::new(
            FailureKind::FileRead,
            format!("{}: {err}", file.path().display()),
        )
    })?;
    Part::bytes(content)
        .file_name(file.name().to_string())
        .mime_str(mime_for(file.name()))
        .map_err(|err| TransportError::new(FailureKind::FileRead, err.to_string()))
}

fn mime_for(name: &str) -> &'static str {
    let is_pdf = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

fn json_body(request: &OperationRequest) -> Value {
    let fields: Map<String, Value> = request
        .text_fields()
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::String(value)))
        .collect();
    Value::Object(fields)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
