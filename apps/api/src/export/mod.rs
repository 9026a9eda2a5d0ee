//! Export: hands the rendered preview page to an external document renderer
//! and returns the PDF it produces.
//!
//! Rasterization and pagination belong to the renderer. This module only
//! defines the contract (HTML in, PDF bytes out) and the download file name.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

const DEFAULT_FILE_STEM: &str = "resume";
const RENDER_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Render service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Render service returned an empty document")]
    EmptyDocument,
}

/// Document renderer. Carried in `AppState` as `Arc<dyn Exporter>`.
#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, html: &str) -> Result<Vec<u8>, ExportError>;
}

/// Posts the page to an HTML-to-PDF service and returns the response body.
#[derive(Clone)]
pub struct RenderServiceExporter {
    client: Client,
    url: String,
}

impl RenderServiceExporter {
    pub fn new(url: impl Into<String>) -> Result<Self, ExportError> {
        Ok(Self {
            client: Client::builder().timeout(RENDER_TIMEOUT).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Exporter for RenderServiceExporter {
    async fn export(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        debug!("Rendering {} bytes of HTML via {}", html.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/html; charset=utf-8")
            .header(reqwest::header::ACCEPT, "application/pdf")
            .body(html.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Render service returned {status}: {message}");
            return Err(ExportError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyDocument);
        }
        Ok(bytes.to_vec())
    }
}

/// `<fullName>.pdf`, or `resume.pdf` when the name is blank. Characters that
/// would break a path or a quoted header value become `_`.
pub fn export_filename(full_name: &str) -> String {
    let stem = full_name.trim();
    let stem = if stem.is_empty() { DEFAULT_FILE_STEM } else { stem };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | '"' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Jane Doe"), "Jane Doe.pdf");
        assert_eq!(export_filename(""), "resume.pdf");
        assert_eq!(export_filename("   "), "resume.pdf");
        assert_eq!(export_filename("a/b\\c\"d"), "a_b_c_d.pdf");
    }

    #[tokio::test]
    async fn test_render_service_returns_pdf_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/render"))
            .and(header("content-type", "text/html; charset=utf-8"))
            .and(body_string_contains("resume-preview"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let exporter = RenderServiceExporter::new(format!("{}/render", server.uri())).unwrap();
        let pdf = exporter
            .export("<div id=\"resume-preview\"></div>")
            .await
            .unwrap();
        assert_eq!(pdf, b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_render_service_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("renderer crashed"))
            .mount(&server)
            .await;

        let exporter = RenderServiceExporter::new(server.uri()).unwrap();
        let err = exporter.export("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExportError::Service { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_empty_document_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let exporter = RenderServiceExporter::new(server.uri()).unwrap();
        let err = exporter.export("<html></html>").await.unwrap_err();
        assert!(matches!(err, ExportError::EmptyDocument));
    }
}
