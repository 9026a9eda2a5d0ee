pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::preview::handlers as preview;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/form-schema", get(editor::handle_form_schema))
        // Sessions
        .route("/api/v1/sessions", post(editor::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(editor::handle_get_session).delete(editor::handle_delete_session),
        )
        // Editor
        .route("/api/v1/sessions/:id/resume", get(editor::handle_get_resume))
        .route(
            "/api/v1/sessions/:id/resume/commands",
            post(editor::handle_command),
        )
        .route(
            "/api/v1/sessions/:id/resume/fields/:field",
            patch(editor::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/resume/:section/entries",
            post(editor::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/resume/:section/entries/:index",
            patch(editor::handle_update_entry).delete(editor::handle_remove_entry),
        )
        // Preview & export
        .route("/api/v1/sessions/:id/preview", get(preview::handle_preview))
        .route(
            "/api/v1/sessions/:id/preview.html",
            get(preview::handle_preview_html),
        )
        .route("/api/v1/sessions/:id/export", get(export::handle_export))
        // Assistant
        .route(
            "/api/v1/sessions/:id/assistant",
            get(assistant::handle_get_assistant),
        )
        .route(
            "/api/v1/sessions/:id/assistant/messages",
            post(assistant::handle_send_message),
        )
        .route(
            "/api/v1/sessions/:id/assistant/feedback",
            post(assistant::handle_request_feedback),
        )
        .route(
            "/api/v1/sessions/:id/assistant/upload",
            // Uploaded resumes are read fully into memory with no size cap.
            post(assistant::handle_upload).layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/api/v1/sessions/:id/assistant/analyze",
            post(assistant::handle_analyze_upload),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::export::{ExportError, Exporter};
    use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};
    use crate::session::SessionStore;

    struct EchoClient;

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn generate(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            if request.attachment.is_some() {
                Ok("Reviewed your file.".to_string())
            } else {
                Ok("Great start!".to_string())
            }
        }
    }

    struct FakePdf;

    #[async_trait]
    impl Exporter for FakePdf {
        async fn export(&self, html: &str) -> Result<Vec<u8>, ExportError> {
            Ok(format!("%PDF {}", html.len()).into_bytes())
        }
    }

    fn app(exporter: Option<Arc<dyn Exporter>>) -> Router {
        build_router(AppState {
            sessions: SessionStore::new(),
            llm: Arc::new(EchoClient),
            exporter,
        })
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes) = send(app, request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_session(app: &Router) -> String {
        let (status, body) = send_json(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_new_session_has_blank_resume_and_greeting() {
        let app = app(None);
        let (status, body) = send_json(&app, "POST", "/api/v1/sessions", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["revision"], 0);
        assert_eq!(body["resume"]["fullName"], "");
        assert_eq!(body["resume"]["education"].as_array().unwrap().len(), 1);
        assert_eq!(body["assistant"]["state"], "idle");
        assert_eq!(body["assistant"]["transcript"][0]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let app = app(None);
        let (status, body) = send_json(
            &app,
            "GET",
            "/api/v1/sessions/00000000-0000-0000-0000-000000000000/resume",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_editing_flow_updates_preview() {
        let app = app(None);
        let id = create_session(&app).await;

        let (status, body) = send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/fields/fullName"),
            Some(json!({"value": "Jane Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 1);

        let (status, body) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/resume/experience/entries"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["resume"]["experience"].as_array().unwrap().len(), 2);

        let (status, _) = send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/experience/entries/1"),
            Some(json!({"field": "title", "value": "Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // First experience entry is still blank, so the section stays hidden.
        let (_, preview) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{id}/preview"), None).await;
        assert_eq!(preview["header"]["name"], "Jane Doe");
        assert!(preview["sections"].as_array().unwrap().is_empty());

        let (status, body) = send_json(
            &app,
            "DELETE",
            &format!("/api/v1/sessions/{id}/resume/experience/entries/0"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revision"], 4);

        let (_, preview) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{id}/preview"), None).await;
        assert_eq!(preview["sections"][0]["kind"], "experience");
        assert_eq!(preview["sections"][0]["items"][0]["heading"], "Engineer");
    }

    #[tokio::test]
    async fn test_command_endpoint_and_edit_errors() {
        let app = app(None);
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/resume/commands");

        let (status, body) = send_json(
            &app,
            "POST",
            &uri,
            Some(json!({"op": "update_entry", "section": "projects", "index": 0, "field": "name", "value": "Compiler"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume"]["projects"][0]["name"], "Compiler");

        let (status, body) = send_json(
            &app,
            "POST",
            &uri,
            Some(json!({"op": "remove_entry", "section": "projects", "index": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/fields/nickname"),
            Some(json!({"value": "JD"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/resume/awards/entries"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Failed edits do not bump the revision.
        let (_, body) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}/resume"), None).await;
        assert_eq!(body["revision"], 1);
    }

    #[tokio::test]
    async fn test_assistant_message_and_feedback() {
        let app = app(None);
        let id = create_session(&app).await;

        let (status, body) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/assistant/messages"),
            Some(json!({"text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/assistant/feedback"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let transcript = body["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 3);
        assert_eq!(
            transcript[1]["text"],
            "Please give me detailed feedback on the resume I built."
        );
        assert_eq!(transcript[2]["text"], "Great start!");
        assert_eq!(transcript[2]["html"], "<p>Great start!</p>\n");
        assert_eq!(body["state"], "idle");
    }

    #[tokio::test]
    async fn test_upload_then_analyze() {
        let app = app(None);
        let id = create_session(&app).await;

        let (_, body) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/assistant/analyze"),
            None,
        )
        .await;
        let transcript = body["transcript"].as_array().unwrap();
        assert_eq!(transcript.last().unwrap()["text"], "Please upload a file first.");

        let boundary = "resume-boundary";
        let multipart = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 fake\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{id}/assistant/upload"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(multipart))
            .unwrap();
        let (status, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["selected_file"]["name"], "cv.pdf");
        assert_eq!(body["selected_file"]["mime_type"], "application/pdf");

        let (_, body) = send_json(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/assistant/analyze"),
            None,
        )
        .await;
        let transcript = body["transcript"].as_array().unwrap();
        let n = transcript.len();
        assert_eq!(transcript[n - 2]["text"], "Reviewing uploaded file: cv.pdf");
        assert_eq!(transcript[n - 1]["text"], "Reviewed your file.");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let app = app(None);
        let id = create_session(&app).await;

        let boundary = "b";
        let multipart = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/sessions/{id}/assistant/upload"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(multipart))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_names_file_after_full_name() {
        let app = app(Some(Arc::new(FakePdf)));
        let id = create_session(&app).await;
        send_json(
            &app,
            "PATCH",
            &format!("/api/v1/sessions/{id}/resume/fields/fullName"),
            Some(json!({"value": "Jane Doe"})),
        )
        .await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/sessions/{id}/export"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Jane Doe.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_unconfigured_is_unavailable() {
        let app = app(None);
        let id = create_session(&app).await;
        let (status, body) =
            send_json(&app, "GET", &format!("/api/v1/sessions/{id}/export"), None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_preview_html_and_session_delete() {
        let app = app(None);
        let id = create_session(&app).await;

        let (status, html) =
            send(&app, Request::builder().uri(format!("/api/v1/sessions/{id}/preview.html")).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(html).unwrap().contains("<h1>Your Name</h1>"));

        let (status, _) = send_json(&app, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send_json(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_form_schema() {
        let app = app(None);
        let (status, body) = send_json(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["export_enabled"], false);

        let (status, body) = send_json(&app, "GET", "/api/v1/form-schema", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["personal"][0]["placeholder"], "Jane Doe");
        assert_eq!(body["sections"][1]["add_label"], "Add Experience");
        assert_eq!(body["sections"][1]["primary_field"], "title");
    }
}
