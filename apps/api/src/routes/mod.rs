pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/ping", get(health::ping_handler))
        // Screening API
        .route(
            "/api/analyze",
            post(handlers::handle_analyze).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/analysis/:id", get(handlers::handle_get_analysis))
        .route(
            "/api/analysis/:id/history",
            get(handlers::handle_get_history),
        )
        .route("/api/chat/:id", post(handlers::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    const BOUNDARY: &str = "screener-test-boundary";

    fn app() -> (Router, AppState) {
        let state = AppState::new(Config::default());
        (build_router(state.clone()), state)
    }

    fn multipart_body(parts: &[(&str, &str, &str)]) -> String {
        let mut body = String::new();
        for (name, mime, content) in parts {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{name}.txt\"\r\nContent-Type: {mime}\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn analyze_request(parts: &[(&str, &str, &str)]) -> Request<Body> {
        Request::post("/api/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn chat_request(id: &str, body: Value) -> Request<Body> {
        Request::post(format!("/api/chat/{id}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(router: &Router) -> Value {
        let response = router
            .clone()
            .oneshot(analyze_request(&[
                (
                    "resume",
                    "text/plain",
                    "I have 5 years of experience with distributed systems. Worked with kubernetes clusters.",
                ),
                (
                    "jobDescription",
                    "text/plain",
                    "Requires: kubernetes kubernetes kubernetes experience",
                ),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let (router, _) = app();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["analyses"], 0);
    }

    #[tokio::test]
    async fn test_ping_uses_configured_message() {
        let (router, _) = app();
        let response = router
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!({ "message": "ping" }));
    }

    #[tokio::test]
    async fn test_analyze_returns_summary() {
        let (router, state) = app();
        let body = create(&router).await;

        assert_eq!(body["matchScore"], 100);
        assert_eq!(body["strengths"], json!(["Experience with kubernetes"]));
        assert_eq!(body["gaps"], json!([]));
        assert_eq!(state.store.count().await, 1);

        let id = body["id"].as_str().unwrap();
        let response = router
            .oneshot(
                Request::get(format!("/api/analysis/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, body);
    }

    #[tokio::test]
    async fn test_analyze_rejects_unsupported_type() {
        let (router, _) = app();
        let response = router
            .oneshot(analyze_request(&[
                ("resume", "image/png", "not really an image"),
                ("jobDescription", "text/plain", "anything"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
    }

    #[tokio::test]
    async fn test_analyze_requires_both_files() {
        let (router, _) = app();
        let response = router
            .oneshot(analyze_request(&[("resume", "text/plain", "Rust developer.")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_unknown_analysis_is_404() {
        let (router, _) = app();
        let response = router
            .oneshot(
                Request::get("/api/analysis/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_chat_answers_and_records_history() {
        let (router, _) = app();
        let id = create(&router).await["id"].as_str().unwrap().to_string();

        let question = "how much experience does the candidate have?";
        let response = router
            .clone()
            .oneshot(chat_request(&id, json!({ "question": question })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["question"], question);
        let answer = body["answer"].as_str().unwrap();
        assert!(answer.contains('5'));
        assert!(answer.contains("distributed systems"));

        let response = router
            .oneshot(
                Request::get(format!("/api/analysis/{id}/history"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let history = json_body(response).await;
        assert_eq!(history.as_array().unwrap().len(), 2);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_chat_rejects_invalid_questions() {
        let (router, _) = app();
        let id = create(&router).await["id"].as_str().unwrap().to_string();

        for body in [json!({}), json!({ "question": 42 }), json!({ "question": "  " })] {
            let response = router
                .clone()
                .oneshot(chat_request(&id, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"]["code"], "INVALID_QUESTION");
        }

        let response = router
            .oneshot(
                Request::post(format!("/api/chat/{id}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_unknown_analysis_is_404() {
        let (router, _) = app();
        let response = router
            .oneshot(chat_request("nonexistent", json!({ "question": "Any degree?" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
