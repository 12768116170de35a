pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::audit::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/audits", post(handlers::handle_audit))
        .route("/api/v1/audits/score", post(handlers::handle_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::audit::extractor::FactExtractor;
    use crate::audit::models::ForensicExtraction;
    use crate::audit::upload::ResumeUpload;
    use crate::config::{Config, DEFAULT_GEMINI_BASE_URL};
    use crate::errors::{AppError, EXTRACTION_FAILED_MESSAGE};

    const BOUNDARY: &str = "prophet-test-boundary";

    /// Returns a canned extraction, or fails when `fail` is set.
    struct StubExtractor {
        fail: bool,
    }

    #[async_trait]
    impl FactExtractor for StubExtractor {
        async fn extract(&self, upload: &ResumeUpload) -> Result<ForensicExtraction, AppError> {
            if self.fail {
                return Err(AppError::Extraction("model unavailable".to_string()));
            }
            assert_eq!(upload.mime_type, "application/pdf");
            Ok(serde_json::from_value(extraction_json()).unwrap())
        }
    }

    fn metrics_json() -> Value {
        json!({
            "has_columns_tables": true,
            "has_photo": false,
            "has_graphic_icons": false,
            "has_creative_headers": false,
            "date_format_issues": false,
            "total_bullet_points": 10,
            "bullets_with_numbers": 5,
            "weak_verbs_count": 2,
            "word_count": 400
        })
    }

    fn extraction_json() -> Value {
        json!({
            "meta_data": {
                "candidate_name": "Grace Hopper",
                "detected_language": "en",
                "inferred_target_role": "Platform Engineer",
                "years_experience": 9.5
            },
            "raw_metrics": metrics_json(),
            "summary_verdict": { "headline": "Close", "executive_summary": "Layout hurts parsing." },
            "structural_audit": { "issues_found": ["Table in skills section"], "is_parsable": true },
            "keyword_analysis": {
                "hard_skills_found": ["Go", "Postgres"],
                "missing_critical_skills": ["Kubernetes", "Terraform", "Prometheus"],
                "buzzwords_to_remove": ["rockstar"]
            },
            "action_plan": ["Remove the skills table"]
        })
    }

    fn test_app(fail: bool, max_upload_bytes: usize) -> Router {
        let state = AppState {
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_upload_bytes,
            },
            extractor: Arc::new(StubExtractor { fail }),
        };
        build_router(state)
    }

    fn multipart_request(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/audits")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let resp = test_app(false, 1024)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "prophet-api");
    }

    #[tokio::test]
    async fn test_audit_scores_extraction() {
        let resp = test_app(false, 1024 * 1024)
            .oneshot(multipart_request("resume", "cv.pdf", "application/pdf", b"%PDF-1.7"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        assert_eq!(body["meta_data"]["candidate_name"], "Grace Hopper");
        assert_eq!(body["raw_metrics"]["word_count"], 400);
        assert_eq!(body["scores"]["ats_compatibility"], 80);
        assert_eq!(body["scores"]["content_impact"], 77);
        assert_eq!(body["scores"]["overall_score"], 78);
        assert_eq!(body["deductions"].as_array().unwrap().len(), 3);
        assert!(body["audit_id"].is_string());
    }

    #[tokio::test]
    async fn test_audit_requires_resume_field() {
        let resp = test_app(false, 1024 * 1024)
            .oneshot(multipart_request("attachment", "cv.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_audit_rejects_unsupported_type() {
        let resp = test_app(false, 1024 * 1024)
            .oneshot(multipart_request("resume", "cv.docx", "application/msword", b"PK"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_audit_rejects_oversized_upload() {
        let resp = test_app(false, 64)
            .oneshot(multipart_request("resume", "cv.pdf", "application/pdf", &[b'x'; 512]))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_audit_extraction_failure_is_bad_gateway() {
        let resp = test_app(true, 1024 * 1024)
            .oneshot(multipart_request("resume", "cv.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["message"], EXTRACTION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_audit_non_multipart_body_gets_json_error() {
        let request = json_request("/api/v1/audits", &json!({}));
        let resp = test_app(false, 1024 * 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_score_malformed_json_is_bad_request() {
        let request = Request::post("/api/v1/audits/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"raw_metrics\": "))
            .unwrap();
        let resp = test_app(false, 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_score_without_json_content_type_is_unsupported() {
        let request = Request::post("/api/v1/audits/score")
            .body(Body::from(
                json!({ "raw_metrics": metrics_json(), "missing_critical_skills": [] }).to_string(),
            ))
            .unwrap();
        let resp = test_app(false, 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let request = json_request(
            "/api/v1/audits/score",
            &json!({
                "raw_metrics": metrics_json(),
                "missing_critical_skills": ["a", "b", "c"]
            }),
        );
        let resp = test_app(false, 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(
            body["scores"],
            json!({ "overall_score": 78, "ats_compatibility": 80, "content_impact": 77 })
        );
    }

    #[tokio::test]
    async fn test_score_missing_field_is_unprocessable() {
        let mut metrics = metrics_json();
        metrics.as_object_mut().unwrap().remove("has_photo");
        let request = json_request(
            "/api/v1/audits/score",
            &json!({ "raw_metrics": metrics, "missing_critical_skills": [] }),
        );
        let resp = test_app(false, 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_body(resp).await;
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("has_photo"), "got: {message}");
    }

    #[tokio::test]
    async fn test_score_rejects_inconsistent_bullets() {
        let mut metrics = metrics_json();
        metrics["bullets_with_numbers"] = json!(11);
        let request = json_request(
            "/api/v1/audits/score",
            &json!({ "raw_metrics": metrics, "missing_critical_skills": [] }),
        );
        let resp = test_app(false, 1024).oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_METRICS");
    }
}
