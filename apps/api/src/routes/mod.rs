pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_resume;
use crate::scrape::handlers::handle_scrape_candidates;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze-resume", post(handle_analyze_resume))
        .route("/api/scrape-candidates", post(handle_scrape_candidates))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::Value;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::analyzer::fixtures::ANALYSIS_REPLY;
    use crate::config::ModelConfig;
    use crate::llm_client::testing::ScriptedModel;
    use crate::scrape::browser::testing::ScriptedAgent;
    use crate::storage::testing::{MemoryObjectStore, MemoryRecordStore};

    const BOUNDARY: &str = "hireflow-test-boundary";

    struct Harness {
        llm: Arc<ScriptedModel>,
        objects: Arc<MemoryObjectStore>,
        records: Arc<MemoryRecordStore>,
        agent: Arc<ScriptedAgent>,
    }

    impl Harness {
        fn new<S: Into<String>>(replies: impl IntoIterator<Item = Option<S>>) -> Self {
            Self::with_agent(replies, ScriptedAgent::replying("Name: Jane Doe"))
        }

        fn with_agent<S: Into<String>>(
            replies: impl IntoIterator<Item = Option<S>>,
            agent: ScriptedAgent,
        ) -> Self {
            Self {
                llm: Arc::new(ScriptedModel::new(replies)),
                objects: Arc::new(MemoryObjectStore::default()),
                records: Arc::new(MemoryRecordStore::default()),
                agent: Arc::new(agent),
            }
        }

        fn router(&self) -> Router {
            build_router(AppState {
                llm: self.llm.clone(),
                models: ModelConfig::default(),
                objects: self.objects.clone(),
                records: self.records.clone(),
                agent: self.agent.clone(),
                scrape_lock: Arc::new(Mutex::new(())),
                candidate_collection: "Cyber Security".to_string(),
                max_upload_bytes: 1024 * 1024,
            })
        }
    }

    enum Part<'a> {
        Text(&'a str, &'a str),
        File {
            name: &'a str,
            filename: &'a str,
            content_type: &'a str,
            bytes: &'a [u8],
        },
    }

    fn multipart(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    filename,
                    content_type,
                    bytes,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart(parts)))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn ten_page_resume() -> String {
        (1..=10)
            .map(|page| format!("Jane Doe resume, page {page}\nBuilt payment systems in Go and Rust.\n"))
            .collect::<Vec<_>>()
            .join("\x0c")
    }

    #[tokio::test]
    async fn test_health() {
        let harness = Harness::new([None::<String>]);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "hireflow");
    }

    #[tokio::test]
    async fn test_analyze_ten_page_text_resume() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let resume = ten_page_resume();

        let request = multipart_request(
            "/api/analyze-resume",
            &[
                Part::File {
                    name: "resume",
                    filename: "jane.txt",
                    content_type: "text/plain",
                    bytes: resume.as_bytes(),
                },
                Part::Text("required_experience", "3"),
            ],
        );
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::OK);
        let scoring = body["scoring"].as_object().unwrap();
        assert_eq!(scoring.values().filter(|v| v.is_number()).count(), 4);
        assert!(body["selection_decision"]["selected"].is_boolean());

        let prompt = &harness.llm.recorded()[0].messages[1].content;
        assert!(prompt.contains("The role requires 3 years of experience."));
        assert!(prompt.contains("page 10"));

        let objects = harness.objects.objects.lock().unwrap();
        assert_eq!(objects.len(), 1);
        assert!(objects[0].0.ends_with("_jane.txt"));
        assert_eq!(objects[0].2, "text/plain");

        let applicants = harness.records.applicants.lock().unwrap();
        assert_eq!(applicants.len(), 1);
        assert_eq!(applicants[0].analysis_result, body);
    }

    #[tokio::test]
    async fn test_analyze_passes_job_description_and_skills() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[
                Part::File {
                    name: "resume",
                    filename: "cv.txt",
                    content_type: "text/plain",
                    bytes: b"Jane Doe, Python and SQL",
                },
                Part::Text("job_description", "Data engineer"),
                Part::Text("skills", "Python, SQL"),
            ],
        );
        let (status, _) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::OK);
        let requests = harness.llm.recorded();
        assert_eq!(requests.len(), 1, "explicit skills skip extraction");
        let prompt = &requests[0].messages[1].content;
        assert!(prompt.contains("JOB DESCRIPTION: Data engineer"));
        assert!(prompt.contains(r#"["Python", "SQL"]"#));
    }

    #[tokio::test]
    async fn test_analyze_without_file_is_400() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[Part::Text("job_description", "Anything")],
        );
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No file uploaded");
        assert!(harness.llm.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_unsupported_type_is_400() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[Part::File {
                name: "resume",
                filename: "cv.rtf",
                content_type: "application/rtf",
                bytes: b"{\\rtf1 Jane Doe}",
            }],
        );
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(harness.llm.recorded().is_empty());
        assert!(harness.objects.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_empty_file_is_400() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[Part::File {
                name: "resume",
                filename: "cv.txt",
                content_type: "text/plain",
                bytes: b"",
            }],
        );
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MALFORMED_INPUT");
    }

    #[tokio::test]
    async fn test_analyze_bad_experience_is_400() {
        let harness = Harness::new([Some(ANALYSIS_REPLY)]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[
                Part::File {
                    name: "resume",
                    filename: "cv.txt",
                    content_type: "text/plain",
                    bytes: b"Jane",
                },
                Part::Text("required_experience", "three"),
            ],
        );
        let (status, _) = send(harness.router(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_unparseable_reply_is_500_and_stores_nothing() {
        let harness = Harness::new([Some("not json at all")]);
        let request = multipart_request(
            "/api/analyze-resume",
            &[Part::File {
                name: "resume",
                filename: "cv.txt",
                content_type: "text/plain",
                bytes: b"Jane",
            }],
        );
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "RESPONSE_PARSE_ERROR");
        assert!(harness.objects.objects.lock().unwrap().is_empty());
        assert!(harness.records.applicants.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_stores_when_requested() {
        let harness = Harness::new([Some(r#"```json [{"name":"A"}] ```"#)]);
        let (status, body) = send(
            harness.router(),
            form_request("/api/scrape-candidates", "store_in_db=true"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidates"], serde_json::json!([{"name": "A"}]));

        let stored = harness.records.candidates.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].0, "Cyber Security");
        assert_eq!(stored[0].1["name"], "A");
    }

    #[tokio::test]
    async fn test_scrape_empty_body_does_not_store() {
        let harness = Harness::new([Some(r#"[{"name":"A"}, {"name":"B"}]"#)]);
        let request = Request::builder()
            .method("POST")
            .uri("/api/scrape-candidates")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidates"].as_array().unwrap().len(), 2);
        assert!(harness.records.candidates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_accepts_multipart_flag() {
        let harness = Harness::new([Some(r#"[{"name":"A"}]"#)]);
        let request = multipart_request(
            "/api/scrape-candidates",
            &[Part::Text("store_in_db", "yes")],
        );
        let (status, _) = send(harness.router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(harness.records.candidates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_scrape_invalid_cleanup_returns_error_object() {
        let harness = Harness::new([Some("```json [{\"name\": \"A\",] ```")]);
        let (status, body) = send(
            harness.router(),
            form_request("/api/scrape-candidates", "store_in_db=true"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "RESPONSE_PARSE_ERROR");
        assert!(harness.records.candidates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scrape_storage_failure_returns_no_candidates() {
        let mut harness = Harness::new([Some(r#"[{"name":"A"}]"#)]);
        harness.records = Arc::new(MemoryRecordStore::failing());

        let (status, body) = send(
            harness.router(),
            form_request("/api/scrape-candidates", "store_in_db=true"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        assert!(body.get("candidates").is_none());
    }

    #[tokio::test]
    async fn test_concurrent_scrapes_take_turns() {
        let harness = Harness::with_agent(
            [Some(r#"[{"name":"A"}]"#), Some(r#"[{"name":"B"}]"#)],
            ScriptedAgent::slow("Name: Jane Doe", Duration::from_millis(50)),
        );
        let router = harness.router();

        let (first, second) = tokio::join!(
            send(router.clone(), form_request("/api/scrape-candidates", "")),
            send(router.clone(), form_request("/api/scrape-candidates", "")),
        );

        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(second.0, StatusCode::OK);
        assert_eq!(harness.agent.tasks.lock().unwrap().len(), 2);
        assert_eq!(harness.agent.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scrape_agent_failure_is_500() {
        let harness = Harness::with_agent([Some("[]")], ScriptedAgent::failing());
        let (status, body) = send(
            harness.router(),
            form_request("/api/scrape-candidates", ""),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "AGENT_ERROR");
    }

    #[tokio::test]
    async fn test_scrape_bad_flag_is_400_before_agent_runs() {
        let harness = Harness::new([Some("[]")]);
        let (status, _) = send(
            harness.router(),
            form_request("/api/scrape-candidates", "store_in_db=maybe"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(harness.agent.tasks.lock().unwrap().is_empty());
    }
}
