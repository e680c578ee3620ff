//! # CLI Command Tests
//!
//! Drives the `process` and `ask` handlers against a `wiremock` server
//! standing in for DJL Serving, with record files in a temporary directory.

use flowqa::{
    constants::{ERROR, PREDICTION, QUESTION},
    ProcessorSettings, ProviderConfig, Relationship,
};
use flowqa_cli::{
    ask::{handle_ask, AskArgs},
    config::AppConfig,
    process::{handle_process, ProcessArgs},
    records::{read_records, RecordError},
};
use flowqa_test_utils::{fixtures::*, setup_tracing};
use serde_json::json;
use std::fs;
use std::io::BufReader;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn djl_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predictions/bertqa"))
        .and(body_partial_json(json!({"question": QUESTION_NIFI})))
        .respond_with(ResponseTemplate::new(200).set_body_string("2006"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predictions/bertqa"))
        .and(body_partial_json(json!({"question": "broken"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("inference failed"))
        .mount(&server)
        .await;
    server
}

fn app_config(server: &MockServer) -> AppConfig {
    AppConfig {
        concurrency: 2,
        processor: ProcessorSettings::default(),
        provider: ProviderConfig {
            provider: "djl".to_string(),
            api_url: Some(server.uri()),
            api_key: None,
            model_name: None,
        },
    }
}

#[tokio::test]
async fn test_process_routes_records_to_files() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = djl_server().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.jsonl");
    let success = dir.path().join("success.jsonl");
    let failure = dir.path().join("failure.jsonl");

    let lines = [
        json!({"attributes": {"question": QUESTION_NIFI, "paragraph": PARAGRAPH_NIFI}, "payload": "aGVsbG8="}),
        json!({"attributes": {"question": "broken"}}),
        json!({"attributes": {"question": QUESTION_NIFI}}),
    ];
    let content = lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n\n");
    fs::write(&input, content).unwrap();

    let args = ProcessArgs {
        input,
        success: Some(success.clone()),
        failure: Some(failure.clone()),
        concurrency: None,
    };

    // --- 2. Act ---
    let transfers = handle_process(app_config(&server), &args).await.unwrap();

    // --- 3. Assert ---
    assert_eq!(transfers.success.len(), 2);
    assert_eq!(transfers.failure.len(), 1);

    let written = read_records(BufReader::new(fs::File::open(&success).unwrap())).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written
        .iter()
        .all(|r| r.attribute(PREDICTION) == Some("2006") && r.attribute(ERROR) == Some("")));
    assert!(written.iter().any(|r| r.payload == b"hello"));

    let failed = read_records(BufReader::new(fs::File::open(&failure).unwrap())).unwrap();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].attribute(QUESTION), Some("broken"));
    assert!(failed[0].attribute(PREDICTION).is_none());
}

#[tokio::test]
async fn test_process_rejects_invalid_record_lines() {
    setup_tracing();
    let server = djl_server().await;
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("records.jsonl");
    fs::write(&input, "{\"attributes\": {}}\nnot json\n").unwrap();

    let args = ProcessArgs {
        input,
        success: Some(dir.path().join("success.jsonl")),
        failure: None,
        concurrency: Some(1),
    };
    let err = handle_process(app_config(&server), &args).await.unwrap_err();

    let record_error = err.downcast_ref::<RecordError>().unwrap();
    assert!(matches!(record_error, RecordError::Parse { line: 2, .. }));
}

#[tokio::test]
async fn test_ask_uses_argument_overrides() {
    setup_tracing();
    let server = djl_server().await;
    let args = AskArgs {
        question: Some(QUESTION_NIFI.to_string()),
        paragraph: Some(PARAGRAPH_NIFI.to_string()),
    };

    let routed = handle_ask(app_config(&server), &args).await.unwrap();

    assert_eq!(routed.relationship, Relationship::Success);
    assert_eq!(routed.record.attribute(PREDICTION), Some("2006"));
}

#[tokio::test]
async fn test_ask_with_empty_question_fails_fast() {
    setup_tracing();
    let server = djl_server().await;
    let args = AskArgs {
        question: Some(String::new()),
        paragraph: None,
    };

    let result = handle_ask(app_config(&server), &args).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("question"));
}
