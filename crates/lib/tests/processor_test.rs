//! # Processor Tests
//!
//! End-to-end tests of the processor lifecycle against a scripted QA provider:
//! scheduling, per-record triggering, and routing to `success` or `failure`.

use flowqa::{
    constants::{ERROR, PREDICTION, QUESTION, UUID},
    types::{Attributes, Prediction, Record, Relationship},
    ProcessorConfig, QaError, QaProcessor,
};
use flowqa_test_utils::{fixtures::*, setup_tracing, MockQaProvider};

#[tokio::test]
async fn test_squad_example_routes_to_success() {
    // --- 1. Arrange ---
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    let config = ProcessorConfig::builder()
        .question(QUESTION_SQUAD)
        .paragraph(PARAGRAPH_SQUAD)
        .build()
        .unwrap();
    let processor = QaProcessor::on_scheduled(config, Box::new(provider.clone()))
        .await
        .unwrap();

    // --- 2. Act ---
    let routed = processor.on_trigger(None).await;

    // --- 3. Assert ---
    assert_eq!(routed.relationship, Relationship::Success);
    let prediction = routed.record.attribute(PREDICTION).unwrap();
    assert!(
        prediction.contains("Central Asia"),
        "Unexpected prediction: {prediction}"
    );
    assert_eq!(routed.record.attribute(ERROR), Some(""));
    assert_eq!(
        provider.get_calls(),
        vec![(QUESTION_SQUAD.to_string(), PARAGRAPH_SQUAD.to_string())]
    );
}

#[tokio::test]
async fn test_nifi_example_routes_to_success() {
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    let config = ProcessorConfig::builder()
        .question(QUESTION_NIFI)
        .paragraph(PARAGRAPH_NIFI)
        .build()
        .unwrap();
    let processor = QaProcessor::on_scheduled(config, Box::new(provider))
        .await
        .unwrap();

    let routed = processor.on_trigger(Some(Record::new())).await;

    assert!(routed.is_success());
    let prediction = routed.record.attribute(PREDICTION).unwrap();
    assert!(prediction.contains("2006") || prediction.contains("2014"));
}

#[tokio::test]
async fn test_record_attributes_override_configuration() {
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    let processor = QaProcessor::on_scheduled(
        ProcessorConfig::default(),
        Box::new(provider.clone()),
    )
    .await
    .unwrap();
    let record = Record::with_attributes(
        [("question", QUESTION_NIFI), ("paragraph", PARAGRAPH_NIFI)]
            .into_iter()
            .collect::<Attributes>(),
    );

    let routed = processor.on_trigger(Some(record)).await;

    assert!(routed.is_success());
    assert_eq!(routed.record.attribute(PREDICTION), Some(ANSWER_NIFI));
    assert_eq!(provider.get_calls()[0].0, QUESTION_NIFI);
    assert_eq!(provider.get_calls()[0].1, PARAGRAPH_NIFI);
}

#[tokio::test]
async fn test_inference_error_routes_to_failure_without_mutation() {
    // --- 1. Arrange ---
    setup_tracing();
    let provider = MockQaProvider::new();
    provider.add_failure("black death", "CUDA out of memory");
    let processor = QaProcessor::on_scheduled(ProcessorConfig::default(), Box::new(provider))
        .await
        .unwrap();
    let record = Record::with_attributes(
        [(QUESTION, QUESTION_SQUAD)].into_iter().collect::<Attributes>(),
    )
    .with_payload(b"original payload".to_vec());
    let before = record.clone();

    // --- 2. Act ---
    let routed = processor.on_trigger(Some(record)).await;

    // --- 3. Assert ---
    assert_eq!(routed.relationship, Relationship::Failure);
    assert_eq!(routed.record, before);
    assert!(routed.record.attribute(PREDICTION).is_none());
    assert!(routed.record.attribute(ERROR).is_none());
}

#[tokio::test]
async fn test_processing_continues_after_a_failure() {
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    provider.add_failure("broken", "model crashed");
    let processor = QaProcessor::on_scheduled(ProcessorConfig::default(), Box::new(provider))
        .await
        .unwrap();

    let failed = processor
        .on_trigger(Some(Record::with_attributes(
            [(QUESTION, "broken question")].into_iter().collect::<Attributes>(),
        )))
        .await;
    let succeeded = processor
        .on_trigger(Some(Record::with_attributes(
            [(QUESTION, QUESTION_NIFI)].into_iter().collect::<Attributes>(),
        )))
        .await;

    assert_eq!(failed.relationship, Relationship::Failure);
    assert_eq!(succeeded.relationship, Relationship::Success);
}

#[tokio::test]
async fn test_soft_error_is_recorded_and_routed_by_policy() {
    setup_tracing();
    let soft = Prediction {
        prediction: String::new(),
        error: "no answer span found".to_string(),
    };

    let lenient_provider = MockQaProvider::new();
    lenient_provider.add_prediction("What?", soft.clone());
    let lenient = QaProcessor::on_scheduled(
        ProcessorConfig::default(),
        Box::new(lenient_provider),
    )
    .await
    .unwrap();
    let routed = lenient.on_trigger(None).await;
    assert_eq!(routed.relationship, Relationship::Success);
    assert_eq!(routed.record.attribute(ERROR), Some("no answer span found"));

    let strict_provider = MockQaProvider::new();
    strict_provider.add_prediction("What?", soft);
    let strict_config = ProcessorConfig::builder()
        .route_errors_to_failure(true)
        .build()
        .unwrap();
    let strict = QaProcessor::on_scheduled(strict_config, Box::new(strict_provider))
        .await
        .unwrap();
    let routed = strict.on_trigger(None).await;
    assert_eq!(routed.relationship, Relationship::Failure);
    assert_eq!(routed.record.attribute(ERROR), Some("no answer span found"));
}

#[tokio::test]
async fn test_missing_record_creates_a_new_one() {
    setup_tracing();
    let provider = MockQaProvider::new();
    provider.add_answer("What?", "nothing");
    let processor = QaProcessor::on_scheduled(ProcessorConfig::default(), Box::new(provider))
        .await
        .unwrap();

    let routed = processor.on_trigger(None).await;

    assert!(routed.is_success());
    assert!(routed.record.attribute(UUID).is_some());
    assert!(routed.record.payload.is_empty());
}

#[tokio::test]
async fn test_identical_inputs_yield_identical_predictions() {
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    let config = ProcessorConfig::builder()
        .question(QUESTION_SQUAD)
        .paragraph(PARAGRAPH_SQUAD)
        .build()
        .unwrap();
    let processor = QaProcessor::on_scheduled(config, Box::new(provider))
        .await
        .unwrap();

    let first = processor.on_trigger(None).await;
    let second = processor.on_trigger(None).await;

    assert_eq!(
        first.record.attribute(PREDICTION),
        second.record.attribute(PREDICTION)
    );
}

#[tokio::test]
async fn test_provider_is_warmed_up_once_per_schedule() {
    setup_tracing();
    let provider = MockQaProvider::with_fixture_answers();
    let processor = QaProcessor::on_scheduled(
        ProcessorConfig::default(),
        Box::new(provider.clone()),
    )
    .await
    .unwrap();

    for _ in 0..3 {
        processor.on_trigger(None).await;
    }
    let clone = processor.clone();
    clone.on_trigger(None).await;

    assert_eq!(provider.warm_up_count(), 1);
    assert_eq!(provider.get_calls().len(), 4);
}

#[tokio::test]
async fn test_failed_warm_up_aborts_scheduling() {
    setup_tracing();
    let provider = MockQaProvider::new();
    provider.fail_warm_up("model not loaded");

    let result = QaProcessor::on_scheduled(ProcessorConfig::default(), Box::new(provider)).await;

    assert!(matches!(result, Err(QaError::AiApi(msg)) if msg == "model not loaded"));
}

#[test]
fn test_empty_question_is_rejected_before_scheduling() {
    let result = ProcessorConfig::builder()
        .question("")
        .paragraph(PARAGRAPH_NIFI)
        .build();

    assert!(matches!(
        result,
        Err(QaError::InvalidProperty { name, .. }) if name == "question"
    ));
}

#[test]
fn test_processor_metadata() {
    let names: Vec<&str> = QaProcessor::relationships()
        .iter()
        .map(|r| r.name())
        .collect();
    assert_eq!(names, vec!["success", "failure"]);
    assert!(QaProcessor::relationships()
        .iter()
        .all(|r| !r.description().is_empty()));
    assert_ne!(
        Relationship::Success.description(),
        Relationship::Failure.description()
    );
    assert_eq!(QaProcessor::DESCRIPTION, "Run BERT QA deep learning models");
    assert!(QaProcessor::TAGS.contains(&"question answering"));
    assert!(QaProcessor::TAGS.contains(&"bert"));

    let properties = QaProcessor::property_descriptors();
    assert_eq!(properties.len(), 2);
    assert_eq!(properties[0].name, "question");
    assert_eq!(properties[0].default_value, "What?");
    assert_eq!(properties[1].name, "paragraph");
    assert_eq!(properties[1].default_value, "...");
    assert!(properties.iter().all(|p| p.required && p.supports_attribute_expressions));
}
