//! # QA Processor
//!
//! The processor answers a question about a paragraph with a BERT-style QA
//! model and records the answer on the record.
//!
//! Its lifecycle has two phases:
//!
//! 1.  **Scheduling:** `QaProcessor::on_scheduled` takes an already validated
//!     `ProcessorConfig`, warms up the provider exactly once and returns a
//!     `ScheduledProcessor`.
//! 2.  **Triggering:** `ScheduledProcessor::on_trigger` handles one record:
//!     resolve the inputs, call the model, route the outcome. It can be called
//!     concurrently from any number of tasks.

use crate::{
    errors::QaError,
    properties::{ProcessorConfig, PropertyDescriptor, PARAGRAPH_PROPERTY, QUESTION_PROPERTY},
    providers::qa::QaProvider,
    resolver::resolve_inputs,
    router::{route, RoutingPolicy},
    types::{Record, Relationship, Routed},
};
use std::sync::Arc;
use tracing::{debug, info};

/// Static metadata about the processor.
pub struct QaProcessor;

impl QaProcessor {
    pub const DESCRIPTION: &'static str = "Run BERT QA deep learning models";

    pub const TAGS: &'static [&'static str] = &[
        "inference",
        "models",
        "question answering",
        "bert",
        "deep learning",
    ];

    /// The relationships every triggered record can be transferred to.
    pub fn relationships() -> &'static [Relationship] {
        &Relationship::ALL
    }

    /// The configurable properties, in display order.
    pub fn property_descriptors() -> &'static [PropertyDescriptor] {
        &[QUESTION_PROPERTY, PARAGRAPH_PROPERTY]
    }

    /// Prepares the processor for triggering.
    ///
    /// The provider is warmed up here and only here; a failing warm-up aborts
    /// scheduling so no record is ever processed against a broken model.
    pub async fn on_scheduled(
        config: ProcessorConfig,
        provider: Box<dyn QaProvider>,
    ) -> Result<ScheduledProcessor, QaError> {
        info!(
            question = %config.question(),
            route_errors_to_failure = config.route_errors_to_failure(),
            "Scheduling QA processor"
        );
        provider.warm_up().await?;
        Ok(ScheduledProcessor {
            config: Arc::new(config),
            provider: Arc::from(provider),
        })
    }
}

/// A processor whose provider has been initialized.
///
/// Cloning is cheap; clones share the same configuration and provider.
#[derive(Clone, Debug)]
pub struct ScheduledProcessor {
    config: Arc<ProcessorConfig>,
    provider: Arc<dyn QaProvider>,
}

impl ScheduledProcessor {
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Processes one record.
    ///
    /// When the host has no record to hand over, a new empty one is created
    /// so that configured properties alone can drive a prediction. This never
    /// fails: errors are logged and the record goes to `failure`.
    pub async fn on_trigger(&self, record: Option<Record>) -> Routed {
        let record = record.unwrap_or_else(Record::new);
        let input = resolve_inputs(&record, &self.config);

        let result = self
            .provider
            .predict(&input.question, &input.paragraph)
            .await;

        let policy = RoutingPolicy {
            route_errors_to_failure: self.config.route_errors_to_failure(),
        };
        let routed = route(record, result, policy);
        debug!(
            record = %routed.record.id(),
            relationship = %routed.relationship,
            "Transferred record"
        );
        routed
    }
}
