//! # flowqa
//!
//! A record processor that answers a question about a paragraph with a
//! BERT-style question-answering model and routes each record to `success`
//! or `failure`.
//!
//! The question and paragraph come from the record's `question` and
//! `paragraph` attributes when present, otherwise from the configured
//! properties, which may reference record attributes with `${name}`. The
//! answer is written back as the `prediction` and `error` attributes.

pub mod constants;
pub mod errors;
pub mod processor;
pub mod properties;
pub mod providers;
pub mod resolver;
pub mod router;
pub mod runner;
pub mod template;
pub mod types;

pub use errors::QaError;
pub use processor::{QaProcessor, ScheduledProcessor};
pub use properties::{ProcessorConfig, ProcessorConfigBuilder, ProcessorSettings};
pub use providers::{create_provider, ProviderConfig, QaProvider};
pub use runner::{ProcessorRunner, Transfers};
pub use types::{Attributes, Prediction, Record, Relationship, Routed};
