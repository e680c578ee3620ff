//! # Input Resolution
//!
//! Determines the question and paragraph for a record. An attribute carried
//! by the record always wins; otherwise the configured property is evaluated
//! against the record's attributes.

use crate::{
    constants::{PARAGRAPH, QUESTION},
    properties::ProcessorConfig,
    template::Template,
    types::Record,
};
use tracing::debug;

/// The concrete inputs handed to the QA model for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaInput {
    pub question: String,
    pub paragraph: String,
}

/// Resolves a single field: the record attribute if present, else the template.
///
/// A present attribute is used verbatim, even when empty.
pub fn resolve_field(record: &Record, key: &str, fallback: &Template) -> String {
    match record.attribute(key) {
        Some(value) => value.to_string(),
        None => fallback.evaluate(&record.attributes),
    }
}

/// Resolves both inputs for a record.
pub fn resolve_inputs(record: &Record, config: &ProcessorConfig) -> QaInput {
    let question = resolve_field(record, QUESTION, config.question());
    let paragraph = resolve_field(record, PARAGRAPH, config.paragraph());
    debug!(
        record = %record.id(),
        question = %question,
        paragraph_len = paragraph.len(),
        "Resolved QA inputs"
    );
    QaInput {
        question,
        paragraph,
    }
}
