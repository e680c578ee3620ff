//! # Processor Properties
//!
//! The configuration surface of the QA processor: two templated properties,
//! `question` and `paragraph`, validated once before the processor is
//! scheduled.

use crate::{
    constants::{DEFAULT_PARAGRAPH, DEFAULT_QUESTION, PARAGRAPH, QUESTION},
    errors::QaError,
    template::Template,
};
use serde::{Deserialize, Serialize};

/// Static description of a configurable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub default_value: &'static str,
    pub required: bool,
    /// Whether the value may reference record attributes with `${name}`.
    pub supports_attribute_expressions: bool,
}

impl PropertyDescriptor {
    /// Rejects values that are empty or not valid templates.
    pub fn validate(&self, value: &str) -> Result<Template, QaError> {
        if self.required && value.trim().is_empty() {
            return Err(QaError::InvalidProperty {
                name: self.name.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }
        Template::parse(value).map_err(|e| QaError::InvalidProperty {
            name: self.name.to_string(),
            reason: e.to_string(),
        })
    }
}

pub const QUESTION_PROPERTY: PropertyDescriptor = PropertyDescriptor {
    name: QUESTION,
    description: "Question",
    default_value: DEFAULT_QUESTION,
    required: true,
    supports_attribute_expressions: true,
};

pub const PARAGRAPH_PROPERTY: PropertyDescriptor = PropertyDescriptor {
    name: PARAGRAPH,
    description: "Paragraph",
    default_value: DEFAULT_PARAGRAPH,
    required: true,
    supports_attribute_expressions: true,
};

/// Raw, unvalidated processor settings as they appear in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorSettings {
    #[serde(default = "default_question")]
    pub question: String,
    #[serde(default = "default_paragraph")]
    pub paragraph: String,
    /// Route predictions that carry a non-empty error to `failure`.
    #[serde(default)]
    pub route_errors_to_failure: bool,
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}

fn default_paragraph() -> String {
    DEFAULT_PARAGRAPH.to_string()
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            question: default_question(),
            paragraph: default_paragraph(),
            route_errors_to_failure: false,
        }
    }
}

impl TryFrom<ProcessorSettings> for ProcessorConfig {
    type Error = QaError;

    fn try_from(settings: ProcessorSettings) -> Result<Self, Self::Error> {
        ProcessorConfig::builder()
            .question(settings.question)
            .paragraph(settings.paragraph)
            .route_errors_to_failure(settings.route_errors_to_failure)
            .build()
    }
}

/// Validated processor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub(crate) question: Template,
    pub(crate) paragraph: Template,
    pub(crate) route_errors_to_failure: bool,
}

impl ProcessorConfig {
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }

    pub fn question(&self) -> &Template {
        &self.question
    }

    pub fn paragraph(&self) -> &Template {
        &self.paragraph
    }

    pub fn route_errors_to_failure(&self) -> bool {
        self.route_errors_to_failure
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            question: Template::literal(DEFAULT_QUESTION),
            paragraph: Template::literal(DEFAULT_PARAGRAPH),
            route_errors_to_failure: false,
        }
    }
}

/// A builder for creating `ProcessorConfig` instances.
///
/// Unset properties fall back to their descriptor defaults.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfigBuilder {
    question: Option<String>,
    paragraph: Option<String>,
    route_errors_to_failure: bool,
}

impl ProcessorConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the question property.
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Sets the paragraph property.
    pub fn paragraph(mut self, paragraph: impl Into<String>) -> Self {
        self.paragraph = Some(paragraph.into());
        self
    }

    pub fn route_errors_to_failure(mut self, enabled: bool) -> Self {
        self.route_errors_to_failure = enabled;
        self
    }

    /// Builds the `ProcessorConfig`.
    ///
    /// Fails with `QaError::InvalidProperty` if a property is empty or holds
    /// a malformed template.
    pub fn build(self) -> Result<ProcessorConfig, QaError> {
        let question = QUESTION_PROPERTY.validate(
            self.question
                .as_deref()
                .unwrap_or(QUESTION_PROPERTY.default_value),
        )?;
        let paragraph = PARAGRAPH_PROPERTY.validate(
            self.paragraph
                .as_deref()
                .unwrap_or(PARAGRAPH_PROPERTY.default_value),
        )?;
        Ok(ProcessorConfig {
            question,
            paragraph,
            route_errors_to_failure: self.route_errors_to_failure,
        })
    }
}
