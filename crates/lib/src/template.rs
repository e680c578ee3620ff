//! # Attribute Templates
//!
//! Property values may reference record attributes with `${name}`. A template
//! is parsed once when the processor is configured and evaluated for every
//! record it resolves.
//!
//! - `${name}` evaluates to the attribute's value, or to an empty string when
//!   the record does not carry it.
//! - `$${name}` is an escape and yields the literal text `${name}`.
//! - An unterminated `${` or an empty name is rejected at parse time.

use crate::{errors::QaError, types::Attributes};
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Attribute(String),
}

/// A parsed property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, QaError> {
        let re = Regex::new(r"(\$?)\$\{([^}]*)\}")?;
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in re.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            literal.push_str(&source[last..whole.start()]);
            last = whole.end();

            let name = &caps[2];
            if !caps[1].is_empty() {
                // Escaped expression, keep it verbatim minus the leading `$`.
                literal.push_str(&whole.as_str()[1..]);
                continue;
            }

            let name = name.trim();
            if name.is_empty() {
                return Err(QaError::Template(format!(
                    "empty attribute reference in '{source}'"
                )));
            }
            if name.contains(['$', '{']) {
                return Err(QaError::Template(format!(
                    "nested expression '{name}' in '{source}'"
                )));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Attribute(name.to_string()));
        }

        let tail = &source[last..];
        if tail.contains("${") {
            return Err(QaError::Template(format!(
                "unterminated expression in '{source}'"
            )));
        }
        literal.push_str(tail);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// A template that evaluates to `text` unchanged.
    pub fn literal(text: &str) -> Self {
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Literal(text.to_string())]
        };
        Self {
            source: text.to_string(),
            segments,
        }
    }

    /// The text the template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true when the template references at least one attribute.
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Attribute(_)))
    }

    /// Evaluates the template against a record's attributes.
    pub fn evaluate(&self, attributes: &Attributes) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Attribute(name) => out.push_str(attributes.get(name).unwrap_or_default()),
            }
        }
        out
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
