//! # Shared Constants
//!
//! Attribute keys, property names and defaults shared by the resolver, the
//! providers, the router and the CLI. Using these constants avoids
//! "magic strings" across crates.

/// Attribute (and property) holding the question to ask.
pub const QUESTION: &str = "question";

/// Attribute (and property) holding the context paragraph.
pub const PARAGRAPH: &str = "paragraph";

/// Attribute written with the predicted answer.
pub const PREDICTION: &str = "prediction";

/// Attribute written with the error text, empty when the model reported none.
pub const ERROR: &str = "error";

/// Identity attribute stamped on every newly created record.
pub const UUID: &str = "uuid";

/// File name attribute stamped on every newly created record.
pub const FILENAME: &str = "filename";

pub const DEFAULT_QUESTION: &str = "What?";
pub const DEFAULT_PARAGRAPH: &str = "...";

/// Soft error reported when the model answered with an empty span.
pub const NO_ANSWER_ERROR: &str = "no answer span found";

/// Default number of records processed concurrently by the runner.
pub const DEFAULT_CONCURRENCY: usize = 4;
