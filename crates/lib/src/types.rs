use crate::constants::{ERROR, FILENAME, PREDICTION, UUID};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// An ordered set of string attributes attached to a record.
///
/// Keys are unique; inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts an attribute, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Attributes {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A unit of data flowing through the pipeline.
///
/// The processor only reads and writes `attributes`; the payload is carried
/// along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default, with = "payload_base64")]
    pub payload: Vec<u8>,
}

impl Record {
    /// Creates an empty record stamped with a fresh `uuid` and `filename`.
    pub fn new() -> Self {
        Self::with_attributes(Attributes::new())
    }

    /// Creates a record with the given attributes, stamping `uuid` and
    /// `filename` when they are absent.
    pub fn with_attributes(mut attributes: Attributes) -> Self {
        if !attributes.contains(UUID) {
            attributes.insert(UUID, uuid::Uuid::new_v4().to_string());
        }
        if !attributes.contains(FILENAME) {
            let name = attributes.get(UUID).unwrap_or_default().to_string();
            attributes.insert(FILENAME, name);
        }
        Self {
            attributes,
            payload: Vec::new(),
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// The record's identity used in log lines.
    pub fn id(&self) -> &str {
        self.attributes.get(UUID).unwrap_or("<unidentified>")
    }
}

mod payload_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// The outcome of one QA inference call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// The predicted answer text.
    pub prediction: String,
    /// A non-fatal error reported alongside the answer; empty when none.
    pub error: String,
}

impl Prediction {
    pub fn answer(prediction: impl Into<String>) -> Self {
        Self {
            prediction: prediction.into(),
            error: String::new(),
        }
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Flattens the prediction into the `prediction` and `error` attributes.
    pub fn into_attributes(self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(PREDICTION, self.prediction);
        attributes.insert(ERROR, self.error);
        attributes
    }
}

/// The named output paths a record can be transferred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Success,
    Failure,
}

impl Relationship {
    pub const ALL: [Relationship; 2] = [Relationship::Success, Relationship::Failure];

    pub fn name(&self) -> &'static str {
        match self {
            Relationship::Success => "success",
            Relationship::Failure => "failure",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Relationship::Success => "Records for which the model produced a prediction.",
            Relationship::Failure => "Records that could not be answered by the model.",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A record together with the relationship it was transferred to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub relationship: Relationship,
    pub record: Record,
}

impl Routed {
    pub fn success(record: Record) -> Self {
        Self {
            relationship: Relationship::Success,
            record,
        }
    }

    pub fn failure(record: Record) -> Self {
        Self {
            relationship: Relationship::Failure,
            record,
        }
    }

    pub fn is_success(&self) -> bool {
        self.relationship == Relationship::Success
    }
}
