//! Core data models for the disease predictor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prediction task selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl Task {
    /// Every supported task, in menu order
    pub const ALL: [Task; 3] = [Task::Diabetes, Task::HeartDisease, Task::Parkinsons];

    /// Stable identifier used in URLs, metrics labels and logs
    pub fn slug(&self) -> &'static str {
        match self {
            Task::Diabetes => "diabetes",
            Task::HeartDisease => "heart_disease",
            Task::Parkinsons => "parkinsons",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a task identifier is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task '{0}' (expected diabetes, heart_disease or parkinsons)")]
pub struct UnknownTask(pub String);

impl FromStr for Task {
    type Err = UnknownTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "diabetes" => Ok(Task::Diabetes),
            "heart_disease" | "heart" => Ok(Task::HeartDisease),
            "parkinsons" | "parkinson" => Ok(Task::Parkinsons),
            _ => Err(UnknownTask(s.to_string())),
        }
    }
}

/// One named input field of a feature schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Machine name, unique within the schema
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
}

/// Fixed (positive, negative) verdict text for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessagePair {
    pub positive: &'static str,
    pub negative: &'static str,
}

impl MessagePair {
    pub fn for_label(&self, label: Label) -> &'static str {
        match label {
            Label::Positive => self.positive,
            Label::Negative => self.negative,
        }
    }
}

/// User-entered text values, one per schema field, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput(Vec<String>);

impl RawInput {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for RawInput {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<'a> FromIterator<&'a str> for RawInput {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// Numeric features in schema order, ready for a classifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub(crate) fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Binary verdict of a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Map a raw class index to a label; only 0 and 1 are valid
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Label::Positive),
            0 => Some(Label::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub task: Task,
    pub label: Label,
    pub message: String,
}
