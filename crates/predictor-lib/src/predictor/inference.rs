//! ONNX inference using tract
//!
//! Only the model's first output is evaluated and read as the predicted
//! class label. Everything that does not feed it is pruned before
//! optimization, so a trailing probability `ZipMap` from a scikit-learn
//! export never has to run.
//!
//! tract implements the standard ONNX operator set plus
//! `TreeEnsembleClassifier` from `ai.onnx.ml`. Random forests export as
//! is; SVMs must be exported as their decision function in standard
//! operators (`MatMul`, `Add`, `Greater` for a linear kernel) rather than
//! as an `SVMClassifier` node. Any operator tract cannot run is reported
//! by name when the artifact is loaded.

use super::{Classifier, ClassifierProvider};
use crate::error::LoadError;
use crate::models::{FeatureVector, Task};
use crate::schema::{schema_for, task_info};
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tract_onnx::prelude::*;
use tract_onnx::tract_core::ops::unimpl::UnimplementedOp;
use tracing::{debug, info, warn};

/// File extension of exported classifier artifacts
pub const MODEL_EXTENSION: &str = "onnx";

/// Maximum inference latency before warning
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Binary classifier backed by an optimized tract plan
pub struct OnnxClassifier {
    task: Task,
    model: TractModel,
    num_features: usize,
}

impl OnnxClassifier {
    /// Build a classifier for `task` from ONNX model bytes.
    ///
    /// The input is pinned to `[1, arity]` of the task's schema, so a model
    /// trained on a different number of columns fails here rather than at
    /// prediction time.
    pub fn new(task: Task, model_bytes: &[u8]) -> Result<Self> {
        let num_features = schema_for(task).len();
        let model = Self::load_model(model_bytes, num_features)?;
        Ok(Self {
            task,
            model,
            num_features,
        })
    }

    fn load_model(model_bytes: &[u8], num_features: usize) -> Result<TractModel> {
        let mut model = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .context("Failed to parse ONNX model")?
            .with_input_fact(0, f32::fact([1, num_features]).into())
            .context("Failed to set input shape")?;

        let label = *model
            .output_outlets()?
            .first()
            .context("Model declares no outputs")?;
        model.set_output_outlets(&[label])?;
        model.compact().context("Failed to prune unused outputs")?;

        if let Some(node) = model.nodes().iter().find(|n| n.op_is::<UnimplementedOp>()) {
            anyhow::bail!(
                "node {:?} uses {}, which the inference runtime does not support",
                node.name,
                node.op().name()
            );
        }

        let plan = model
            .into_optimized()
            .context("Failed to optimize model")?
            .into_runnable()
            .context("Failed to create runnable model")?;
        Ok(plan)
    }

    fn features_to_tensor(&self, features: &FeatureVector) -> Result<Tensor> {
        anyhow::ensure!(
            features.len() == self.num_features,
            "{} classifier expects {} features, got {}",
            self.task,
            self.num_features,
            features.len()
        );
        let data: Vec<f32> = features.as_slice().iter().map(|v| *v as f32).collect();
        let array = tract_ndarray::Array2::from_shape_vec((1, self.num_features), data)
            .context("Failed to shape input tensor")?;
        Ok(array.into())
    }

    /// Read the class from a label tensor of any numeric or boolean type
    fn tensor_to_class(output: &Tensor) -> Result<i64> {
        let labels = output
            .cast_to::<i64>()
            .context("Model label output is not numeric")?;
        labels
            .as_slice::<i64>()?
            .first()
            .copied()
            .context("Model returned an empty label tensor")
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let start = Instant::now();
        let input = self.features_to_tensor(features)?;

        let result = self.model.run(tvec!(input.into()))?;
        let output = result.first().context("No output from model")?;
        let class = Self::tensor_to_class(output)?;

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                task = %self.task,
                elapsed_ms = elapsed.as_millis(),
                "Inference exceeded {}ms target",
                MAX_INFERENCE_MS
            );
        } else {
            debug!(task = %self.task, elapsed_us = elapsed.as_micros(), "Inference completed");
        }

        Ok(class)
    }
}

/// Loads the per-task ONNX artifacts from a model directory
#[derive(Debug, Clone)]
pub struct OnnxProvider {
    model_dir: PathBuf,
    checksums: HashMap<Task, String>,
}

impl OnnxProvider {
    pub fn new(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            checksums: HashMap::new(),
        }
    }

    /// Require the artifact for `task` to have this SHA256 (hex) digest
    pub fn with_checksum(mut self, task: Task, sha256_hex: impl Into<String>) -> Self {
        self.checksums.insert(task, sha256_hex.into());
        self
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Location of a task's artifact under the model directory
    pub fn artifact_path(&self, task: Task) -> PathBuf {
        self.model_dir
            .join(task_info(task).artifact)
            .with_extension(MODEL_EXTENSION)
    }

    fn verify_checksum(&self, task: Task, bytes: &[u8]) -> Result<(), LoadError> {
        let Some(expected) = self.checksums.get(&task) else {
            return Ok(());
        };
        let computed = compute_checksum(bytes);
        if !computed.eq_ignore_ascii_case(expected.trim()) {
            return Err(LoadError::Corrupt {
                task,
                reason: format!("checksum mismatch: expected {}, got {}", expected, computed),
            });
        }
        debug!(task = %task, checksum = %computed, "Model checksum validated");
        Ok(())
    }
}

impl ClassifierProvider for OnnxProvider {
    fn load(&self, task: Task) -> Result<Arc<dyn Classifier>, LoadError> {
        let path = self.artifact_path(task);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound {
                task,
                path: path.clone(),
            },
            _ => LoadError::Corrupt {
                task,
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        self.verify_checksum(task, &bytes)?;

        let classifier = OnnxClassifier::new(task, &bytes).map_err(|e| LoadError::Corrupt {
            task,
            reason: format!("{:#}", e),
        })?;

        info!(
            task = %task,
            path = %path.display(),
            size_bytes = bytes.len(),
            "Loaded ONNX classifier"
        );
        Ok(Arc::new(classifier))
    }
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
