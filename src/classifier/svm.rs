//! Support-vector classifier loaded from a JSON model artifact.
//!
//! The artifact is an export of a trained binary SVC: support vectors, their
//! dual coefficients, the intercept and the kernel parameters. An optional
//! standard-scaler step is applied to the input first.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::{Classifier, ClassifierError, Prediction};
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Only artifact layout understood by this loader
const FORMAT_VERSION: u32 = 1;

/// Kernel function and its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Kernel {
    Linear,
    Rbf { gamma: f64 },
    Poly { gamma: f64, coef0: f64, degree: u32 },
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    fn apply(&self, a: &[f64], b: &[f64]) -> f64 {
        match *self {
            Kernel::Linear => dot(a, b),
            Kernel::Rbf { gamma } => {
                let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
                (-gamma * dist).exp()
            }
            Kernel::Poly {
                gamma,
                coef0,
                degree,
            } => (gamma * dot(a, b) + coef0).powi(degree as i32), // bounded at load
            Kernel::Sigmoid { gamma, coef0 } => (gamma * dot(a, b) + coef0).tanh(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Kernel::Linear => "linear",
            Kernel::Rbf { .. } => "RBF",
            Kernel::Poly { .. } => "polynomial",
            Kernel::Sigmoid { .. } => "sigmoid",
        }
    }

    fn params(&self) -> Vec<f64> {
        match *self {
            Kernel::Linear => Vec::new(),
            Kernel::Rbf { gamma } => vec![gamma],
            Kernel::Poly { gamma, coef0, .. } | Kernel::Sigmoid { gamma, coef0 } => {
                vec![gamma, coef0]
            }
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Standardization applied before the kernel: `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmArtifact {
    pub format_version: u32,
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    pub classes: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<Scaler>,
}

/// Binary SVC ready for prediction
#[derive(Debug, Clone)]
pub struct SvmClassifier {
    kernel: Kernel,
    support_vectors: Vec<[f64; FEATURE_COUNT]>,
    dual_coef: Vec<f64>,
    intercept: f64,
    /// `classes[0]` below the boundary, `classes[1]` above it
    classes: [Prediction; 2],
    scaler: Option<Scaler>,
}

fn load_error(message: impl Into<String>) -> ClassifierError {
    ClassifierError::ModelLoad(message.into())
}

fn to_row(row: &[f64], what: &str) -> Result<[f64; FEATURE_COUNT], ClassifierError> {
    if row.iter().any(|v| !v.is_finite()) {
        return Err(load_error(format!("{} contains a non-finite value", what)));
    }
    row.try_into().map_err(|_| {
        load_error(format!(
            "{} has {} values, expected {}",
            what,
            row.len(),
            FEATURE_COUNT
        ))
    })
}

impl SvmClassifier {
    /// Load and validate a model artifact from disk
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        if !path.exists() {
            return Err(load_error(format!("Model not found at {:?}", path)));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| load_error(format!("Failed to read {:?}: {}", path, e)))?;
        let artifact: SvmArtifact = serde_json::from_str(&content)
            .map_err(|e| load_error(format!("Failed to parse {:?}: {}", path, e)))?;

        let classifier = Self::from_artifact(artifact)?;
        info!("Model loaded from {:?}: {}", path, classifier.describe());
        Ok(classifier)
    }

    /// Validate an in-memory artifact
    pub fn from_artifact(artifact: SvmArtifact) -> Result<Self, ClassifierError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(load_error(format!(
                "Unsupported format version {} (expected {})",
                artifact.format_version, FORMAT_VERSION
            )));
        }

        if artifact.support_vectors.is_empty() {
            return Err(load_error("Model has no support vectors"));
        }

        if artifact.dual_coef.len() != artifact.support_vectors.len() {
            return Err(load_error(format!(
                "Model has {} dual coefficients for {} support vectors",
                artifact.dual_coef.len(),
                artifact.support_vectors.len()
            )));
        }

        let support_vectors = artifact
            .support_vectors
            .iter()
            .enumerate()
            .map(|(i, sv)| to_row(sv, &format!("Support vector {}", i)))
            .collect::<Result<Vec<_>, _>>()?;

        let numbers_finite = artifact.intercept.is_finite()
            && artifact.dual_coef.iter().all(|c| c.is_finite())
            && artifact.kernel.params().iter().all(|p| p.is_finite());
        if !numbers_finite {
            return Err(load_error("Model contains a non-finite coefficient"));
        }

        if let Kernel::Poly { degree, .. } = artifact.kernel {
            if i32::try_from(degree).is_err() {
                return Err(load_error(format!(
                    "Polynomial degree {} is out of range",
                    degree
                )));
            }
        }

        let classes = match artifact.classes.as_slice() {
            [0, 1] => [Prediction::Healthy, Prediction::AtRisk],
            [1, 0] => [Prediction::AtRisk, Prediction::Healthy],
            other => {
                return Err(load_error(format!(
                    "Model classes must be 0 and 1, got {:?}",
                    other
                )))
            }
        };

        if let Some(scaler) = &artifact.scaler {
            to_row(&scaler.mean, "Scaler mean")?;
            let scale = to_row(&scaler.scale, "Scaler scale")?;
            if scale.iter().any(|s| *s == 0.0) {
                return Err(load_error("Scaler scale contains a zero"));
            }
        }

        Ok(Self {
            kernel: artifact.kernel,
            support_vectors,
            dual_coef: artifact.dual_coef,
            intercept: artifact.intercept,
            classes,
            scaler: artifact.scaler,
        })
    }

    /// Signed distance from the separating boundary
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        let mut x = *features.values();
        if let Some(scaler) = &self.scaler {
            for ((v, mean), scale) in x.iter_mut().zip(&scaler.mean).zip(&scaler.scale) {
                *v = (*v - mean) / scale;
            }
        }

        let sum: f64 = self
            .support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, coef)| coef * self.kernel.apply(sv, &x))
            .sum();
        sum + self.intercept
    }
}

impl Classifier for SvmClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let score = self.decision_function(features);
        if !score.is_finite() {
            return Err(ClassifierError::InvalidScore(score));
        }
        let prediction = if score > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        };
        debug!("SVM decision {:.4} -> {:?}", score, prediction);
        Ok(prediction)
    }

    fn describe(&self) -> String {
        format!(
            "Support Vector Machine ({} kernel, {} support vectors{})",
            self.kernel.name(),
            self.support_vectors.len(),
            if self.scaler.is_some() {
                ", standardized inputs"
            } else {
                ""
            }
        )
    }
}
