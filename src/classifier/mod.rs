//! Classifier adapter.
//!
//! The prediction model is an opaque capability: given 22 feature values it
//! returns 0 (healthy) or 1 (at risk). It is loaded once at startup and
//! shared read-only behind an `Arc<dyn Classifier>`.

mod svm;

pub use svm::{Kernel, Scaler, SvmArtifact, SvmClassifier};

use serde::Serialize;
use thiserror::Error;

use crate::features::FeatureVector;

/// Errors that can occur while loading or calling a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Model produced a non-finite decision score: {0}")]
    InvalidScore(f64),

    #[error("Model returned an unknown label: {0}")]
    InvalidLabel(i64),
}

/// Binary output of the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Prediction {
    Healthy,
    AtRisk,
}

impl Prediction {
    /// Map a raw model label onto a prediction
    pub fn from_label(label: i64) -> Result<Self, ClassifierError> {
        match label {
            0 => Ok(Self::Healthy),
            1 => Ok(Self::AtRisk),
            other => Err(ClassifierError::InvalidLabel(other)),
        }
    }

    pub fn label(&self) -> i64 {
        match self {
            Self::Healthy => 0,
            Self::AtRisk => 1,
        }
    }
}

/// A pre-trained binary decision function over a feature vector
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError>;

    /// Short human-readable description for the model info page
    fn describe(&self) -> String;
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Classifier that always returns the same label and counts its calls
    pub struct FixedClassifier {
        label: i64,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        pub fn new(label: i64) -> Self {
            Self {
                label,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> Result<Prediction, ClassifierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Prediction::from_label(self.label)
        }

        fn describe(&self) -> String {
            format!("Fixed classifier (always {})", self.label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_from_label() {
        assert_eq!(Prediction::from_label(0).unwrap(), Prediction::Healthy);
        assert_eq!(Prediction::from_label(1).unwrap(), Prediction::AtRisk);
        assert!(matches!(
            Prediction::from_label(2),
            Err(ClassifierError::InvalidLabel(2))
        ));
    }

    #[test]
    fn test_prediction_label_round_trip() {
        for p in [Prediction::Healthy, Prediction::AtRisk] {
            assert_eq!(Prediction::from_label(p.label()).unwrap(), p);
        }
    }

    #[test]
    fn test_stub_counts_calls() {
        let stub = stub::FixedClassifier::new(1);
        let features = FeatureVector::new([0.0; 22]).unwrap();
        assert_eq!(stub.predict(&features).unwrap(), Prediction::AtRisk);
        assert_eq!(stub.calls(), 1);
    }
}
