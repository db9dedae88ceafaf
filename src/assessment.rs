//! Assessment dispatch: validate form input, call the classifier, produce a
//! verdict.
//!
//! Each call is independent. A validation failure returns before the
//! classifier is touched.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classifier::{Classifier, ClassifierError, Prediction};
use crate::features::FeatureVector;
use crate::validation::{validate, FormInput, RangePolicy, ValidationError};

/// Errors that abort an assessment
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

impl AssessmentError {
    /// Message shown to the user on the prediction page
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::Parse { .. }) => {
                "Please enter valid numerical values.".to_string()
            }
            Self::Validation(ValidationError::Shape { expected, .. }) => {
                format!("Please enter exactly {} values.", expected)
            }
            Self::Validation(e @ ValidationError::OutOfRange { .. }) => format!("{}.", e),
            Self::Classifier(_) => {
                "The prediction model could not process this input.".to_string()
            }
        }
    }
}

/// User-facing reading of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    NoRiskDetected,
    RiskDetected,
}

impl From<Prediction> for Verdict {
    fn from(prediction: Prediction) -> Self {
        match prediction {
            Prediction::Healthy => Self::NoRiskDetected,
            Prediction::AtRisk => Self::RiskDetected,
        }
    }
}

impl Verdict {
    pub fn headline(&self) -> &'static str {
        match self {
            Self::NoRiskDetected => "No Parkinson's Detected!",
            Self::RiskDetected => "Parkinson's Disease Detected!",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            Self::NoRiskDetected => {
                "The person is healthy based on the input data. Keep maintaining a good lifestyle!"
            }
            Self::RiskDetected => {
                "The model predicts a risk of Parkinson's Disease. Please consult a doctor for further analysis."
            }
        }
    }

    /// Short machine-style label, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRiskDetected => "no risk detected",
            Self::RiskDetected => "risk detected",
        }
    }
}

/// Outcome of one successful assessment
#[derive(Debug, Clone)]
pub struct Assessment {
    pub id: Uuid,
    pub features: FeatureVector,
    pub prediction: Prediction,
    pub verdict: Verdict,
}

/// Run one assessment against the given classifier
pub fn assess(
    classifier: &dyn Classifier,
    input: &FormInput,
    policy: RangePolicy,
) -> Result<Assessment, AssessmentError> {
    let id = Uuid::new_v4();

    let features = validate(input, policy).map_err(|e| {
        info!(assessment = %id, "Input rejected: {}", e);
        e
    })?;
    debug!(assessment = %id, "Features: {}", features);

    let prediction = classifier.predict(&features).map_err(|e| {
        warn!(assessment = %id, "Classifier failed: {}", e);
        e
    })?;
    let verdict = Verdict::from(prediction);

    info!(assessment = %id, "Verdict: {}", verdict.as_str());

    Ok(Assessment {
        id,
        features,
        prediction,
        verdict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::stub::FixedClassifier;
    use crate::features::FEATURE_COUNT;
    use crate::validation::SAMPLE_CSV;

    fn csv_input() -> FormInput {
        FormInput::Delimited(SAMPLE_CSV.to_string())
    }

    #[test]
    fn test_stub_zero_gives_no_risk() {
        let stub = FixedClassifier::new(0);
        let result = assess(&stub, &csv_input(), RangePolicy::Permissive).unwrap();
        assert_eq!(result.prediction, Prediction::Healthy);
        assert_eq!(result.verdict, Verdict::NoRiskDetected);
        assert_eq!(result.verdict.as_str(), "no risk detected");
    }

    #[test]
    fn test_stub_one_gives_risk() {
        let stub = FixedClassifier::new(1);
        let result = assess(&stub, &csv_input(), RangePolicy::Permissive).unwrap();
        assert_eq!(result.verdict, Verdict::RiskDetected);
        assert_eq!(result.verdict.as_str(), "risk detected");
        assert_eq!(result.features.values()[0], 119.992);
    }

    #[test]
    fn test_short_input_never_reaches_classifier() {
        let stub = FixedClassifier::new(1);
        let short: Vec<&str> = SAMPLE_CSV.split(',').take(21).collect();
        let err = assess(
            &stub,
            &FormInput::Delimited(short.join(",")),
            RangePolicy::Permissive,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::Validation(ValidationError::Shape { actual: 21, .. })
        ));
        assert!(err.user_message().contains("22"));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_abc_field_is_parse_error() {
        let stub = FixedClassifier::new(0);
        let mut fields = vec!["1.0".to_string(); FEATURE_COUNT];
        fields[10] = "abc".to_string();
        let err = assess(&stub, &FormInput::Fields(fields), RangePolicy::Permissive).unwrap_err();

        assert!(matches!(
            err,
            AssessmentError::Validation(ValidationError::Parse { .. })
        ));
        assert_eq!(err.user_message(), "Please enter valid numerical values.");
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_classifier_failure_surfaces() {
        let stub = FixedClassifier::new(7);
        let err = assess(&stub, &csv_input(), RangePolicy::Permissive).unwrap_err();
        assert!(matches!(
            err,
            AssessmentError::Classifier(ClassifierError::InvalidLabel(7))
        ));
        assert_eq!(stub.calls(), 1);
    }

    #[test]
    fn test_out_of_range_message() {
        let stub = FixedClassifier::new(0);
        let csv = SAMPLE_CSV.replacen("21.033", "-21.033", 1);
        let err = assess(&stub, &FormInput::Delimited(csv), RangePolicy::Physiological)
            .unwrap_err();
        assert_eq!(err.user_message(), "HNR must not be negative (got -21.033).");
    }

    #[test]
    fn test_verdict_text() {
        assert!(Verdict::NoRiskDetected.headline().starts_with("No Parkinson"));
        assert!(Verdict::RiskDetected.detail().contains("consult a doctor"));
    }
}
