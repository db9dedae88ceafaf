//! Input validation for the prediction form.
//!
//! Turns raw form text into a [`FeatureVector`]. Every token is parsed before
//! the count is checked, so a bad token wins over a wrong count.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES, SPREAD1_INDEX};

/// Errors produced while validating form input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Value {index} is not a valid number: {token:?}")]
    Parse { index: usize, token: String },

    #[error("Expected {expected} values, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("{feature} must not be negative (got {value})")]
    OutOfRange { feature: &'static str, value: f64 },
}

/// Raw text as submitted through the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    /// One string per labeled field
    Fields(Vec<String>),
    /// A single comma-separated string
    Delimited(String),
}

impl FormInput {
    /// Split the input into raw tokens.
    ///
    /// An empty delimited string has no tokens at all; whitespace alone is
    /// one (invalid) token.
    fn tokens(&self) -> Vec<&str> {
        match self {
            FormInput::Fields(fields) => fields.iter().map(String::as_str).collect(),
            FormInput::Delimited(text) if text.is_empty() => Vec::new(),
            FormInput::Delimited(text) => text.split(',').collect(),
        }
    }
}

/// How strictly individual feature values are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Accept any finite value
    #[default]
    Permissive,
    /// Reject negative values for features that cannot be negative
    Physiological,
}

impl std::str::FromStr for RangePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "physiological" => Ok(Self::Physiological),
            _ => Err(format!("Unknown range policy: {}", s)),
        }
    }
}

fn parse_token(index: usize, token: &str) -> Result<f64, ValidationError> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::Parse {
            index,
            token: trimmed.to_string(),
        }),
    }
}

/// Validate raw input into a feature vector
pub fn validate(input: &FormInput, policy: RangePolicy) -> Result<FeatureVector, ValidationError> {
    let values = input
        .tokens()
        .into_iter()
        .enumerate()
        .map(|(index, token)| parse_token(index, token))
        .collect::<Result<Vec<f64>, _>>()?;

    let actual = values.len();
    let values: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ValidationError::Shape {
        expected: FEATURE_COUNT,
        actual,
    })?;

    if policy == RangePolicy::Physiological {
        check_ranges(&values)?;
    }

    Ok(FeatureVector::from_parsed(values))
}

fn check_ranges(values: &[f64; FEATURE_COUNT]) -> Result<(), ValidationError> {
    for (index, &value) in values.iter().enumerate() {
        if index != SPREAD1_INDEX && value < 0.0 {
            return Err(ValidationError::OutOfRange {
                feature: FEATURE_NAMES[index],
                value,
            });
        }
    }
    Ok(())
}

/// One row of the UCI Parkinson's voice dataset, in feature order
#[cfg(test)]
pub(crate) const SAMPLE_CSV: &str = "119.992,157.302,74.997,0.00784,0.00007,0.0037,0.00554,0.01109,0.04374,0.426,0.02182,0.0313,0.02971,0.06545,0.02211,21.033,0.414783,0.815285,-4.813031,0.266482,2.301442,0.284654";
