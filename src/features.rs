//! Voice-measurement features used by the Parkinson's classifier.
//!
//! The order of [`FEATURE_NAMES`] is the order the model was trained on and
//! must never change.

use std::fmt;

/// Number of features the classifier expects
pub const FEATURE_COUNT: usize = 22;

/// Feature labels, in classifier order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "MDVP:Fo(Hz)",
    "MDVP:Fhi(Hz)",
    "MDVP:Flo(Hz)",
    "MDVP:Jitter(%)",
    "MDVP:Jitter(Abs)",
    "MDVP:RAP",
    "MDVP:PPQ",
    "Jitter:DDP",
    "MDVP:Shimmer",
    "MDVP:Shimmer(dB)",
    "Shimmer:APQ3",
    "Shimmer:APQ5",
    "MDVP:APQ",
    "Shimmer:DDA",
    "NHR",
    "HNR",
    "RPDE",
    "DFA",
    "spread1",
    "spread2",
    "D2",
    "PPE",
];

/// Index of `spread1`, the only feature that is negative in normal recordings
pub const SPREAD1_INDEX: usize = 18;

/// Ordered, fixed-length vector of finite feature values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Returns `None` if any value is NaN or infinite
    pub fn new(values: [f64; FEATURE_COUNT]) -> Option<Self> {
        if values.iter().all(|v| v.is_finite()) {
            Some(Self(values))
        } else {
            None
        }
    }

    /// Wrap values the validator has already checked for finiteness
    pub(crate) fn from_parsed(values: [f64; FEATURE_COUNT]) -> Self {
        debug_assert!(values.iter().all(|v| v.is_finite()));
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names_are_unique() {
        let mut names = FEATURE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_spread1_index() {
        assert_eq!(FEATURE_NAMES[SPREAD1_INDEX], "spread1");
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut values = [1.0; FEATURE_COUNT];
        assert!(FeatureVector::new(values).is_some());
        values[3] = f64::NAN;
        assert!(FeatureVector::new(values).is_none());
        values[3] = f64::INFINITY;
        assert!(FeatureVector::new(values).is_none());
    }

    #[test]
    fn test_display_is_comma_separated() {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = 119.99;
        values[21] = 0.3;
        let text = FeatureVector::new(values).unwrap().to_string();
        assert!(text.starts_with("119.99,0,"));
        assert!(text.ends_with(",0.3"));
        assert_eq!(text.split(',').count(), FEATURE_COUNT);
    }
}
