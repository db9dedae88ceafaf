//! Parkinson's disease prediction from voice measurements.
//!
//! Collects 22 voice features through a local web form, validates them, and
//! passes them to a pre-trained binary classifier.

pub mod assessment;
pub mod classifier;
pub mod config;
pub mod features;
pub mod validation;
pub mod web;
