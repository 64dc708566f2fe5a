//! Nutrition and roast estimation.
//!
//! The estimator is an external collaborator: given a food description it returns a
//! nutrition estimate plus a roast. Every failure mode (transport, upstream status,
//! malformed envelope, schema violation) is an [`EstimatorError`]; callers treat them
//! all as a single "estimation failed" outcome.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod gemini;
mod roast_mode;

pub use gemini::GeminiEstimator;
pub use roast_mode::RoastMode;

/// Input handed to the estimator.
#[derive(Debug, Clone)]
pub struct FoodDescription {
    pub name: String,
    pub notes: Option<String>,
    pub image: Option<Vec<u8>>,
    pub roast_mode: RoastMode,
}

/// Schema-validated estimator output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodInfo {
    pub calories: f64,
    #[serde(default)]
    pub protein_g: Option<f64>,
    #[serde(default)]
    pub fat_g: Option<f64>,
    #[serde(default)]
    pub carbs_g: Option<f64>,
    pub roast: String,
}

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("estimator request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("estimator returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("malformed estimator response: {0}")]
    Malformed(String),

    #[error("estimate violates schema: {0}")]
    Schema(String),
}

impl FoodInfo {
    /// Parses the model's structured output and checks it against the expected schema.
    pub fn from_model_json(raw: &str) -> Result<Self, EstimatorError> {
        let info: FoodInfo =
            serde_json::from_str(raw).map_err(|e| EstimatorError::Schema(e.to_string()))?;
        info.validate()
    }

    pub fn validate(self) -> Result<Self, EstimatorError> {
        check_amount("calories", Some(self.calories))?;
        check_amount("protein_g", self.protein_g)?;
        check_amount("fat_g", self.fat_g)?;
        check_amount("carbs_g", self.carbs_g)?;
        Ok(self)
    }
}

fn check_amount(field: &str, value: Option<f64>) -> Result<(), EstimatorError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(EstimatorError::Schema(format!(
            "{field} must be a non-negative number, got {v}"
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, description: &FoodDescription) -> Result<FoodInfo, EstimatorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_estimate() {
        let info = FoodInfo::from_model_json(r#"{"calories": 105, "roast": "not bad"}"#)
            .expect("valid estimate");
        assert_eq!(info.calories, 105.0);
        assert_eq!(info.protein_g, None);
        assert_eq!(info.roast, "not bad");
    }

    #[test]
    fn accepts_explicit_nulls_and_extra_fields() {
        let info = FoodInfo::from_model_json(
            r#"{"calories": 250.5, "protein_g": null, "fat_g": 9, "carbs_g": 30, "roast": "meh", "confidence": 0.4}"#,
        )
        .expect("valid estimate");
        assert_eq!(info.fat_g, Some(9.0));
        assert_eq!(info.protein_g, None);
    }

    #[test]
    fn rejects_missing_calories() {
        let err = FoodInfo::from_model_json(r#"{"roast": "hmm"}"#).unwrap_err();
        assert!(matches!(err, EstimatorError::Schema(_)));
    }

    #[test]
    fn rejects_missing_roast() {
        let err = FoodInfo::from_model_json(r#"{"calories": 10}"#).unwrap_err();
        assert!(matches!(err, EstimatorError::Schema(_)));
    }

    #[test]
    fn rejects_negative_amounts() {
        let err =
            FoodInfo::from_model_json(r#"{"calories": 10, "carbs_g": -3, "roast": "x"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("carbs_g"));
    }

    #[test]
    fn rejects_wrong_types() {
        let err = FoodInfo::from_model_json(r#"{"calories": "lots", "roast": "x"}"#).unwrap_err();
        assert!(matches!(err, EstimatorError::Schema(_)));
    }
}
