use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::PredictorError;

/// Body sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest<'a> {
    pub features: &'a [f64],
}

/// Successful response of the prediction endpoint.
///
/// `prediction` is a class label. Any JSON number with no fractional part is
/// accepted, so `1` and `1.0` both decode to class 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(deserialize_with = "whole_number")]
    pub prediction: i64,
    pub confidence: f64,
}

fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if n.fract() != 0.0 || !(i64::MIN as f64..=i64::MAX as f64).contains(&n) {
        return Err(de::Error::custom(format!("class label {n} is not a whole number")));
    }
    Ok(n as i64)
}

/// Status of the single prediction slot of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PredictionState {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(String),
}

impl PredictionState {
    /// Drops any previous outcome and enters `Loading`.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Records the outcome of a request.
    pub fn settle(&mut self, outcome: Result<PredictionResult, PredictorError>) {
        *self = match outcome {
            Ok(result) => Self::Succeeded(result),
            Err(e) => Self::Failed(e.to_string()),
        };
    }

    /// Records a failure that happened before any request was made.
    pub fn fail(&mut self, message: impl Into<String>) {
        *self = Self::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Confidence as a percentage with two decimals, e.g. `"87.50%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Fill ratio of the confidence bar, clamped to `[0, 1]`.
pub fn confidence_ratio(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_features_array() {
        let body = serde_json::to_string(&PredictionRequest { features: &[1.0, 2.5] }).unwrap();
        assert_eq!(body, r#"{"features":[1.0,2.5]}"#);
    }

    #[test]
    fn class_label_accepts_integral_floats() {
        let r: PredictionResult = serde_json::from_str(r#"{"prediction":1.0,"confidence":0.5}"#).unwrap();
        assert_eq!(r.prediction, 1);
        let r: PredictionResult = serde_json::from_str(r#"{"prediction":-3,"confidence":0.5}"#).unwrap();
        assert_eq!(r.prediction, -3);

        assert!(serde_json::from_str::<PredictionResult>(r#"{"prediction":1.5,"confidence":0.5}"#).is_err());
        assert!(serde_json::from_str::<PredictionResult>(r#"{"prediction":"1","confidence":0.5}"#).is_err());
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let mut state = PredictionState::Succeeded(PredictionResult {
            prediction: 1,
            confidence: 0.5,
        });
        state.begin();
        assert!(state.is_loading());
        assert!(state.result().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn settle_maps_errors_to_messages() {
        let mut state = PredictionState::Loading;
        state.settle(Err(PredictorError::RequestFailed));
        assert_eq!(state.error(), Some(crate::error::REQUEST_FAILED_MSG));

        let result = PredictionResult { prediction: 0, confidence: 0.9 };
        state.settle(Ok(result));
        assert_eq!(state.result(), Some(&result));
        assert!(state.error().is_none());
    }

    #[test]
    fn confidence_formatting() {
        assert_eq!(format_confidence(0.875), "87.50%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(confidence_ratio(1.7), 1.0);
        assert_eq!(confidence_ratio(-0.2), 0.0);
        assert_eq!(confidence_ratio(f64::NAN), 0.0);
    }
}
