use crate::error::PredictorError;

/// Number of feature slots the model expects.
pub const FEATURE_COUNT: usize = 5;

/// Initial contents of the form, also restored on reset.
pub const DEFAULT_FEATURES: [&str; FEATURE_COUNT] = ["1.0", "2.0", "3.0", "4.0", "5.0"];

pub fn is_non_empty(s: &str) -> bool {
    !s.is_empty()
}

/// Returns true when no slot is the empty string.
pub fn are_all_features_valid<S: AsRef<str>>(features: &[S]) -> bool {
    features.iter().all(|f| is_non_empty(f.as_ref()))
}

/// Parses a single slot into a finite number.
///
/// # Errors
/// Returns `InvalidFeature` carrying the original text if the slot is not a finite number.
pub fn parse_number(s: &str) -> Result<f64, PredictorError> {
    match s.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(PredictorError::InvalidFeature { value: s.to_string() }),
    }
}

/// Parses every slot, stopping at the first one that is not a number.
///
/// # Errors
/// Returns the error of the first unparseable slot.
pub fn parse_features<S: AsRef<str>>(features: &[S]) -> Result<Vec<f64>, PredictorError> {
    features.iter().map(|f| parse_number(f.as_ref())).collect()
}

/// Returns a copy of `values` with the slot at `index` replaced.
///
/// An out of range index yields an unchanged copy.
pub fn update_at_index<T: Clone>(values: &[T], index: usize, value: T) -> Vec<T> {
    values
        .iter()
        .enumerate()
        .map(|(i, item)| if i == index { value.clone() } else { item.clone() })
        .collect()
}

/// The textual contents of the feature form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureForm {
    values: Vec<String>,
}

impl FeatureForm {
    /// Creates a form holding [`DEFAULT_FEATURES`].
    pub fn new() -> Self {
        Self {
            values: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn update(&mut self, index: usize, value: impl Into<String>) {
        self.values = update_at_index(&self.values, index, value.into());
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_valid(&self) -> bool {
        are_all_features_valid(&self.values)
    }

    /// Converts the form into the numeric vector sent to the endpoint.
    ///
    /// # Errors
    /// Returns `InvalidFeature` for the first slot that is not a number.
    pub fn parse(&self) -> Result<Vec<f64>, PredictorError> {
        parse_features(&self.values)
    }
}

impl Default for FeatureForm {
    fn default() -> Self {
        Self::new()
    }
}
