use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PredictorError;

/// Bearing specification sent to the bearing material endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingInput {
    #[serde(rename = "D_i")]
    pub d_i: f64,
    #[serde(rename = "Omega")]
    pub omega: f64,
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "K_a")]
    pub k_a: f64,
    pub theta: f64,
    #[serde(rename = "Power")]
    pub power: String,
    #[serde(rename = "Lubrication")]
    pub lubrication: String,
    pub width: String,
    #[serde(rename = "Cool")]
    pub cool: String,
    #[serde(rename = "Ring")]
    pub ring: String,
    #[serde(rename = "Ball")]
    pub ball: String,
    #[serde(rename = "Arrangement")]
    pub arrangement: String,
    pub height: String,
    #[serde(rename = "Standard")]
    pub standard: String,
    #[serde(rename = "Seal")]
    pub seal: String,
    #[serde(rename = "Cage")]
    pub cage: String,
}

impl BearingInput {
    /// Development sample used until the form collects real bearing specs.
    pub fn sample() -> Self {
        Self {
            d_i: 55.0,
            omega: 10000.0,
            l: 9.371849,
            k_a: 119.146737,
            theta: 18.0,
            power: "Motor Built-in".into(),
            lubrication: "OIL AIR".into(),
            width: "10/20".into(),
            cool: "Jacket Cooling".into(),
            ring: "SUJ2".into(),
            ball: "CERAMIC".into(),
            arrangement: "DB".into(),
            height: "19/10/02".into(),
            standard: "Robust".into(),
            seal: "TYN".into(),
            cage: "TYN".into(),
        }
    }
}

/// One raw section: parallel arrays of probabilities and class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPrediction {
    #[serde(rename = "Probabilities")]
    pub probabilities: Vec<String>,
    #[serde(rename = "Classes")]
    pub classes: Vec<String>,
}

/// Raw response of the bearing material endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "Ring")]
    pub ring: SectionPrediction,
    #[serde(rename = "Ball")]
    pub ball: SectionPrediction,
    #[serde(rename = "Arrangement")]
    pub arrangement: SectionPrediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    Ring,
    Ball,
    Arrangement,
}

/// Sections in display order.
pub const SECTION_NAMES: [SectionName; 3] =
    [SectionName::Ring, SectionName::Ball, SectionName::Arrangement];

impl SectionName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ring => "Ring",
            Self::Ball => "Ball",
            Self::Arrangement => "Arrangement",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PredictionResponse {
    pub fn section(&self, name: SectionName) -> &SectionPrediction {
        match name {
            SectionName::Ring => &self.ring,
            SectionName::Ball => &self.ball,
            SectionName::Arrangement => &self.arrangement,
        }
    }
}

/// A class and its parsed probability.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionItem {
    pub probability: f64,
    pub class_name: String,
}

/// Display form of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionResult {
    pub section_name: SectionName,
    pub items: Vec<PredictionItem>,
    pub recommended_index: usize,
}

impl SectionResult {
    pub fn recommended(&self) -> &PredictionItem {
        &self.items[self.recommended_index]
    }
}

/// Turns a raw response into one ranked result per section, in [`SECTION_NAMES`] order.
///
/// # Errors
/// Returns `MalformedSection` for empty or misaligned sections and `InvalidProbability`
/// when a probability is not a number.
pub fn transform_response(res: &PredictionResponse) -> Result<Vec<SectionResult>, PredictorError> {
    SECTION_NAMES
        .iter()
        .map(|&name| transform_section(name, res.section(name)))
        .collect()
}

fn transform_section(
    name: SectionName,
    section: &SectionPrediction,
) -> Result<SectionResult, PredictorError> {
    if section.classes.len() != section.probabilities.len() {
        return Err(PredictorError::MalformedSection {
            section: name,
            reason: format!(
                "{} classes but {} probabilities",
                section.classes.len(),
                section.probabilities.len()
            ),
        });
    }
    if section.classes.is_empty() {
        return Err(PredictorError::MalformedSection {
            section: name,
            reason: "no classes".into(),
        });
    }

    let items = section
        .classes
        .iter()
        .zip(&section.probabilities)
        .map(|(class_name, raw)| {
            let probability = raw.trim().parse::<f64>().map_err(|_| {
                PredictorError::InvalidProbability {
                    section: name,
                    value: raw.clone(),
                }
            })?;
            Ok(PredictionItem {
                probability,
                class_name: class_name.clone(),
            })
        })
        .collect::<Result<Vec<_>, PredictorError>>()?;

    Ok(SectionResult {
        section_name: name,
        recommended_index: argmax(&items),
        items,
    })
}

/// Index of the highest probability; the first one wins on ties.
fn argmax(items: &[PredictionItem]) -> usize {
    items
        .iter()
        .enumerate()
        .fold(0, |best, (i, item)| {
            if item.probability > items[best].probability {
                i
            } else {
                best
            }
        })
}
