use std::time::Duration;

use crate::bearing::{BearingInput, PredictionResponse, SectionPrediction};

/// Mock bearing material endpoint.
///
/// Today: fixed response after a fixed delay.
/// Tomorrow: replace with the real bearing prediction service.
#[derive(Debug, Clone)]
pub struct MockBearingApi {
    delay: Duration,
}

impl MockBearingApi {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits for the configured delay and returns the canned response.
    pub async fn predict(&self, input: &BearingInput) -> PredictionResponse {
        log::debug!(
            "mock bearing prediction for D_i={} Omega={} ({:?} delay)",
            input.d_i,
            input.omega,
            self.delay
        );
        tokio::time::sleep(self.delay).await;
        sample_response()
    }
}

fn section(probabilities: [&str; 3], classes: [&str; 3]) -> SectionPrediction {
    SectionPrediction {
        probabilities: probabilities.iter().map(|s| s.to_string()).collect(),
        classes: classes.iter().map(|s| s.to_string()).collect(),
    }
}

/// The canned response served by [`MockBearingApi`].
pub fn sample_response() -> PredictionResponse {
    PredictionResponse {
        ring: section(["0.015", "0.985", "0.000"], ["SHX", "SUJ2", "SUJ2EP"]),
        ball: section(["0.900", "0.065", "0.035"], ["CERAMIC", "SUJ2", "SUJ2(EQTF)"]),
        arrangement: section(["0.925", "0.065", "0.010"], ["DB", "DBB", "DBD"]),
    }
}
