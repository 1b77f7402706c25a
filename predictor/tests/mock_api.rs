use std::time::{Duration, Instant};

use predictor::{
    bearing::{self, BearingInput},
    mock::{self, MockBearingApi},
};

#[tokio::test]
async fn mock_waits_for_delay_and_returns_fixed_sections() {
    let api = MockBearingApi::new(Duration::from_millis(30));
    let started = Instant::now();

    let response = api.predict(&BearingInput::sample()).await;

    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(response, mock::sample_response());
    assert_eq!(response.ring.classes, vec!["SHX", "SUJ2", "SUJ2EP"]);
    assert_eq!(response.arrangement.probabilities, vec!["0.925", "0.065", "0.010"]);
}

#[tokio::test]
async fn mock_response_transforms_into_recommendations() {
    let api = MockBearingApi::new(Duration::ZERO);
    let response = api.predict(&BearingInput::sample()).await;

    let recommended = bearing::transform_response(&response)
        .unwrap()
        .iter()
        .map(|s| s.recommended().class_name.clone())
        .collect::<Vec<_>>();

    assert_eq!(recommended, vec!["SUJ2", "CERAMIC", "DB"]);
}
