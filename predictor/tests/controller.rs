use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    thread,
    time::{Duration, Instant},
};

use predictor::{
    BearingState, Controller, Predict, PredictionResult, PredictionState, PredictorError, TabId,
    bearing::SectionName, error::REQUEST_FAILED_MSG, mock::MockBearingApi, tabs::ParamKey,
};

const WAIT: Duration = Duration::from_secs(5);

/// Replays scripted outcomes and records the features it was called with.
#[derive(Default)]
struct ScriptedPredictor {
    outcomes: Mutex<VecDeque<Result<PredictionResult, PredictorError>>>,
    calls: Mutex<Vec<Vec<f64>>>,
}

impl ScriptedPredictor {
    fn new(outcomes: Vec<Result<PredictionResult, PredictorError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<f64>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Predict for ScriptedPredictor {
    fn predict(&self, features: &[f64]) -> Result<PredictionResult, PredictorError> {
        self.calls.lock().unwrap().push(features.to_vec());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(PredictorError::RequestFailed))
    }

    fn health(&self) -> bool {
        false
    }
}

/// Sleeps for `features[0]` milliseconds and answers with that number as the class.
struct SleepyPredictor;

impl Predict for SleepyPredictor {
    fn predict(&self, features: &[f64]) -> Result<PredictionResult, PredictorError> {
        let millis = features[0] as u64;
        thread::sleep(Duration::from_millis(millis));
        Ok(PredictionResult {
            prediction: millis as i64,
            confidence: 0.5,
        })
    }
}

fn controller(predictor: Arc<ScriptedPredictor>) -> Controller {
    Controller::with_predictor(predictor, MockBearingApi::new(Duration::ZERO)).unwrap()
}

#[test]
fn failed_submission_replaces_result_and_next_success_clears_error() {
    let first = PredictionResult { prediction: 0, confidence: 0.6 };
    let second = PredictionResult { prediction: 1, confidence: 0.8 };
    let predictor = ScriptedPredictor::new(vec![
        Ok(first),
        Err(PredictorError::RequestFailed),
        Ok(second),
    ]);
    let mut ctl = controller(predictor.clone());

    ctl.submit();
    assert!(ctl.prediction().is_loading());
    assert!(!ctl.can_submit());
    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.prediction().result(), Some(&first));

    ctl.submit();
    assert!(ctl.prediction().result().is_none());
    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.prediction(), &PredictionState::Failed(REQUEST_FAILED_MSG.into()));

    ctl.submit();
    assert!(ctl.prediction().error().is_none());
    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.prediction().result(), Some(&second));

    assert_eq!(predictor.calls().len(), 3);
    assert_eq!(predictor.calls()[0], vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    ctl.shutdown();
}

#[test]
fn invalid_feature_fails_without_request() {
    let predictor = ScriptedPredictor::new(vec![]);
    let mut ctl = controller(predictor.clone());

    ctl.update_feature(2, "x");
    assert!(ctl.can_submit());
    ctl.submit();

    let message = ctl.prediction().error().unwrap().to_string();
    assert!(message.contains("\"x\""));
    assert!(predictor.calls().is_empty());
    assert!(!ctl.wait_event(Duration::from_millis(50)));
}

#[test]
fn empty_slot_blocks_submission_and_reset_restores_defaults() {
    let mut ctl = controller(ScriptedPredictor::new(vec![]));

    ctl.update_feature(0, "");
    assert!(!ctl.can_submit());

    ctl.reset();
    assert!(ctl.can_submit());
    assert_eq!(ctl.features()[0], "1.0");
    assert_eq!(ctl.prediction(), &PredictionState::Idle);
}

#[test]
fn switching_tabs_loads_bearing_sections_and_keeps_context() {
    let mut ctl = controller(ScriptedPredictor::new(vec![]));

    ctl.update_tab_input(TabId::Tab1, "hello");
    ctl.switch_tab(TabId::Tab3);
    assert_eq!(ctl.bearing(), &BearingState::Loading);

    ctl.update_tab_input(TabId::Tab3, "x");
    ctl.toggle_param(TabId::Tab3, ParamKey::Ka);
    ctl.update_param_value(TabId::Tab3, ParamKey::Ka, "119.1");

    assert!(ctl.wait_event(WAIT));
    let BearingState::Ready(sections) = ctl.bearing() else {
        panic!("bearing not ready: {:?}", ctl.bearing());
    };
    assert_eq!(sections[0].section_name, SectionName::Ring);
    assert_eq!(sections[0].recommended().class_name, "SUJ2");

    let view = ctl.view();
    assert_eq!(view.tabs.active(), TabId::Tab3);
    assert_eq!(view.bearing_tab, Some(TabId::Tab3));
    assert_eq!(view.tabs.context(TabId::Tab3).input_value, "x");
    assert_eq!(view.tabs.context(TabId::Tab3).param_value(ParamKey::Ka), "119.1");
    assert!(view.tabs.context(TabId::Tab3).is_selected(ParamKey::Ka));
    assert_eq!(view.tabs.context(TabId::Tab1).input_value, "hello");
}

#[test]
fn health_probe_is_reported_in_view() {
    let mut ctl = controller(ScriptedPredictor::new(vec![]));
    assert_eq!(ctl.view().service_up, None);

    ctl.probe_health();
    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.view().service_up, Some(false));
}

#[test]
fn older_prediction_landing_last_overwrites_newer_one() {
    let mut ctl = Controller::with_predictor(Arc::new(SleepyPredictor), MockBearingApi::new(Duration::ZERO))
        .unwrap();

    ctl.update_feature(0, "400");
    ctl.submit();
    ctl.update_feature(0, "10");
    ctl.submit();

    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.prediction().result().map(|r| r.prediction), Some(10));

    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.prediction().result().map(|r| r.prediction), Some(400));
}

#[test]
fn earlier_bearing_fetch_is_applied_after_a_newer_switch() {
    let mut ctl = Controller::with_predictor(
        ScriptedPredictor::new(vec![]),
        MockBearingApi::new(Duration::from_millis(100)),
    )
    .unwrap();

    ctl.switch_tab(TabId::Tab2);
    thread::sleep(Duration::from_millis(30));
    ctl.switch_tab(TabId::Tab3);

    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.view().bearing_tab, Some(TabId::Tab2));
    assert_eq!(ctl.tabs().active(), TabId::Tab3);
    assert!(matches!(ctl.bearing(), BearingState::Ready(_)));

    assert!(ctl.wait_event(WAIT));
    assert_eq!(ctl.view().bearing_tab, Some(TabId::Tab3));
}

#[test]
fn dropping_controller_does_not_wait_for_in_flight_requests() {
    let mut ctl = Controller::with_predictor(Arc::new(SleepyPredictor), MockBearingApi::new(Duration::ZERO))
        .unwrap();
    ctl.update_feature(0, "3000");
    ctl.submit();
    thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    drop(ctl);
    assert!(started.elapsed() < Duration::from_secs(1));
}
