use std::{io, sync::Arc, time::Duration};

use tokio::{
    runtime::{Handle, Runtime},
    sync::mpsc,
};

use crate::{
    bearing::{self, BearingInput, SectionResult},
    client::{HttpPredictor, Predict},
    config::ClientConfig,
    error::PredictorError,
    features::FeatureForm,
    mock::MockBearingApi,
    prediction::{PredictionResult, PredictionState},
    tabs::{self, ParamKey, TabEvent, TabId, TabMachine},
};

/// Status of the bearing material display.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BearingState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<SectionResult>),
    Failed(String),
}

/// Completions delivered by background tasks.
#[derive(Debug)]
enum Event {
    Prediction {
        seq: u64,
        outcome: Result<PredictionResult, PredictorError>,
    },
    Bearing {
        seq: u64,
        tab: TabId,
        outcome: Result<Vec<SectionResult>, PredictorError>,
    },
    Health(bool),
}

/// Full snapshot rendered by the UI.
#[derive(Debug, Clone)]
pub struct ControllerView {
    pub features: Vec<String>,
    pub prediction: PredictionState,
    pub can_submit: bool,
    pub tabs: TabMachine,
    pub bearing: BearingState,
    pub bearing_tab: Option<TabId>,
    pub service_up: Option<bool>,
    pub endpoint: String,
}

/// Owns every piece of UI state and runs requests in the background.
///
/// Completions are queued and only applied by [`Controller::tick`], so the
/// state changes on the UI thread alone.
///
/// Dropping the controller stops its runtime without waiting for requests
/// still in flight.
pub struct Controller {
    runtime: Option<Runtime>,
    handle: Handle,
    predictor: Arc<dyn Predict>,
    bearing_api: MockBearingApi,
    endpoint: String,
    form: FeatureForm,
    prediction: PredictionState,
    tabs: TabMachine,
    bearing: BearingState,
    bearing_tab: Option<TabId>,
    service_up: Option<bool>,
    prediction_seq: u64,
    bearing_seq: u64,
    tx: mpsc::UnboundedSender<Event>,
    events: mpsc::UnboundedReceiver<Event>,
}

impl Controller {
    /// Creates a controller talking to the endpoint in `config`.
    ///
    /// # Errors
    /// Returns an io error if the runtime cannot be started.
    pub fn new(config: &ClientConfig) -> io::Result<Self> {
        let predictor = HttpPredictor::new(config);
        let endpoint = predictor.endpoint().to_string();
        let mut controller =
            Self::with_predictor(Arc::new(predictor), MockBearingApi::new(config.mock_delay))?;
        controller.endpoint = endpoint;
        Ok(controller)
    }

    /// Creates a controller around any [`Predict`] implementation.
    ///
    /// # Errors
    /// Returns an io error if the runtime cannot be started.
    pub fn with_predictor(
        predictor: Arc<dyn Predict>,
        bearing_api: MockBearingApi,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()?;
        let (tx, events) = mpsc::unbounded_channel();

        Ok(Self {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            predictor,
            bearing_api,
            endpoint: String::new(),
            form: FeatureForm::new(),
            prediction: PredictionState::Idle,
            tabs: TabMachine::new(),
            bearing: BearingState::Idle,
            bearing_tab: None,
            service_up: None,
            prediction_seq: 0,
            bearing_seq: 0,
            tx,
            events,
        })
    }

    pub fn features(&self) -> &[String] {
        self.form.values()
    }

    pub fn prediction(&self) -> &PredictionState {
        &self.prediction
    }

    pub fn tabs(&self) -> &TabMachine {
        &self.tabs
    }

    pub fn bearing(&self) -> &BearingState {
        &self.bearing
    }

    pub fn update_feature(&mut self, index: usize, value: impl Into<String>) {
        self.form.update(index, value);
    }

    /// Restores the default features and clears the prediction.
    pub fn reset(&mut self) {
        self.form.reset();
        self.prediction.reset();
    }

    /// Submission is allowed when nothing is loading and no slot is empty.
    pub fn can_submit(&self) -> bool {
        !self.prediction.is_loading() && self.form.is_valid()
    }

    /// Validates the form and, if every slot is a number, starts a prediction.
    ///
    /// A validation failure is recorded immediately and no request is made.
    pub fn submit(&mut self) {
        let features = match self.form.parse() {
            Ok(features) => features,
            Err(e) => {
                log::info!("submission rejected: {e}");
                self.prediction.fail(e.to_string());
                return;
            }
        };

        self.prediction.begin();
        self.prediction_seq += 1;
        let seq = self.prediction_seq;
        log::info!("submitting prediction #{seq} with features {features:?}");

        let predictor = Arc::clone(&self.predictor);
        let tx = self.tx.clone();
        self.handle.spawn_blocking(move || {
            let outcome = predictor.predict(&features);
            let _ = tx.send(Event::Prediction { seq, outcome });
        });
    }

    /// Activates `id` and starts the bearing fetch for the activation.
    pub fn switch_tab(&mut self, id: TabId) {
        self.tabs = self.tabs.transition(TabEvent::SwitchTab(id));
        self.bearing = BearingState::Loading;
        self.bearing_tab = Some(id);
        self.bearing_seq += 1;
        let seq = self.bearing_seq;
        log::info!("tab {id} activated, fetching bearing prediction #{seq}");

        let api = self.bearing_api.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let response = api.predict(&BearingInput::sample()).await;
            let outcome = bearing::transform_response(&response);
            let _ = tx.send(Event::Bearing { seq, tab: id, outcome });
        });
    }

    pub fn update_tab_input(&mut self, tab: TabId, input_value: impl Into<String>) {
        self.tabs = self.tabs.transition(TabEvent::UpdateContext {
            tab,
            input_value: input_value.into(),
        });
    }

    pub fn toggle_param(&mut self, tab: TabId, key: ParamKey) {
        let keys = tabs::toggle_param(&self.tabs.context(tab).selected_params, key);
        self.tabs = self
            .tabs
            .transition(TabEvent::UpdateParamSelection { tab, keys });
    }

    pub fn update_param_value(&mut self, tab: TabId, key: ParamKey, value: impl Into<String>) {
        self.tabs = self.tabs.transition(TabEvent::UpdateParamValue {
            tab,
            key,
            value: value.into(),
        });
    }

    /// Asks the predictor whether the service is reachable.
    pub fn probe_health(&mut self) {
        let predictor = Arc::clone(&self.predictor);
        let tx = self.tx.clone();
        self.handle.spawn_blocking(move || {
            let _ = tx.send(Event::Health(predictor.health()));
        });
    }

    /// Drains all pending completions and updates state. Non-blocking.
    ///
    /// Should be called once per UI frame tick.
    pub fn tick(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    /// Blocks until one completion arrives and applies it.
    ///
    /// # Returns
    /// `false` if nothing arrived within `timeout`.
    pub fn wait_event(&mut self, timeout: Duration) -> bool {
        let events = &mut self.events;
        let received = self
            .handle
            .block_on(async { tokio::time::timeout(timeout, events.recv()).await });
        match received {
            Ok(Some(event)) => {
                self.apply(event);
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, event: Event) {
        match event {
            Event::Prediction { seq, outcome } => {
                if seq != self.prediction_seq {
                    log::debug!(
                        "prediction #{seq} completed after #{} was issued",
                        self.prediction_seq
                    );
                }
                match &outcome {
                    Ok(r) => log::info!(
                        "prediction #{seq}: class {} ({:.4})",
                        r.prediction,
                        r.confidence
                    ),
                    Err(e) => log::info!("prediction #{seq} failed: {e}"),
                }
                self.prediction.settle(outcome);
            }

            Event::Bearing { seq, tab, outcome } => {
                if seq != self.bearing_seq {
                    log::debug!(
                        "bearing prediction #{seq} for {tab} completed after #{} was issued",
                        self.bearing_seq
                    );
                }
                self.bearing_tab = Some(tab);
                self.bearing = match outcome {
                    Ok(sections) => BearingState::Ready(sections),
                    Err(e) => {
                        log::warn!("bearing prediction #{seq} unusable: {e}");
                        BearingState::Failed(e.to_string())
                    }
                };
            }

            Event::Health(up) => {
                if !up {
                    log::warn!("prediction service at {} is not reachable", self.endpoint);
                }
                self.service_up = Some(up);
            }
        }
    }

    /// Returns the current snapshot for rendering.
    pub fn view(&self) -> ControllerView {
        ControllerView {
            features: self.form.values().to_vec(),
            prediction: self.prediction.clone(),
            can_submit: self.can_submit(),
            tabs: self.tabs.clone(),
            bearing: self.bearing.clone(),
            bearing_tab: self.bearing_tab,
            service_up: self.service_up,
            endpoint: self.endpoint.clone(),
        }
    }

    /// Stops the runtime without waiting for requests still in flight.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
