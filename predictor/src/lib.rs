pub mod bearing;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod features;
pub mod mock;
pub mod prediction;
pub mod tabs;

pub use client::{HttpPredictor, Predict};
pub use config::ClientConfig;
pub use controller::{BearingState, Controller, ControllerView};
pub use error::PredictorError;
pub use prediction::{PredictionResult, PredictionState};
pub use tabs::{ParamKey, TabId};
