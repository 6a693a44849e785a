//! Audiogram screening: twelve frequency readings in, a deviation percentage
//! and a normal/problem label per ear out.

pub mod classifier;
pub mod config;
pub mod deviation;
pub mod error;
pub mod input;
pub mod model;
pub mod predictor;
pub mod reading;
pub mod report;
pub mod session;
pub mod telemetry;

pub use audiogram_helpers::{DataPoint, DistanceMetric};
pub use classifier::{Classifier, KnnAdapter};
pub use config::{AppConfig, InputConfig, ModelConfig};
pub use deviation::{band_percentages, deviation};
pub use error::{ConfigError, InputError, ModelError, PredictError, ReadingError};
pub use model::{ModelArtifact, Models};
pub use predictor::{Label, predict};
pub use reading::{BAND_COUNT, Band, Ear, FrequencyReading, IDEAL_REFERENCE, MAX_IDEAL};
pub use report::{BoxColor, EarReport, Report};
pub use session::{Notice, Session, SessionState};
