use ndarray::NdFloat;

mod common;
mod distance;

pub use common::DataPoint;
pub use distance::{Distance, DistanceMetric, L1Dist, L2Dist, LInfDist};

/// Floating point element type shared by the classifiers and the metrics.
pub trait Float: NdFloat {}

impl Float for f32 {}

impl Float for f64 {}
