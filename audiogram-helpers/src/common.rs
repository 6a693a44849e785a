use crate::Float;
use ndarray::{Array1, ArrayView1};
use std::fmt::Debug;

/// A labelled training sample.
///
/// L: The type of the label (e.g. `i64` for the audiogram classifiers).
/// F: The float type for the features (e.g. `f32`, `f64`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    /// Number of features carried by this sample.
    pub fn dimension(&self) -> usize {
        self.features.len()
    }

    pub fn view(&self) -> ArrayView1<'_, F> {
        self.features.view()
    }
}
