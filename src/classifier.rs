use audiogram_helpers::{DataPoint, Distance, DistanceMetric, L1Dist, L2Dist, LInfDist};
use k_nn::{KnnClassifier, KnnError};
use ndarray::ArrayView1;

/// Common interface of the per-ear classifiers.
///
/// Implementations are immutable once built, so a single instance can be
/// shared by every session.
pub trait Classifier: Send + Sync {
    /// Raw integer label for one feature vector in band order.
    fn predict(&self, features: ArrayView1<f64>) -> Result<i64, KnnError>;

    /// Short description, e.g. "k-NN (L2, k=3)".
    fn name(&self) -> String;

    /// Number of features the classifier expects.
    fn input_len(&self) -> Option<usize>;
}

// Erases the distance type parameter of `KnnClassifier`.
trait KnnPredictor: Send + Sync {
    fn predict(&self, features: ArrayView1<f64>) -> Result<i64, KnnError>;
    fn dimension(&self) -> Option<usize>;
}

impl<D: 'static + Distance<f64>> KnnPredictor for KnnClassifier<i64, f64, D> {
    fn predict(&self, features: ArrayView1<f64>) -> Result<i64, KnnError> {
        self.predict(features)
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension()
    }
}

/// A k-NN model behind the `Classifier` trait, with the metric chosen at
/// runtime.
pub struct KnnAdapter {
    classifier: Box<dyn KnnPredictor>,
    k: usize,
    distance_metric: DistanceMetric,
}

impl KnnAdapter {
    pub fn new(
        k: usize,
        distance_metric: DistanceMetric,
        training_data: Vec<DataPoint<i64, f64>>,
    ) -> Result<Self, KnnError> {
        let classifier: Box<dyn KnnPredictor> = match distance_metric {
            DistanceMetric::L1 => Box::new(KnnClassifier::new(k, training_data, L1Dist)?),
            DistanceMetric::L2 => Box::new(KnnClassifier::new(k, training_data, L2Dist)?),
            DistanceMetric::LInf => Box::new(KnnClassifier::new(k, training_data, LInfDist)?),
        };
        Ok(Self {
            classifier,
            k,
            distance_metric,
        })
    }
}

impl Classifier for KnnAdapter {
    fn predict(&self, features: ArrayView1<f64>) -> Result<i64, KnnError> {
        self.classifier.predict(features)
    }

    fn name(&self) -> String {
        format!("k-NN ({}, k={})", self.distance_metric, self.k)
    }

    fn input_len(&self) -> Option<usize> {
        self.classifier.dimension()
    }
}
