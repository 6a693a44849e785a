use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use audiogram_helpers::{DataPoint, Distance};

use audiogram_helpers::Float;
use ndarray::ArrayView1;

/// Errors that can occur when building or querying the k-NN classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum KnnError {
    /// k cannot be zero for a k-NN classifier
    InvalidK,
    /// Cannot predict with an empty training set
    EmptyTrainingSet,
    /// Training points do not all have the same number of features
    InconsistentDimensions { expected: usize, found: usize, index: usize },
    /// The query point has a different number of features than the training set
    DimensionMismatch { expected: usize, found: usize },
    /// Invalid distance comparison (likely due to NaN values in data)
    InvalidDistance,
    /// Could not determine a majority class among neighbors
    NoMajorityClass,
}

impl Display for KnnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KnnError::InvalidK => write!(f, "k cannot be zero for a k-NN classifier"),
            KnnError::EmptyTrainingSet => write!(f, "Cannot predict with an empty training set"),
            KnnError::InconsistentDimensions {
                expected,
                found,
                index,
            } => write!(
                f,
                "Training point {index} has {found} features, expected {expected}"
            ),
            KnnError::DimensionMismatch { expected, found } => write!(
                f,
                "Query point has {found} features, the model expects {expected}"
            ),
            KnnError::InvalidDistance => write!(
                f,
                "Invalid distance comparison (likely due to NaN values in data)"
            ),
            KnnError::NoMajorityClass => {
                write!(f, "Could not determine a majority class among neighbors")
            }
        }
    }
}

impl Error for KnnError {}

/// A k-Nearest Neighbors (k-NN) classifier.
///
/// This classifier predicts the label of a new data point by finding the `k`
/// most similar points in its training set and taking a majority vote among their labels.
///
/// # Type Parameters
///
/// * `L`: The type of the label (e.g., `i64`, `String`, or a custom `enum`).
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement the `audiogram_helpers::Distance` trait.
#[derive(Debug, Clone)]
pub struct KnnClassifier<L, F, D>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    k: usize,
    training_data: Vec<DataPoint<L, F>>,
    distance: D,
}

impl<L, F, D> KnnClassifier<L, F, D>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
    D: Distance<F>,
{
    /// Creates a new k-NN classifier.
    ///
    /// # Arguments
    ///
    /// * `k`: The number of neighbors to consider for classification. Must be greater than 0.
    /// * `training_data`: A vector of `DataPoint`s that the classifier will learn from.
    /// * `distance`: An instance of a struct that implements the `Distance` trait (e.g., `L2Dist`).
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `k` is 0, and
    /// `KnnError::InconsistentDimensions` if the training points disagree on
    /// their number of features.
    pub fn new(
        k: usize,
        training_data: Vec<DataPoint<L, F>>,
        distance: D,
    ) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::InvalidK);
        }
        if let Some(first) = training_data.first() {
            let expected = first.dimension();
            if let Some((index, point)) = training_data
                .iter()
                .enumerate()
                .find(|(_, p)| p.dimension() != expected)
            {
                return Err(KnnError::InconsistentDimensions {
                    expected,
                    found: point.dimension(),
                    index,
                });
            }
        }
        Ok(Self {
            k,
            training_data,
            distance,
        })
    }

    /// Number of training points held by the classifier.
    pub fn len(&self) -> usize {
        self.training_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training_data.is_empty()
    }

    /// Number of features every query point must have, if known.
    pub fn dimension(&self) -> Option<usize> {
        self.training_data.first().map(DataPoint::dimension)
    }

    /// Predicts the label for a new, unseen data point.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyTrainingSet` if the training data is empty.
    /// Returns `KnnError::DimensionMismatch` if `features` has the wrong length.
    /// Returns `KnnError::InvalidDistance` if a distance is NaN.
    /// Returns `KnnError::NoMajorityClass` if the vote among neighbours is tied.
    pub fn predict(&self, features: ArrayView1<F>) -> Result<L, KnnError> {
        let expected = self.dimension().ok_or(KnnError::EmptyTrainingSet)?;
        if features.len() != expected {
            return Err(KnnError::DimensionMismatch {
                expected,
                found: features.len(),
            });
        }

        // Relative distances rank neighbours the same way as true ones.
        let mut distances: Vec<(F, &L)> = self
            .training_data
            .iter()
            .map(|dp| (self.distance.rdistance(dp.view(), features), &dp.label))
            .collect();

        if distances.iter().any(|(d, _)| d.is_nan()) {
            return Err(KnnError::InvalidDistance);
        }
        distances.sort_unstable_by(|a, b| {
            a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
        });

        let num_neighbors = self.k.min(distances.len());
        let mut votes: HashMap<&L, usize> = HashMap::new();
        for (_, label) in &distances[..num_neighbors] {
            *votes.entry(label).or_insert(0) += 1;
        }

        let max_votes = votes
            .values()
            .copied()
            .max()
            .ok_or(KnnError::EmptyTrainingSet)?;
        let mut winners = votes
            .into_iter()
            .filter(|&(_, count)| count == max_votes)
            .map(|(label, _)| label);

        match (winners.next(), winners.next()) {
            (Some(label), None) => Ok(label.clone()),
            _ => Err(KnnError::NoMajorityClass),
        }
    }
}
