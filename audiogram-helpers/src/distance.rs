use crate::Float;
use ndarray::{ArrayView1, Zip};
use std::fmt;

/// A distance metric between two feature vectors of equal length.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// The true distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// A monotonic stand-in for `distance`, cheaper to compute.
    ///
    /// Orders points the same way as `distance`, so it can be used for
    /// neighbour ranking. Defaults to the true distance.
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }
}

/// Manhattan distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L1Dist;

impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc + (x - y).abs())
    }
}

/// Euclidean distance. `rdistance` skips the square root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &x, &y| {
            let d = x - y;
            acc + d * d
        })
    }
}

/// Chebyshev distance, the largest per-coordinate difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LInfDist;

impl<F: Float> Distance<F> for LInfDist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc.max((x - y).abs()))
    }
}

/// Metric selector, as stored in serialized models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum DistanceMetric {
    L1,
    #[default]
    L2,
    LInf,
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::L1 => write!(f, "L1"),
            DistanceMetric::L2 => write!(f, "L2"),
            DistanceMetric::LInf => write!(f, "L-Infinity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_l2_is_euclidean() {
        let a = array![0.0, 0.0];
        let b = array![3.0, 4.0];
        assert_abs_diff_eq!(L2Dist.distance(a.view(), b.view()), 5.0);
        assert_abs_diff_eq!(L2Dist.rdistance(a.view(), b.view()), 25.0);
    }

    #[test]
    fn test_l1_and_linf() {
        let a = array![1.0, -2.0, 3.0];
        let b = array![4.0, 2.0, 3.0];
        assert_abs_diff_eq!(L1Dist.distance(a.view(), b.view()), 7.0);
        assert_abs_diff_eq!(LInfDist.distance(a.view(), b.view()), 4.0);
        assert_abs_diff_eq!(LInfDist.rdistance(a.view(), b.view()), 4.0);
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(DistanceMetric::LInf.to_string(), "L-Infinity");
        assert_eq!(DistanceMetric::default(), DistanceMetric::L2);
    }
}
