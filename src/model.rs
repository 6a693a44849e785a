//! Loading of the two classifier artifacts.
//!
//! An artifact is a JSON document describing a trained k-NN model:
//!
//! ```json
//! {
//!   "kind": "knn",
//!   "k": 3,
//!   "metric": "l2",
//!   "samples": [
//!     { "features": [250, 500, 1000, 2000, 4000, 8000], "label": 0 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use audiogram_helpers::{DataPoint, DistanceMetric};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{Classifier, KnnAdapter};
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::predictor::Label;
use crate::reading::{BAND_COUNT, Ear};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Knn {
        k: usize,
        #[serde(default)]
        metric: DistanceMetric,
        samples: Vec<Sample>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: i64,
}

impl ModelArtifact {
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json).map_err(|source| ModelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the artifact and builds the classifier it describes.
    pub fn build(self, path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
        match self {
            ModelArtifact::Knn { k, metric, samples } => {
                if samples.is_empty() {
                    return Err(ModelError::Empty {
                        path: path.to_path_buf(),
                    });
                }
                let mut training_data = Vec::with_capacity(samples.len());
                for (index, sample) in samples.into_iter().enumerate() {
                    if sample.features.len() != BAND_COUNT {
                        return Err(ModelError::Shape {
                            path: path.to_path_buf(),
                            index,
                            expected: BAND_COUNT,
                            found: sample.features.len(),
                        });
                    }
                    if Label::try_from(sample.label).is_err() {
                        return Err(ModelError::Label {
                            path: path.to_path_buf(),
                            index,
                            label: sample.label,
                        });
                    }
                    training_data.push(DataPoint::new(
                        Array1::from(sample.features),
                        sample.label,
                    ));
                }
                let adapter =
                    KnnAdapter::new(k, metric, training_data).map_err(|source| {
                        ModelError::Knn {
                            path: path.to_path_buf(),
                            source,
                        }
                    })?;
                Ok(Box::new(adapter))
            }
        }
    }
}

/// Reads, validates and builds one classifier.
pub fn load_classifier(path: &Path) -> Result<Box<dyn Classifier>, ModelError> {
    let json = fs::read_to_string(path).map_err(|source| ModelError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ModelArtifact::from_json(path, &json)?.build(path)
}

/// The two classifiers, loaded once and read-only afterwards.
pub struct Models {
    left: Box<dyn Classifier>,
    right: Box<dyn Classifier>,
}

impl Models {
    pub fn new(left: Box<dyn Classifier>, right: Box<dyn Classifier>) -> Self {
        Self { left, right }
    }

    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let left = load_classifier(&config.left)?;
        info!(ear = "left", path = %config.left.display(), model = %left.name(), "loaded classifier");
        let right = load_classifier(&config.right)?;
        info!(ear = "right", path = %config.right.display(), model = %right.name(), "loaded classifier");
        Ok(Self::new(left, right))
    }

    pub fn for_ear(&self, ear: Ear) -> &dyn Classifier {
        match ear {
            Ear::Left => self.left.as_ref(),
            Ear::Right => self.right.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("model.json")
    }

    #[test]
    fn test_parse_and_build_knn_artifact() {
        let json = r#"{
            "kind": "knn",
            "k": 1,
            "metric": "linf",
            "samples": [
                { "features": [250, 500, 1000, 2000, 4000, 8000], "label": 0 },
                { "features": [0, 0, 0, 0, 0, 0], "label": 1 }
            ]
        }"#;
        let artifact = ModelArtifact::from_json(&path(), json).unwrap();
        let ModelArtifact::Knn { metric, .. } = &artifact;
        assert_eq!(*metric, DistanceMetric::LInf);

        let classifier = artifact.build(&path()).unwrap();
        assert_eq!(classifier.name(), "k-NN (L-Infinity, k=1)");
        let near_ideal = array![240.0, 510.0, 1000.0, 2000.0, 4100.0, 7900.0];
        assert_eq!(classifier.predict(near_ideal.view()), Ok(0));
    }

    #[test]
    fn test_metric_defaults_to_l2() {
        let json = r#"{"kind": "knn", "k": 1, "samples": [{"features": [1,2,3,4,5,6], "label": 1}]}"#;
        let classifier = ModelArtifact::from_json(&path(), json)
            .unwrap()
            .build(&path())
            .unwrap();
        assert_eq!(classifier.name(), "k-NN (L2, k=1)");
    }

    #[test]
    fn test_rejects_bad_artifacts() {
        let empty = r#"{"kind": "knn", "k": 1, "samples": []}"#;
        let short = r#"{"kind": "knn", "k": 1, "samples": [{"features": [1,2,3], "label": 0}]}"#;
        let label = r#"{"kind": "knn", "k": 1, "samples": [{"features": [1,2,3,4,5,6], "label": 7}]}"#;
        let zero_k = r#"{"kind": "knn", "k": 0, "samples": [{"features": [1,2,3,4,5,6], "label": 0}]}"#;

        let build = |json: &str| ModelArtifact::from_json(&path(), json).unwrap().build(&path());
        assert!(matches!(build(empty), Err(ModelError::Empty { .. })));
        assert!(matches!(
            build(short),
            Err(ModelError::Shape { index: 0, expected: 6, found: 3, .. })
        ));
        assert!(matches!(build(label), Err(ModelError::Label { label: 7, .. })));
        assert!(matches!(build(zero_k), Err(ModelError::Knn { .. })));
    }

    #[test]
    fn test_unknown_kind_is_a_parse_error() {
        let json = r#"{"kind": "forest", "trees": []}"#;
        assert!(matches!(
            ModelArtifact::from_json(&path(), json),
            Err(ModelError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_artifact_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_classifier(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ModelError::Read { .. })));
    }
}
