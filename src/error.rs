use std::path::PathBuf;

use k_nn::KnnError;

/// Rejected attempt to build a `FrequencyReading`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadingError {
    #[error("expected {expected} values, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("value {value} at position {position} must be a finite number >= 0")]
    OutOfRange { position: usize, value: f64 },
}

/// Failures of the input file. None of them is fatal: the form falls back to
/// manual entry and shows the message.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Il file non è stato trovato nella posizione {}.", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Il file deve contenere esattamente 12 valori.")]
    MalformedInput { found: usize },

    #[error("Il valore '{token}' in posizione {position} non è un numero valido.")]
    InvalidNumber { position: usize, token: String },

    #[error("Il valore {value} in posizione {position} deve essere un numero non negativo.")]
    OutOfRange { position: usize, value: f64 },

    #[error("Impossibile leggere il file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while loading a classifier artifact. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("cannot read model artifact {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse model artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {} has no training samples", path.display())]
    Empty { path: PathBuf },

    #[error("sample {index} in {} has {found} features, expected {expected}", path.display())]
    Shape {
        path: PathBuf,
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("sample {index} in {} has label {label}, expected 0 or 1", path.display())]
    Label {
        path: PathBuf,
        index: usize,
        label: i64,
    },

    #[error("invalid k-NN model in {}: {source}", path.display())]
    Knn {
        path: PathBuf,
        #[source]
        source: KnnError,
    },
}

/// Failures of a single predict action.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("classifier {name} failed: {source}")]
    Classifier {
        name: String,
        #[source]
        source: KnnError,
    },

    #[error("classifier returned label {0}, expected 0 (normal) or 1 (problem)")]
    UnknownLabel(i64),
}

/// Failures while resolving `AppConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    Validation { field: String, message: String },
}
