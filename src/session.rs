//! One form session: load the input file once, let the user edit, predict.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{InputError, PredictError};
use crate::input;
use crate::model::Models;
use crate::reading::{Ear, FrequencyReading};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The input file has not been read yet.
    Initial,
    /// Fields were pre-filled from a valid input file.
    FilePopulated,
    /// The file was missing or unusable; fields start at 0.0.
    ManualEntry,
    /// A predict action produced a report.
    ResultsDisplayed,
}

/// Message shown above the fields after the input file was read.
#[derive(Debug)]
pub enum Notice {
    Loaded { path: PathBuf },
    Rejected(InputError),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Rejected(_))
    }

    pub fn message(&self) -> String {
        match self {
            Notice::Loaded { path } => format!(
                "I valori delle frequenze sono stati estratti automaticamente dal file {} \
                 e sono stati inseriti nei campi di input.",
                path.display()
            ),
            Notice::Rejected(e) => e.to_string(),
        }
    }
}

pub struct Session {
    state: SessionState,
    source: PathBuf,
    left: FrequencyReading,
    right: FrequencyReading,
    notice: Option<Notice>,
    report: Option<Report>,
    last_error: Option<PredictError>,
}

impl Session {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            state: SessionState::Initial,
            source: source.into(),
            left: FrequencyReading::default(),
            right: FrequencyReading::default(),
            notice: None,
            report: None,
            last_error: None,
        }
    }

    /// Creates a session and immediately reads its input file.
    pub fn start(source: impl Into<PathBuf>) -> Self {
        let mut session = Self::new(source);
        session.load_input();
        session
    }

    /// Reads the input file. Only acts in `Initial`; later calls keep the
    /// user's edits.
    pub fn load_input(&mut self) -> SessionState {
        if self.state != SessionState::Initial {
            return self.state;
        }
        match input::load_pair(&self.source) {
            (Some(left), Some(right), _) => {
                self.left = left;
                self.right = right;
                self.notice = Some(Notice::Loaded {
                    path: self.source.clone(),
                });
                self.state = SessionState::FilePopulated;
            }
            (_, _, error) => {
                self.left = FrequencyReading::default();
                self.right = FrequencyReading::default();
                self.notice = error.map(Notice::Rejected);
                self.state = SessionState::ManualEntry;
            }
        }
        info!(state = ?self.state, "session ready for input");
        self.state
    }

    /// Computes deviations and labels for the current readings.
    ///
    /// On failure the previous report is dropped and the error is kept for
    /// display; the state does not change.
    pub fn predict(&mut self, models: &Models) -> Result<&Report, PredictError> {
        self.left.clamp();
        self.right.clamp();
        match Report::compute(self.left, self.right, models) {
            Ok(report) => {
                self.last_error = None;
                self.state = SessionState::ResultsDisplayed;
                Ok(self.report.insert(report))
            }
            Err(e) => {
                self.report = None;
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn reading(&self, ear: Ear) -> &FrequencyReading {
        match ear {
            Ear::Left => &self.left,
            Ear::Right => &self.right,
        }
    }

    pub fn reading_mut(&mut self, ear: Ear) -> &mut FrequencyReading {
        match ear {
            Ear::Left => &mut self.left,
            Ear::Right => &mut self.right,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn last_error(&self) -> Option<&PredictError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::KnnAdapter;
    use crate::predictor::Label;
    use crate::reading::Band;
    use audiogram_helpers::{DataPoint, DistanceMetric};
    use ndarray::array;

    fn models() -> Models {
        let samples = || {
            vec![
                DataPoint::new(array![250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0], 0),
                DataPoint::new(array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1),
            ]
        };
        Models::new(
            Box::new(KnnAdapter::new(1, DistanceMetric::L2, samples()).unwrap()),
            Box::new(KnnAdapter::new(1, DistanceMetric::L2, samples()).unwrap()),
        )
    }

    #[test]
    fn test_valid_file_populates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "250 500 1000 2000 4000 8000 0 0 0 0 0 0").unwrap();

        let session = Session::start(&path);
        assert_eq!(session.state(), SessionState::FilePopulated);
        assert_eq!(*session.reading(Ear::Left), FrequencyReading::ideal());
        assert_eq!(*session.reading(Ear::Right), FrequencyReading::default());
        let notice = session.notice().unwrap();
        assert!(!notice.is_error());
        assert!(notice.message().contains("test.txt"));
    }

    #[test]
    fn test_missing_file_falls_back_to_manual_entry() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::start(dir.path().join("absent.txt"));
        assert_eq!(session.state(), SessionState::ManualEntry);
        assert_eq!(*session.reading(Ear::Left), FrequencyReading::default());
        let notice = session.notice().unwrap();
        assert!(notice.is_error());
        assert!(matches!(
            notice,
            Notice::Rejected(InputError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_file_falls_back_to_manual_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "1 2 3").unwrap();

        let session = Session::start(&path);
        assert_eq!(session.state(), SessionState::ManualEntry);
        assert!(matches!(
            session.notice(),
            Some(Notice::Rejected(InputError::MalformedInput { found: 3 }))
        ));
    }

    #[test]
    fn test_predict_moves_to_results_and_can_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::start(dir.path().join("absent.txt"));
        let models = models();

        let report = session.predict(&models).unwrap();
        assert_eq!(report.left.label, Label::Problem);
        assert_eq!(report.left.deviation, 32.81);
        assert_eq!(session.state(), SessionState::ResultsDisplayed);

        *session.reading_mut(Ear::Left) = FrequencyReading::ideal();
        let report = session.predict(&models).unwrap();
        assert_eq!(report.left.label, Label::Normal);
        assert_eq!(report.right.label, Label::Problem);
        assert_eq!(session.state(), SessionState::ResultsDisplayed);
        assert!(session.report().is_some());
    }

    #[test]
    fn test_load_input_only_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "1 2 3 4 5 6 7 8 9 10 11 12").unwrap();

        let mut session = Session::start(&path);
        session.reading_mut(Ear::Right).set(Band::Hz250, 99.0);
        assert_eq!(session.load_input(), SessionState::FilePopulated);
        assert_eq!(session.reading(Ear::Right).get(Band::Hz250), 99.0);
    }

    #[test]
    fn test_edits_are_clamped_before_predicting() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::start(dir.path().join("absent.txt"));
        *session.reading_mut(Ear::Left).band_mut(Band::Hz500) = -40.0;
        *session.reading_mut(Ear::Right).band_mut(Band::Hz8000) = f64::NAN;
        session.predict(&models()).unwrap();
        assert_eq!(session.reading(Ear::Left).get(Band::Hz500), 0.0);
        assert_eq!(session.reading(Ear::Right).get(Band::Hz8000), 0.0);
    }
}
