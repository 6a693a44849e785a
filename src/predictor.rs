use std::fmt;

use tracing::{debug, error};

use crate::classifier::Classifier;
use crate::error::PredictError;
use crate::reading::FrequencyReading;

/// Outcome of classifying one ear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Normal,
    Problem,
}

impl Label {
    pub fn is_problem(self) -> bool {
        self == Label::Problem
    }

    /// Word shown in the result box.
    pub fn display_name(self) -> &'static str {
        match self {
            Label::Normal => "Normale",
            Label::Problem => "Problema",
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = PredictError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Label::Normal),
            1 => Ok(Label::Problem),
            other => Err(PredictError::UnknownLabel(other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classifies one reading with `model`.
pub fn predict(model: &dyn Classifier, reading: &FrequencyReading) -> Result<Label, PredictError> {
    let raw = model.predict(reading.view()).map_err(|source| {
        error!(model = %model.name(), error = %source, "classifier failed");
        PredictError::Classifier {
            name: model.name(),
            source,
        }
    })?;
    debug!(model = %model.name(), raw, "classifier output");
    Label::try_from(raw)
}
