//! What the form shows after a predict action.

use tracing::info;

use crate::deviation::deviation;
use crate::error::PredictError;
use crate::model::Models;
use crate::predictor::{Label, predict};
use crate::reading::{Ear, FrequencyReading};

/// Background of a result box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxColor {
    Green,
    Red,
}

impl BoxColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BoxColor::Green => [0, 128, 0],
            BoxColor::Red => [255, 0, 0],
        }
    }
}

impl From<Label> for BoxColor {
    fn from(label: Label) -> Self {
        match label {
            Label::Normal => BoxColor::Green,
            Label::Problem => BoxColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarReport {
    pub ear: Ear,
    pub reading: FrequencyReading,
    pub deviation: f64,
    pub label: Label,
}

impl EarReport {
    pub fn compute(
        ear: Ear,
        reading: FrequencyReading,
        models: &Models,
    ) -> Result<Self, PredictError> {
        let label = predict(models.for_ear(ear), &reading)?;
        Ok(Self {
            ear,
            reading,
            deviation: deviation(&reading),
            label,
        })
    }

    /// "Orecchio Sinistro: 32.81%". Whole values keep their ".0".
    pub fn deviation_line(&self) -> String {
        format!("{}: {:?}%", self.ear, self.deviation)
    }

    /// "Previsione Orecchio Sinistro: Normale"
    pub fn box_text(&self) -> String {
        format!("Previsione {}: {}", self.ear, self.label)
    }

    pub fn box_color(&self) -> BoxColor {
        self.label.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub left: EarReport,
    pub right: EarReport,
}

impl Report {
    pub fn compute(
        left: FrequencyReading,
        right: FrequencyReading,
        models: &Models,
    ) -> Result<Self, PredictError> {
        let report = Self {
            left: EarReport::compute(Ear::Left, left, models)?,
            right: EarReport::compute(Ear::Right, right, models)?,
        };
        info!(
            left_deviation = report.left.deviation,
            left_label = %report.left.label,
            right_deviation = report.right.deviation,
            right_label = %report.right.label,
            "prediction complete"
        );
        Ok(report)
    }

    pub fn ears(&self) -> [&EarReport; 2] {
        [&self.left, &self.right]
    }
}
