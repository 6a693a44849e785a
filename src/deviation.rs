//! Deviation of a reading from the ideal reference.
//!
//! Each band contributes `|reading - ideal| / MAX_IDEAL * 100`; the deviation
//! of the whole reading is the unweighted mean of the six contributions,
//! rounded to two decimals.

use ndarray::ArrayView1;

use crate::reading::{BAND_COUNT, FrequencyReading, IDEAL_REFERENCE, MAX_IDEAL};

/// Per-band percentage deviation, unrounded, in band order.
pub fn band_percentages(reading: &FrequencyReading) -> [f64; BAND_COUNT] {
    let ideal = ArrayView1::from(&IDEAL_REFERENCE);
    let diffs = (&reading.view() - &ideal).mapv(f64::abs) / MAX_IDEAL * 100.0;

    let mut out = [0.0; BAND_COUNT];
    for (slot, pct) in out.iter_mut().zip(diffs.iter()) {
        *slot = *pct;
    }
    out
}

/// Mean percentage deviation, unrounded.
pub fn mean_deviation(reading: &FrequencyReading) -> f64 {
    band_percentages(reading).iter().sum::<f64>() / BAND_COUNT as f64
}

/// Mean percentage deviation rounded to two decimals.
pub fn deviation(reading: &FrequencyReading) -> f64 {
    round2(mean_deviation(reading))
}

/// Rounds the exact binary value to two decimals, ties to even.
///
/// `{:.2}` works on the full decimal expansion of the double, so
/// `0.024999999999999998` stays below the tie and `0.125` goes to `0.12`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
