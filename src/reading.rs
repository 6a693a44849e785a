use std::fmt;

use ndarray::ArrayView1;

use crate::error::ReadingError;

/// Number of frequency bands in one audiogram.
pub const BAND_COUNT: usize = 6;

/// The canonical frequencies, in band order. The deviation of a reading is
/// measured against these values.
pub const IDEAL_REFERENCE: [f64; BAND_COUNT] = [250.0, 500.0, 1000.0, 2000.0, 4000.0, 8000.0];

/// Largest value of `IDEAL_REFERENCE`, used to normalize deviations.
pub const MAX_IDEAL: f64 = 8000.0;

/// One of the six audiometric test frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Hz250,
    Hz500,
    Hz1000,
    Hz2000,
    Hz4000,
    Hz8000,
}

impl Band {
    pub const ALL: [Band; BAND_COUNT] = [
        Band::Hz250,
        Band::Hz500,
        Band::Hz1000,
        Band::Hz2000,
        Band::Hz4000,
        Band::Hz8000,
    ];

    pub fn hz(self) -> u32 {
        match self {
            Band::Hz250 => 250,
            Band::Hz500 => 500,
            Band::Hz1000 => 1000,
            Band::Hz2000 => 2000,
            Band::Hz4000 => 4000,
            Band::Hz8000 => 8000,
        }
    }

    /// Position of the band inside a reading.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];

    /// Name shown in the form, e.g. "Orecchio Sinistro".
    pub fn display_name(self) -> &'static str {
        match self {
            Ear::Left => "Orecchio Sinistro",
            Ear::Right => "Orecchio Destro",
        }
    }
}

impl fmt::Display for Ear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Six non-negative readings, one per `Band`, in band order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrequencyReading([f64; BAND_COUNT]);

impl FrequencyReading {
    /// Builds a reading, rejecting negative or non-finite values.
    pub fn new(values: [f64; BAND_COUNT]) -> Result<Self, ReadingError> {
        if let Some((position, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ReadingError::OutOfRange { position, value });
        }
        Ok(Self(values))
    }

    pub fn ideal() -> Self {
        Self(IDEAL_REFERENCE)
    }

    pub fn get(&self, band: Band) -> f64 {
        self.0[band.index()]
    }

    /// Sets one band. Negative or non-finite values are clamped to 0.0, the
    /// same floor the input fields enforce.
    pub fn set(&mut self, band: Band, value: f64) {
        self.0[band.index()] = if value.is_finite() { value.max(0.0) } else { 0.0 };
    }

    /// Mutable access to one band, for widgets that edit in place.
    ///
    /// A value written here is not checked. The form's fields enforce a 0.0
    /// minimum, and `Session::predict` calls `clamp` on both readings before
    /// classifying, so a negative or non-finite value never reaches the
    /// deviation or the classifier.
    pub fn band_mut(&mut self, band: Band) -> &mut f64 {
        &mut self.0[band.index()]
    }

    pub fn clamp(&mut self) {
        for band in Band::ALL {
            let value = self.get(band);
            self.set(band, value);
        }
    }

    pub fn values(&self) -> &[f64; BAND_COUNT] {
        &self.0
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }
}

impl TryFrom<&[f64]> for FrequencyReading {
    type Error = ReadingError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let values: [f64; BAND_COUNT] =
            values.try_into().map_err(|_| ReadingError::WrongLength {
                expected: BAND_COUNT,
                found: values.len(),
            })?;
        Self::new(values)
    }
}

impl fmt::Display for FrequencyReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value:.1}")?;
        }
        f.write_str("]")
    }
}
