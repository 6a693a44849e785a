//! Pre-filled readings from a plain text file.
//!
//! The file holds twelve whitespace-separated decimal numbers: the six left
//! ear bands followed by the six right ear bands.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{InputError, ReadingError};
use crate::reading::{BAND_COUNT, FrequencyReading};

/// Number of values the input file must contain.
pub const VALUE_COUNT: usize = 2 * BAND_COUNT;

/// Both readings parsed from one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedReadings {
    pub left: FrequencyReading,
    pub right: FrequencyReading,
}

/// Reads and parses the input file at `path`.
pub fn load(path: &Path) -> Result<LoadedReadings, InputError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    });

    let result = content.and_then(|content| parse(&content));
    match &result {
        Ok(readings) => info!(
            path = %path.display(),
            left = %readings.left,
            right = %readings.right,
            "loaded readings from file"
        ),
        Err(e) => warn!(path = %path.display(), error = %e, "input file rejected"),
    }
    result
}

/// Same as `load`, flattened to the `(left, right)` pair the form uses.
/// Both sides are `None` whenever the file is unusable.
pub fn load_pair(
    path: &Path,
) -> (
    Option<FrequencyReading>,
    Option<FrequencyReading>,
    Option<InputError>,
) {
    match load(path) {
        Ok(LoadedReadings { left, right }) => (Some(left), Some(right), None),
        Err(e) => (None, None, Some(e)),
    }
}

/// Parses file content into the left and right readings.
pub fn parse(content: &str) -> Result<LoadedReadings, InputError> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    debug!(tokens = tokens.len(), "tokenized input");
    if tokens.len() != VALUE_COUNT {
        return Err(InputError::MalformedInput {
            found: tokens.len(),
        });
    }

    let values = tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            token
                .parse::<f64>()
                .map_err(|_| InputError::InvalidNumber {
                    position,
                    token: (*token).to_string(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let (left, right) = values.split_at(BAND_COUNT);
    Ok(LoadedReadings {
        left: reading_at(left, 0)?,
        right: reading_at(right, BAND_COUNT)?,
    })
}

fn reading_at(values: &[f64], offset: usize) -> Result<FrequencyReading, InputError> {
    FrequencyReading::try_from(values).map_err(|e| match e {
        ReadingError::OutOfRange { position, value } => InputError::OutOfRange {
            position: offset + position,
            value,
        },
        ReadingError::WrongLength { found, .. } => InputError::MalformedInput { found },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{Band, Ear};
    use crate::session::{Session, SessionState};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_twelve_values_split_left_then_right() {
        let file = write_file("10 20 30 40 50 60\n70 80 90 100 110 120\n");
        let readings = load(file.path()).unwrap();
        assert_eq!(
            readings.left.values(),
            &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]
        );
        assert_eq!(
            readings.right.values(),
            &[70.0, 80.0, 90.0, 100.0, 110.0, 120.0]
        );
    }

    #[test]
    fn test_any_whitespace_separates_values() {
        let readings = parse("  250\t500 1000\r\n2000 4000 8000 1.5 2.5 3 4 5 6e2 ").unwrap();
        assert_eq!(readings.left, FrequencyReading::ideal());
        assert_eq!(readings.right.get(Band::Hz250), 1.5);
        assert_eq!(readings.right.get(Band::Hz8000), 600.0);
    }

    #[test]
    fn test_wrong_count_is_malformed() {
        for content in ["1 2 3 4 5 6 7 8 9 10 11", "1 2 3 4 5 6 7 8 9 10 11 12 13", ""] {
            let file = write_file(content);
            let (left, right, error) = load_pair(file.path());
            assert!(left.is_none() && right.is_none());
            let error = error.unwrap();
            assert!(matches!(error, InputError::MalformedInput { .. }));
            assert_eq!(
                error.to_string(),
                "Il file deve contenere esattamente 12 valori."
            );
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        let (left, right, error) = load_pair(&path);
        assert!(left.is_none() && right.is_none());
        let error = error.unwrap();
        assert!(matches!(error, InputError::FileNotFound { .. }));
        assert!(error.to_string().starts_with("Il file non è stato trovato"));
        assert!(error.to_string().contains("test.txt"));
    }

    #[test]
    fn test_non_numeric_token_is_reported() {
        let err = parse("1 2 3 4 5 6 7 8 nove 10 11 12").unwrap_err();
        match err {
            InputError::InvalidNumber { position, token } => {
                assert_eq!(position, 8);
                assert_eq!(token, "nove");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x31, 0x20, 0xff, 0xfe, 0x20, 0x32]).unwrap();

        let (left, right, error) = load_pair(file.path());
        assert!(left.is_none() && right.is_none());
        assert!(matches!(error, Some(InputError::Io { .. })));

        let session = Session::start(file.path());
        assert_eq!(session.state(), SessionState::ManualEntry);
        assert_eq!(*session.reading(Ear::Left), FrequencyReading::default());
    }

    #[test]
    fn test_non_finite_values_are_out_of_range() {
        let err = parse("1 2 inf 4 5 6 7 8 9 10 11 12").unwrap_err();
        assert!(matches!(
            err,
            InputError::OutOfRange { position: 2, value } if value.is_infinite()
        ));

        let err = parse("1 2 3 4 5 6 7 NaN 9 10 11 12").unwrap_err();
        assert!(matches!(
            err,
            InputError::OutOfRange { position: 7, value } if value.is_nan()
        ));
    }

    #[test]
    fn test_negative_value_position_counts_across_ears() {
        let err = parse("1 2 3 4 5 6 7 8 9 -10 11 12").unwrap_err();
        assert!(matches!(
            err,
            InputError::OutOfRange {
                position: 9,
                value
            } if value == -10.0
        ));
    }
}
