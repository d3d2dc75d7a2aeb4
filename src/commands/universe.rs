//! Universe inspection command

use crate::core::{Code, MAX_LENGTH, MIN_LENGTH};
use crate::engine::{universe, universe_size};

/// Size and (optionally) the boundary codes of one universe
pub struct UniverseRow {
    pub length: usize,
    pub size: usize,
    /// First and last codes, present only when the universe was generated
    pub bounds: Option<(Code, Code)>,
}

/// Report universe sizes for every length, or generate one length in full
///
/// # Errors
///
/// Returns an error if `length` is outside 1-10.
pub fn universe_report(length: Option<usize>) -> Result<Vec<UniverseRow>, String> {
    match length {
        Some(length) => {
            let codes = universe(length).map_err(|e| e.to_string())?;
            let bounds = codes.first().copied().zip(codes.last().copied());
            Ok(vec![UniverseRow {
                length,
                size: codes.len(),
                bounds,
            }])
        }
        None => Ok((MIN_LENGTH..=MAX_LENGTH)
            .filter_map(|length| {
                universe_size(length).map(|size| UniverseRow {
                    length,
                    size,
                    bounds: None,
                })
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_all_lengths_without_generating() {
        let rows = universe_report(None).unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].size, 10);
        assert_eq!(rows[3].size, 5040);
        assert!(rows.iter().all(|r| r.bounds.is_none()));
    }

    #[test]
    fn report_single_length_has_bounds() {
        let rows = universe_report(Some(4)).unwrap();
        let (first, last) = rows[0].bounds.unwrap();
        assert_eq!(first.to_string(), "0123");
        assert_eq!(last.to_string(), "9876");
    }

    #[test]
    fn report_rejects_bad_length() {
        assert!(universe_report(Some(0)).is_err());
        assert!(universe_report(Some(11)).is_err());
    }
}
