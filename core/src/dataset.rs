//! Labeled training data built from search results.
//!
//! Each record pairs the flattened cells of a pattern with a one-element label
//! that is `1` for oscillators and `0` for everything else. Records serialize
//! to JSON as `[[c0, c1, ...], [label]]`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::{self, Write};
use thiserror::Error;

use crate::pattern::{Grid, PatternCodec, PatternError, PatternId};

/// Result type returned by fallible dataset routines.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error encountered while building or writing a dataset.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("invalid id range {start}..{end}; expected 0 <= start <= end <= {limit}")]
    InvalidRange { start: u64, end: u64, limit: u64 },
    #[error("there are no non-oscillators below {upper} to sample")]
    NoNegatives { upper: u64 },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Flattened pattern and its label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LabeledRecord(pub Vec<u8>, pub [u8; 1]);

impl LabeledRecord {
    /// Constructs a record from a grid.
    pub fn new(grid: &Grid, is_oscillator: bool) -> Self {
        Self(grid.to_bits(), [is_oscillator as u8])
    }
    /// Returns the flattened cells, `1` for live and `0` for dead.
    pub fn cells(&self) -> &[u8] {
        &self.0
    }
    /// Returns `true` if the record is labeled as an oscillator.
    pub fn is_oscillator(&self) -> bool {
        self.1[0] == 1
    }
}

/// Returns one record for every id in `start..end`, labeled according to
/// whether it appears in `oscillators`.
pub fn label_range(
    codec: &PatternCodec,
    oscillators: &BTreeSet<PatternId>,
    start: u64,
    end: u64,
) -> DatasetResult<Vec<LabeledRecord>> {
    let limit = codec.id_count();
    if start > end || end > limit {
        return Err(DatasetError::InvalidRange { start, end, limit });
    }
    (start..end)
        .map(|raw| {
            let id = codec.id(raw)?;
            Ok(LabeledRecord::new(
                &codec.decode(id)?,
                oscillators.contains(&id),
            ))
        })
        .collect()
}

/// Draws `count` ids uniformly from `0..upper`, redrawing any that are known
/// oscillators, and returns them as negative records. The same id may be drawn
/// more than once.
pub fn sample_negatives<R: Rng + ?Sized>(
    rng: &mut R,
    codec: &PatternCodec,
    oscillators: &BTreeSet<PatternId>,
    upper: u64,
    count: usize,
) -> DatasetResult<Vec<LabeledRecord>> {
    let limit = codec.id_count();
    if upper > limit {
        return Err(DatasetError::InvalidRange {
            start: 0,
            end: upper,
            limit,
        });
    }
    if count == 0 {
        return Ok(vec![]);
    }
    let known_below_upper = oscillators.iter().filter(|&&id| u64::from(id) < upper).count();
    if upper <= known_below_upper as u64 {
        return Err(DatasetError::NoNegatives { upper });
    }

    let mut records = Vec::with_capacity(count);
    while records.len() < count {
        let id = codec.id(rng.random_range(0..upper))?;
        if !oscillators.contains(&id) {
            records.push(LabeledRecord::new(&codec.decode(id)?, false));
        }
    }
    Ok(records)
}

/// Returns copies of `records` with the order of the cells reversed, which
/// rotates each pattern by 180 degrees.
pub fn flipped(records: &[LabeledRecord]) -> Vec<LabeledRecord> {
    records
        .iter()
        .map(|LabeledRecord(cells, label)| {
            LabeledRecord(cells.iter().rev().copied().collect(), *label)
        })
        .collect()
}

/// Writes records as JSON, one per line.
pub fn write_jsonl<'a, W: Write>(
    mut out: W,
    records: impl IntoIterator<Item = &'a LabeledRecord>,
) -> DatasetResult<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn known_oscillators(codec: &PatternCodec) -> BTreeSet<PatternId> {
        [896_u64, 1792, 3584, 7168, 13280, 14336, 14723, 15232]
            .iter()
            .map(|&raw| codec.id(raw).unwrap())
            .collect()
    }

    #[test]
    fn test_label_range() {
        let codec = PatternCodec::default();
        let oscillators = known_oscillators(&codec);
        let records = label_range(&codec, &oscillators, 890, 900).unwrap();
        assert_eq!(10, records.len());
        for (raw, record) in (890..900).zip(&records) {
            assert_eq!(raw == 896, record.is_oscillator());
            assert_eq!(49, record.cells().len());
        }
        assert_eq!(&[0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0], &records[6].cells()[..11]);

        assert!(matches!(
            label_range(&codec, &oscillators, 9, 3),
            Err(DatasetError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_sample_negatives_is_reproducible() {
        let codec = PatternCodec::default();
        let oscillators = known_oscillators(&codec);
        let a = sample_negatives(
            &mut ChaCha8Rng::seed_from_u64(10),
            &codec,
            &oscillators,
            20_000,
            50,
        )
        .unwrap();
        let b = sample_negatives(
            &mut ChaCha8Rng::seed_from_u64(10),
            &codec,
            &oscillators,
            20_000,
            50,
        )
        .unwrap();
        assert_eq!(50, a.len());
        assert_eq!(a, b);
        assert!(a.iter().all(|record| !record.is_oscillator()));
    }

    #[test]
    fn test_sample_negatives_skips_oscillators() {
        let codec = PatternCodec::default();
        // Every id below 897 except 0 counts as an oscillator here.
        let oscillators = (1..897)
            .map(|raw| codec.id(raw).unwrap())
            .collect::<BTreeSet<_>>();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let records = sample_negatives(&mut rng, &codec, &oscillators, 897, 5).unwrap();
        assert!(records.iter().all(|record| record.cells().iter().all(|&c| c == 0)));

        let all = (0..10).map(|raw| codec.id(raw).unwrap()).collect();
        assert!(matches!(
            sample_negatives(&mut rng, &codec, &all, 10, 1),
            Err(DatasetError::NoNegatives { upper: 10 })
        ));
        assert!(sample_negatives(&mut rng, &codec, &all, 10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_flipped() {
        let codec = PatternCodec::default();
        let records = label_range(&codec, &known_oscillators(&codec), 1, 2).unwrap();
        let flipped = flipped(&records);
        assert_eq!(records[0].is_oscillator(), flipped[0].is_oscillator());
        assert_eq!(1, flipped[0].cells()[48]);
        assert_eq!(1, flipped[0].cells().iter().filter(|&&c| c == 1).count());
    }

    #[test]
    fn test_write_jsonl() {
        let codec = PatternCodec::default();
        let records = label_range(&codec, &known_oscillators(&codec), 896, 897).unwrap();
        let mut out = vec![];
        write_jsonl(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut expected = vec!["0"; 49];
        for &k in &[7, 8, 9] {
            expected[k] = "1";
        }
        assert_eq!(format!("[[{}],[1]]\n", expected.join(",")), text);
    }
}
