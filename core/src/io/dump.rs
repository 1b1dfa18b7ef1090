//! Human-readable dump of oscillators.
//!
//! A dump starts with a free-form header, followed by one entry per pattern:
//! `side` lines of `0` and `1` (one per grid row), then a line containing
//! exactly [`SEPARATOR`].

use std::io::{self, Write};
use thiserror::Error;

use crate::config::GridConfig;
use crate::pattern::{Grid, PatternCodec, PatternError, PatternId};

/// Line written after every pattern.
pub const SEPARATOR: &str = "-------";

/// Result type returned by fallible dump routines.
pub type DumpResult<T> = Result<T, DumpError>;

/// Error encountered while writing or reading a dump.
#[allow(missing_docs)]
#[derive(Error, Debug)]
pub enum DumpError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Returns the header describing a dump of oscillators found on a grid
/// searched up to `max_checked`.
pub fn header(config: &GridConfig, max_checked: u64) -> String {
    format!(
        "A database of {side}x{side} oscillators in Conway's Game of Life ({rule}).\n\
         Max checked value is {max_checked}.\n\
         Max period of {max_generation} generations, grid border goes to infinity.\n\
         \n",
        side = config.side,
        rule = config.rule,
        max_checked = max_checked,
        max_generation = config.max_generation,
    )
}

/// Writes `header` and then every pattern in `ids`.
pub fn write_dump<W: Write>(
    mut out: W,
    codec: &PatternCodec,
    ids: impl IntoIterator<Item = PatternId>,
    header: &str,
) -> DumpResult<()> {
    out.write_all(header.as_bytes())?;
    for id in ids {
        let grid = codec.decode(id)?;
        writeln!(out, "{}", grid)?;
        writeln!(out, "{}", SEPARATOR)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads the patterns of a dump back into ids, skipping the header.
///
/// The header ends at the first line that looks like a grid row, i.e. a line
/// of exactly `side` `0`/`1` characters.
pub fn parse_dump(text: &str, codec: &PatternCodec) -> DumpResult<Vec<PatternId>> {
    let side = codec.side();
    let is_row = |line: &str| line.len() == side && line.bytes().all(|b| b == b'0' || b == b'1');

    let mut ids = vec![];
    let mut cells = Vec::with_capacity(codec.cell_count());
    let mut in_header = true;
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end();
        let line_number = index + 1;
        if in_header {
            if !is_row(line) {
                continue;
            }
            in_header = false;
        }
        if line == SEPARATOR {
            if cells.len() != codec.cell_count() {
                return Err(malformed(line_number, "separator before the end of the grid"));
            }
            let grid = Grid::from_cells(side, std::mem::take(&mut cells))?;
            ids.push(codec.encode(&grid)?);
        } else if is_row(line) {
            if cells.len() == codec.cell_count() {
                return Err(malformed(line_number, "missing separator"));
            }
            cells.extend(line.bytes().map(|b| b == b'1'));
        } else {
            return Err(malformed(line_number, "expected a grid row or separator"));
        }
    }
    if !cells.is_empty() {
        return Err(malformed(text.lines().count(), "missing final separator"));
    }
    Ok(ids)
}

fn malformed(line: usize, reason: &str) -> DumpError {
    DumpError::Malformed {
        line,
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLINKER_DUMP: &str = "\
0000000
0000000
0000000
0011100
0000000
0000000
0000000
-------
";

    #[test]
    fn test_write_dump() {
        let codec = PatternCodec::default();
        let blinker = codec.id(58_720_256).unwrap();
        let mut out = vec![];
        write_dump(&mut out, &codec, vec![blinker], "").unwrap();
        assert_eq!(BLINKER_DUMP, String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_header() {
        let header = header(&GridConfig::default(), 132_000_000);
        assert!(header.starts_with("A database of 7x7 oscillators"));
        assert!(header.contains("Max checked value is 132000000."));
        assert!(header.contains("Max period of 15 generations"));
        assert!(header.ends_with("\n\n"));
    }

    #[test]
    fn test_parse_dump() {
        let codec = PatternCodec::default();
        let ids = [896_u64, 1792, 58_720_256]
            .iter()
            .map(|&raw| codec.id(raw).unwrap())
            .collect::<Vec<_>>();
        let mut out = vec![];
        let header = header(&GridConfig::default(), 20_000);
        write_dump(&mut out, &codec, ids.clone(), &header).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(ids, parse_dump(&text, &codec).unwrap());
    }

    #[test]
    fn test_parse_malformed_dump() {
        let codec = PatternCodec::default();
        let truncated = &BLINKER_DUMP[..BLINKER_DUMP.len() - SEPARATOR.len() - 1];
        assert!(matches!(
            parse_dump(truncated, &codec),
            Err(DumpError::Malformed { line: 7, .. })
        ));
        let early = BLINKER_DUMP.replacen("0000000\n-------", "-------", 1);
        assert!(matches!(
            parse_dump(&early, &codec),
            Err(DumpError::Malformed { line: 7, .. })
        ));
        let garbage = BLINKER_DUMP.replacen("0011100", "0012100", 1);
        assert!(matches!(
            parse_dump(&garbage, &codec),
            Err(DumpError::Malformed { line: 4, .. })
        ));
    }
}
