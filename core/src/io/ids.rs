//! Plain lists of pattern ids, one per line.
//!
//! Lines may also use the `i=<id>` form printed by older searches. Blank lines
//! and lines starting with `#` are ignored.

use std::io::{self, Write};

use crate::pattern::{PatternCodec, PatternId, PatternResult};

/// Parses a list of ids.
pub fn parse_id_list(text: &str, codec: &PatternCodec) -> PatternResult<Vec<PatternId>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| codec.parse_id(line.strip_prefix("i=").unwrap_or(line)))
        .collect()
}

/// Writes a list of ids, one per line.
pub fn write_id_list<W: Write>(
    mut out: W,
    ids: impl IntoIterator<Item = PatternId>,
) -> io::Result<()> {
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternError;

    #[test]
    fn test_parse_id_list() {
        let codec = PatternCodec::default();
        let text = "# oscillators\nlist of oscillators:\n";
        assert!(matches!(
            parse_id_list(text, &codec),
            Err(PatternError::Unparseable(_))
        ));

        let text = "# oscillators\n\ni=896\n  1792 \ni=58720256\n";
        let ids = parse_id_list(text, &codec).unwrap();
        assert_eq!(
            vec![896, 1792, 58_720_256],
            ids.into_iter().map(u64::from).collect::<Vec<_>>()
        );

        assert!(matches!(
            parse_id_list("562949953421312\n", &codec),
            Err(PatternError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_write_id_list() {
        let codec = PatternCodec::default();
        let ids = vec![codec.id(896).unwrap(), codec.id(1792).unwrap()];
        let mut out = vec![];
        write_id_list(&mut out, ids.clone()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!("896\n1792\n", text);
        assert_eq!(ids, parse_id_list(&text, &codec).unwrap());
    }
}
