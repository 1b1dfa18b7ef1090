use proptest::prelude::*;

use super::*;

#[test]
fn test_decode_bit_order() {
    let codec = PatternCodec::default();
    assert_eq!(49, codec.cell_count());
    assert_eq!(1 << 49, codec.id_count());

    // Bit 0 is the top-left cell, bit 48 the bottom-right one.
    let grid = codec.decode(codec.id(1).unwrap()).unwrap();
    assert!(grid.get(0, 0));
    assert_eq!(1, grid.population());

    let grid = codec.decode(codec.id(1_u64 << 48).unwrap()).unwrap();
    assert!(grid.get(6, 6));
    assert_eq!(1, grid.population());

    // Bit 7 starts the second row.
    let grid = codec.decode(codec.id(1 << 7).unwrap()).unwrap();
    assert!(grid.get(1, 0));

    let grid = codec.decode(codec.id(0).unwrap()).unwrap();
    assert_eq!(49, grid.len());
    assert!(grid.is_empty());
}

#[test]
fn test_invalid_pattern_ids() {
    let codec = PatternCodec::default();
    assert_eq!(
        Err(PatternError::InvalidPattern { id: -1, cells: 49 }),
        codec.id(-1)
    );
    assert_eq!(
        Err(PatternError::InvalidPattern {
            id: 1 << 49,
            cells: 49
        }),
        codec.id(1_i128 << 49)
    );
    assert!(codec.id((1_u64 << 49) - 1).is_ok());

    // An id from a larger grid does not decode on a smaller one.
    let big = codec.id(1_u64 << 30).unwrap();
    let small = PatternCodec::new(5).unwrap();
    assert_eq!(
        Err(PatternError::InvalidPattern {
            id: 1 << 30,
            cells: 25
        }),
        small.decode(big)
    );
}

#[test]
fn test_parse_id() {
    let codec = PatternCodec::default();
    assert_eq!(Ok(codec.id(58_720_256).unwrap()), codec.parse_id(" 58720256\n"));
    assert_eq!(
        Err(PatternError::Unparseable("blinker".to_owned())),
        codec.parse_id("blinker")
    );
    assert!(matches!(
        codec.parse_id("-5"),
        Err(PatternError::InvalidPattern { id: -5, .. })
    ));
}

#[test]
fn test_encode_wrong_size() {
    let codec = PatternCodec::default();
    let grid = Grid::dead(3);
    assert_eq!(
        Err(PatternError::WrongGridLength {
            expected: 49,
            got: 9
        }),
        codec.encode(&grid)
    );
    assert_eq!(
        Err(PatternError::WrongGridLength {
            expected: 49,
            got: 48
        }),
        Grid::from_cells(7, vec![false; 48])
    );
    assert_eq!(Err(PatternError::UnsupportedSide(8)), PatternCodec::new(8));
    assert_eq!(
        Err(PatternError::CellOutOfRange {
            row: 7,
            col: 0,
            side: 7
        }),
        Grid::from_live_cells(7, vec![(7, 0)])
    );
}

#[test]
fn test_grid_display() {
    let codec = PatternCodec::default();
    let grid = Grid::from_live_cells(7, vec![(0, 0), (3, 2), (3, 3), (3, 4), (6, 6)]).unwrap();
    assert_eq!(
        "1000000\n0000000\n0000000\n0011100\n0000000\n0000000\n0000001",
        grid.to_string()
    );
    let id = codec.encode(&grid).unwrap();
    assert_eq!(1 + (1 << 23) + (1 << 24) + (1 << 25) + (1 << 48), u64::from(id));
}

proptest! {
    /// Tests that decoding and then encoding an id gives back the same id.
    #[test]
    fn test_id_round_trip(raw in 0..(1_u64 << 49)) {
        let codec = PatternCodec::default();
        let id = codec.id(raw).unwrap();
        let grid = codec.decode(id).unwrap();
        prop_assert_eq!(49, grid.len());
        prop_assert_eq!(raw.count_ones() as usize, grid.population());
        prop_assert_eq!(id, codec.encode(&grid).unwrap());
    }

    /// Tests that encoding and then decoding a grid gives back the same grid.
    #[test]
    fn test_grid_round_trip(side in 1..=7_usize, seed in any::<u64>()) {
        let codec = PatternCodec::new(side).unwrap();
        let cells: Vec<bool> = (0..side * side).map(|k| (seed >> k) & 1 == 1).collect();
        let grid = Grid::from_cells(side, cells).unwrap();
        let id = codec.encode(&grid).unwrap();
        prop_assert!(u64::from(id) < codec.id_count());
        prop_assert_eq!(grid, codec.decode(id).unwrap());
    }
}
