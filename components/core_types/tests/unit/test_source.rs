//! Unit tests for SourcePosition and SourceLocation

use core_types::{SourceLocation, SourcePosition};

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_zero_values() {
        let pos = SourcePosition::default();

        assert_eq!(pos.row, 0);
        assert_eq!(pos.col, 0);
        assert_eq!(pos.index, 0);
    }

    #[test]
    fn test_source_position_large_values() {
        let pos = SourcePosition::new(u32::MAX, u32::MAX, usize::MAX);

        assert_eq!(pos.row, u32::MAX);
        assert_eq!(pos.col, u32::MAX);
        assert_eq!(pos.index, usize::MAX);
    }

    #[test]
    fn test_source_position_clone_is_independent() {
        let original = SourcePosition::new(42, 7, 1000);
        let mut copy = original;
        copy.row = 0;
        copy.index = 3;

        assert_eq!(original, SourcePosition::new(42, 7, 1000));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_source_position_ordering_follows_index() {
        let a = SourcePosition::new(0, 4, 4);
        let b = SourcePosition::new(1, 0, 6);
        assert!(a < b);
    }
}

#[cfg(test)]
mod source_location_tests {
    use super::*;

    fn loc(start: usize, end: usize) -> SourceLocation {
        SourceLocation::new(
            SourcePosition::new(0, start as u32, start),
            SourcePosition::new(0, end as u32, end),
        )
    }

    #[test]
    fn test_location_clone_is_structurally_equal() {
        let original = loc(3, 9);
        let copy = original.clone();
        assert_eq!(original, copy);
    }

    #[test]
    fn test_location_clone_is_independent() {
        let original = loc(3, 9);
        let mut copy = original;
        copy.end = SourcePosition::new(5, 0, 40);

        assert_eq!(original.end.index, 9);
        assert_eq!(copy.end.index, 40);
    }

    #[test]
    fn test_zero_width_location() {
        let at = SourceLocation::at(SourcePosition::new(2, 1, 12));
        assert!(at.is_empty());
        assert_eq!(at.start, at.end);
    }

    #[test]
    fn test_location_serializes_as_plain_object() {
        let json = serde_json::to_value(loc(1, 4)).unwrap();
        assert_eq!(json["start"]["index"], 1);
        assert_eq!(json["end"]["col"], 4);
    }
}
