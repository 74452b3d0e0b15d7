//! Name-based selection of deck entries.
//!
//! Selection resolves a keyword name, optionally narrowed to an occurrence
//! or an occurrence range, into a [`Cursor`]. Absence is a first-class
//! outcome: every selector returns `Option<Cursor>` and callers test for
//! `None` before touching the cursor. Position-based access lives on
//! [`Deck`] directly.

#[cfg(not(test))]
use alloc::vec;

use core::ops::Range;

use crate::cursor::Cursor;
use crate::deck::Deck;

impl Deck {
    /// A cursor over every entry named `name`, in ascending position
    /// order, or `None` if there are none.
    pub fn select(&self, name: &str) -> Option<Cursor> {
        let indices = self.all_indices(name);
        if indices.is_empty() {
            None
        } else {
            Some(Cursor::capture(self, indices))
        }
    }

    /// A cursor over the `n`-th occurrence (0-based) of `name`, or `None`
    /// if there are fewer than `n + 1` occurrences.
    pub fn select_nth(&self, name: &str, n: usize) -> Option<Cursor> {
        let indices = self.all_indices(name);
        let &index = indices.get(n)?;
        Some(Cursor::capture(self, vec![index]))
    }

    /// A cursor over the occurrences of `name` in `range` (a range over
    /// the occurrence list, not over deck positions). The range is clamped
    /// to the occurrence count; an empty result is `None`.
    pub fn select_range(&self, name: &str, range: Range<usize>) -> Option<Cursor> {
        let indices = self.all_indices(name);
        let start = range.start.min(indices.len());
        let end = range.end.min(indices.len());
        if start >= end {
            return None;
        }
        Some(Cursor::capture(self, indices[start..end].to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Keyword;

    fn sample() -> Deck {
        Deck::from_keywords([
            Keyword::new("RUNSPEC"),
            Keyword::new("GRID"),
            Keyword::new("PROPS"),
            Keyword::new("GRID"),
            Keyword::new("GRID"),
        ])
    }

    #[test]
    fn test_select_all_occurrences() {
        let deck = sample();
        let mut cursor = deck.select("GRID").unwrap();
        let indices: Result<Vec<_>, _> = cursor.indices(&deck).collect();
        assert_eq!(indices.unwrap(), vec![1, 3, 4]);
    }

    #[test]
    fn test_select_absent_is_none() {
        let deck = sample();
        assert!(deck.select("SCHEDULE").is_none());
        assert!(deck.select_nth("SCHEDULE", 0).is_none());
        assert!(deck.select_range("SCHEDULE", 0..1).is_none());
    }

    #[test]
    fn test_select_nth() {
        let deck = sample();
        let mut c1 = deck.select_nth("GRID", 1).unwrap();
        assert_eq!(c1.current_index(&deck).unwrap(), 3);
        assert!(deck.select_nth("GRID", 3).is_none());
    }

    #[test]
    fn test_select_range_clamps() {
        let deck = sample();
        let mut cursor = deck.select_range("GRID", 1..10).unwrap();
        let indices: Result<Vec<_>, _> = cursor.indices(&deck).collect();
        assert_eq!(indices.unwrap(), vec![3, 4]);
        assert!(deck.select_range("GRID", 3..10).is_none());
    }
}
