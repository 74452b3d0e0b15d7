//! Identity-revalidating references into a deck.
//!
//! A [`Cursor`] captures one or more positions in a deck at construction
//! time, together with the [`KeywordId`] and a value snapshot of each
//! entry. It holds no borrow of the deck (accessors take `&Deck`
//! explicitly), so the deck stays freely mutable while cursors are live.
//!
//! Revalidation is lazy and per-position: on each access the cursor checks
//! whether the cached index still holds the captured id, re-derives the
//! position via [`Deck::identity_index`] if the sequence shifted, and
//! reports [`DeckError::StaleCursor`] only when the captured entry has
//! left the deck entirely. A cursor therefore survives insertions and
//! deletions *elsewhere* in the deck, while still detecting removal of its
//! own target.

#[cfg(not(test))]
use alloc::vec::Vec;

use core::ops::Range;

use crate::deck::{Deck, Keyword, KeywordId};
use crate::error::DeckError;

/// A stable reference to one or more deck positions.
#[derive(Debug, Clone)]
pub struct Cursor {
    indices: Vec<usize>,
    ids: Vec<KeywordId>,
    snapshots: Vec<Keyword>,
    offset: usize,
}

impl Cursor {
    /// Capture the entries at `indices`. Callers guarantee the indices are
    /// in bounds; the selector does.
    pub(crate) fn capture(deck: &Deck, indices: Vec<usize>) -> Self {
        let ids = indices
            .iter()
            .map(|&i| deck.id_at(i).expect("selector index in bounds"))
            .collect();
        let snapshots = indices
            .iter()
            .map(|&i| deck.get(i).expect("selector index in bounds").clone())
            .collect();
        Cursor {
            indices,
            ids,
            snapshots,
            offset: 0,
        }
    }

    /// Number of captured positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// A cursor never captures zero positions; selectors return `None`
    /// for absent names instead.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Current traversal offset into the captured positions.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Re-derive position `i` if the deck shifted under it.
    fn revalidate(&mut self, deck: &Deck, i: usize) -> Result<(), DeckError> {
        let cached = self.indices[i];
        let id = self.ids[i];
        if deck.id_at(cached) == Some(id) {
            return Ok(());
        }
        self.indices[i] = deck.identity_index(id)?;
        Ok(())
    }

    /// The deck position at the traversal offset, revalidated.
    pub fn current_index(&mut self, deck: &Deck) -> Result<usize, DeckError> {
        self.revalidate(deck, self.offset)?;
        Ok(self.indices[self.offset])
    }

    /// Lazily yield the revalidated position of every captured entry, in
    /// capture order. Each position revalidates independently: one stale
    /// anchor does not poison the others.
    pub fn indices<'a>(&'a mut self, deck: &'a Deck) -> Indices<'a> {
        Indices {
            cursor: self,
            deck,
            next: 0,
        }
    }

    /// Advance to the next captured position.
    ///
    /// Revalidates every position first (an advance is an access), then
    /// returns a cursor one step forward, or `None` once the traversal is
    /// exhausted. Forward-only; never wraps.
    pub fn advance(mut self, deck: &Deck) -> Result<Option<Cursor>, DeckError> {
        for i in 0..self.indices.len() {
            self.revalidate(deck, i)?;
        }
        if self.offset + 1 >= self.indices.len() {
            return Ok(None);
        }
        self.offset += 1;
        Ok(Some(self))
    }

    /// A deck-absolute range offset from the current position.
    ///
    /// `relative_range(deck, 1, 1)` on a cursor at position `i` yields
    /// `i + 1..i + 1`, the empty insertion point just after the entry.
    pub fn relative_range(
        &mut self,
        deck: &Deck,
        start: isize,
        end: isize,
    ) -> Result<Range<usize>, DeckError> {
        let base = self.current_index(deck)? as isize;
        let (lo, hi) = (base + start, base + end);
        if lo < 0 || hi < lo {
            return Err(DeckError::RangeOutOfBounds {
                start: lo.max(0) as usize,
                end: hi.max(0) as usize,
                len: deck.len(),
            });
        }
        Ok(lo as usize..hi as usize)
    }

    /// The keyword snapshot at the traversal offset.
    ///
    /// Snapshots are taken at capture time and never re-fetched; mutating
    /// the deck afterwards does not change what a cursor reports here.
    pub fn value(&self) -> &Keyword {
        &self.snapshots[self.offset]
    }

    /// All captured keyword snapshots, in capture order.
    pub fn values(&self) -> &[Keyword] {
        &self.snapshots
    }
}

/// Lazy iterator over a cursor's revalidated positions.
pub struct Indices<'a> {
    cursor: &'a mut Cursor,
    deck: &'a Deck,
    next: usize,
}

impl Iterator for Indices<'_> {
    type Item = Result<usize, DeckError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.cursor.indices.len() {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(
            self.cursor
                .revalidate(self.deck, i)
                .map(|_| self.cursor.indices[i]),
        )
    }
}
