//! The mutable, ordered keyword deck.
//!
//! A [`Deck`] owns a sequence of [`Keyword`] entries and is the only place
//! structural mutation happens. Every entry slot carries a [`KeywordId`]
//! minted at insertion time; ids are how cursors track *that exact entry*
//! across mutations of the surrounding sequence, the way object identity
//! does in dynamic languages. Ids never participate in deck equality.
//!
//! All mutations either fully apply or fail without effect: range
//! operations validate their bounds before touching the storage.

#[cfg(not(test))]
use alloc::string::String;
#[cfg(not(test))]
use alloc::vec::Vec;

use core::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::value::Item;

/// An ordered list of items; one data line group in the textual format.
///
/// The empty record is meaningful: as a keyword's trailing record it marks
/// a fixed-size-with-no-data entry, and it serializes to a lone `/` line.
pub type Record = Vec<Item>;

/// A named deck entry: a keyword name plus zero or more records.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyword {
    /// The keyword name. Must start with an ASCII letter and be free of
    /// whitespace and the `--` comment marker.
    pub name: String,
    /// The data records, in order.
    pub records: Vec<Record>,
}

impl Keyword {
    /// A keyword with no records (a section header like `RUNSPEC`).
    pub fn new(name: impl Into<String>) -> Self {
        Keyword {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// A keyword with the given records.
    pub fn with_records(name: impl Into<String>, records: Vec<Record>) -> Self {
        Keyword {
            name: name.into(),
            records,
        }
    }

    /// Append one record, builder-style.
    pub fn record(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.records.push(items.into_iter().collect());
        self
    }

    /// Check this keyword against the data model invariants, including
    /// wire representability: a name the scanner would not read back as a
    /// keyword line has no round-trippable spelling.
    pub(crate) fn invariant(&self) -> Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("keyword name must be non-empty");
        }
        if !self.name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err("keyword name must start with a letter");
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err("keyword name must not contain whitespace");
        }
        if self.name.contains("--") {
            return Err("keyword name must not contain the comment marker");
        }
        for record in &self.records {
            for item in record {
                item.invariant()?;
            }
        }
        Ok(())
    }
}

/// Identity of one deck entry slot.
///
/// Minted when a keyword enters a deck (insert, append, replace) and
/// retired when that entry leaves it. Moving an entry around inside the
/// deck preserves its id; replacing the keyword at a position mints a
/// fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeywordId(u64);

#[derive(Debug, Clone)]
struct Entry {
    id: KeywordId,
    kw: Keyword,
}

/// A mutable, ordered sequence of keyword entries.
///
/// Two decks are equal when their keyword sequences are value-equal;
/// entry ids are deliberately excluded so a parsed deck compares equal to
/// an independently constructed one.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    entries: Vec<Entry>,
    next_id: u64,
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.kw == b.kw)
    }
}

impl Deck {
    /// An empty deck.
    pub fn new() -> Self {
        Deck::default()
    }

    /// A deck over the given keywords, in order.
    pub fn from_keywords(keywords: impl IntoIterator<Item = Keyword>) -> Self {
        let mut deck = Deck::new();
        for kw in keywords {
            deck.push(kw);
        }
        deck
    }

    fn mint(&mut self, kw: Keyword) -> Entry {
        let id = KeywordId(self.next_id);
        self.next_id += 1;
        Entry { id, kw }
    }

    fn check_index(&self, index: usize) -> Result<(), DeckError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DeckError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            })
        }
    }

    fn check_range(&self, range: &Range<usize>) -> Result<(), DeckError> {
        if range.start <= range.end && range.end <= self.entries.len() {
            Ok(())
        } else {
            Err(DeckError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.entries.len(),
            })
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the deck empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the keywords in order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.iter().map(|e| &e.kw)
    }

    /// The keyword at `index`.
    pub fn get(&self, index: usize) -> Result<&Keyword, DeckError> {
        self.check_index(index)?;
        Ok(&self.entries[index].kw)
    }

    /// The keywords in `range`, as a borrowed run.
    pub fn get_range(&self, range: Range<usize>) -> Result<Vec<&Keyword>, DeckError> {
        self.check_range(&range)?;
        Ok(self.entries[range].iter().map(|e| &e.kw).collect())
    }

    /// Replace the keyword at `index`.
    ///
    /// The slot gets a fresh id: a cursor anchored on the old entry will
    /// report [`DeckError::StaleCursor`] on its next access.
    pub fn set(&mut self, index: usize, kw: Keyword) -> Result<(), DeckError> {
        self.check_index(index)?;
        let entry = self.mint(kw);
        self.entries[index] = entry;
        Ok(())
    }

    /// Replace the entries in `range` with `replacement` (the lengths need
    /// not match). Equivalent to slice assignment.
    pub fn splice(
        &mut self,
        range: Range<usize>,
        replacement: Vec<Keyword>,
    ) -> Result<(), DeckError> {
        self.check_range(&range)?;
        let fresh: Vec<Entry> = replacement.into_iter().map(|kw| self.mint(kw)).collect();
        self.entries.splice(range, fresh);
        Ok(())
    }

    /// Insert a keyword before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, kw: Keyword) -> Result<(), DeckError> {
        if index > self.entries.len() {
            return Err(DeckError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.mint(kw);
        self.entries.insert(index, entry);
        Ok(())
    }

    /// Insert several keywords before `index`, preserving their order.
    pub fn insert_all(
        &mut self,
        index: usize,
        keywords: Vec<Keyword>,
    ) -> Result<(), DeckError> {
        if index > self.entries.len() {
            return Err(DeckError::IndexOutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        self.splice(index..index, keywords)
    }

    /// Append a keyword at the end.
    pub fn push(&mut self, kw: Keyword) {
        let entry = self.mint(kw);
        self.entries.push(entry);
    }

    /// Remove and return the keyword at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Keyword, DeckError> {
        self.check_index(index)?;
        Ok(self.entries.remove(index).kw)
    }

    /// Remove the entries in `range`.
    pub fn remove_range(&mut self, range: Range<usize>) -> Result<(), DeckError> {
        self.check_range(&range)?;
        self.entries.drain(range);
        Ok(())
    }

    /// Does any entry have this name?
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.kw.name == name)
    }

    /// Does any entry equal this keyword by value?
    pub fn contains(&self, kw: &Keyword) -> bool {
        self.entries.iter().any(|e| &e.kw == kw)
    }

    /// Number of entries with this name.
    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|e| e.kw.name == name).count()
    }

    /// Number of entries value-equal to this keyword.
    pub fn count_keyword(&self, kw: &Keyword) -> usize {
        self.entries.iter().filter(|e| &e.kw == kw).count()
    }

    /// First position with this name.
    pub fn index_of(&self, name: &str) -> Result<usize, DeckError> {
        self.entries
            .iter()
            .position(|e| e.kw.name == name)
            .ok_or_else(|| DeckError::NameNotFound { name: name.into() })
    }

    /// Every position with this name, ascending. Possibly empty.
    pub fn all_indices(&self, name: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kw.name == name)
            .map(|(i, _)| i)
            .collect()
    }

    /// The id of the entry at `index`.
    pub fn id_at(&self, index: usize) -> Option<KeywordId> {
        self.entries.get(index).map(|e| e.id)
    }

    /// The position currently holding the entry with this id.
    ///
    /// Linear identity scan; cursors use it to re-locate their anchor
    /// after the surrounding sequence shifted.
    pub fn identity_index(&self, id: KeywordId) -> Result<usize, DeckError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(DeckError::StaleCursor)
    }

    /// Validate every keyword against the data model invariants.
    ///
    /// Fails on the first violation, naming the position and keyword.
    pub fn check_invariants(&self) -> Result<(), DeckError> {
        for (position, entry) in self.entries.iter().enumerate() {
            if let Err(reason) = entry.kw.invariant() {
                return Err(DeckError::Invariant {
                    position,
                    name: entry.kw.name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Keyword;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over a deck's keywords.
pub struct Iter<'a> {
    inner: core::slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Keyword;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| &e.kw)
    }
}

impl FromIterator<Keyword> for Deck {
    fn from_iter<T: IntoIterator<Item = Keyword>>(iter: T) -> Self {
        Deck::from_keywords(iter)
    }
}
