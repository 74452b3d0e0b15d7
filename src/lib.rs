//! # Deckly
//!
//! A mutable, ordered document model for keyword-structured engineering
//! decks: a deck is a sequence of named keyword entries, each carrying
//! zero or more records of typed items.
//!
//! ## Module Organization
//!
//! - [`value`] - Typed record items, including run-length [`Repeat`] runs
//! - [`deck`] - The mutable [`Deck`] sequence; all structural editing
//! - [`cursor`] - Identity-revalidating [`Cursor`] references that
//!   survive mutation elsewhere in the deck
//! - [`codec`] - Lossless text encoding with 78-column wrapping
//! - [`engine`] - The [`ParseEngine`](engine::ParseEngine) seam and the
//!   bundled reference engine for the textual format
//!
//! ## Quick Start
//!
//! ```
//! use deckly::{Deck, ParseOptions};
//!
//! let deck = Deck::parse_str("RUNSPEC\n\nDIMENS\n  2 2 1 /\n", &ParseOptions::default())?;
//! assert_eq!(deck.len(), 2);
//! assert_eq!(deck.index_of("DIMENS")?, 1);
//!
//! // Name-based selection yields cursors that track entries by identity.
//! let mut cursor = deck.select("DIMENS").unwrap();
//! assert_eq!(cursor.current_index(&deck)?, 1);
//!
//! // The encoded text re-parses to an equal deck.
//! let text = deck.to_text()?;
//! assert_eq!(Deck::parse_str(&text, &ParseOptions::default())?, deck);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default) - File parsing with `INCLUDE` expansion, and
//!   `std::error::Error` impls
//! - `serde` - Serialization/deserialization for values, keywords, and
//!   extension schemas

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Core modules
// =============================================================================

/// Typed record items and run-length repeat runs.
pub mod value;

/// The mutable, ordered keyword deck.
pub mod deck;

/// Identity-revalidating references into a deck.
pub mod cursor;

/// Errors raised by the deck model.
pub mod error;

// Name-based selection (implemented on `Deck`).
mod select;

// =============================================================================
// Codec and engine
// =============================================================================

/// Textual encoding and the parse entry points.
pub mod codec;

/// The parsing engine seam and the bundled reference engine.
pub mod engine;

// =============================================================================
// Public re-exports (convenience)
// =============================================================================

pub use cursor::Cursor;
pub use deck::{Deck, Keyword, KeywordId, Record};
pub use error::DeckError;
pub use value::{Item, Repeat};

pub use engine::{
    Action, EventKind, KeywordSchema, LineEngine, ParseError, ParseOptions, RecoveryPolicy,
};
