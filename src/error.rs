//! Error types for the deck document model.
//!
//! The parsing engine has its own error type ([`crate::engine::ParseError`])
//! since parse failures carry a named event kind resolved against the
//! recovery policy. Everything the core model itself can reject is a
//! [`DeckError`].

#[cfg(not(test))]
use alloc::string::String;

use core::fmt;

/// Errors raised by the deck model, cursors, and the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// A position index was outside the deck's bounds.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Deck length at the time of the access.
        len: usize,
    },
    /// A position range was outside the deck's bounds or inverted.
    RangeOutOfBounds {
        /// Start of the offending range.
        start: usize,
        /// End of the offending range (exclusive).
        end: usize,
        /// Deck length at the time of the access.
        len: usize,
    },
    /// No keyword with the requested name exists in the deck.
    NameNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// A cursor's captured entry is no longer present in its deck.
    StaleCursor,
    /// A value violates the data model invariants.
    MalformedValue {
        /// What was wrong with the value.
        reason: &'static str,
    },
    /// A keyword in the deck violates the data model invariants.
    Invariant {
        /// Position of the offending keyword.
        position: usize,
        /// Name of the offending keyword (may be empty when the name
        /// itself is the violation).
        name: String,
        /// What was wrong.
        reason: &'static str,
    },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "deck index {} out of bounds (len {})", index, len)
            }
            Self::RangeOutOfBounds { start, end, len } => {
                write!(f, "deck range {}..{} out of bounds (len {})", start, end, len)
            }
            Self::NameNotFound { name } => {
                write!(f, "no keyword named '{}' in deck", name)
            }
            Self::StaleCursor => {
                write!(f, "invalid cursor, has the keyword been removed?")
            }
            Self::MalformedValue { reason } => {
                write!(f, "malformed value: {}", reason)
            }
            Self::Invariant { position, name, reason } => {
                write!(
                    f,
                    "invariant violation at position {} ('{}'): {}",
                    position, name, reason
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeckError {}
