//! Parse errors forwarded from the engine.

#[cfg(not(test))]
use alloc::string::String;

use core::fmt;

use super::recovery::EventKind;

/// A fatal parse failure.
///
/// Engine problems surface as named error events; an event becomes a
/// `ParseError` when the recovery policy resolves it to `Throw` (or leaves
/// it unconfigured, which defaults to fatal).
#[derive(Debug)]
pub enum ParseError {
    /// An error event the policy resolved to `Throw`.
    Event {
        /// The named event kind.
        kind: EventKind,
        /// Input line the event was raised on (1-indexed).
        line: usize,
        /// Human-readable detail.
        message: String,
    },
    /// An event-kind name the policy does not recognize.
    UnknownEventKind {
        /// The unrecognized name.
        name: String,
    },
    /// An I/O failure reading a deck or include file.
    #[cfg(feature = "std")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying failure.
        source: std::io::Error,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event { kind, line, message } => {
                write!(f, "{} at line {}: {}", kind.name(), line, message)
            }
            Self::UnknownEventKind { name } => {
                write!(f, "unrecognized error-event name '{}'", name)
            }
            #[cfg(feature = "std")]
            Self::Io { path, source } => {
                write!(f, "failed to read '{}': {}", path, source)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
