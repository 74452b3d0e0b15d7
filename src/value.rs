//! Typed items for deck records.
//!
//! A record is an ordered list of [`Item`]s. Items are a closed sum over
//! the three scalar types the textual format knows about plus [`Repeat`],
//! the run-length encoding of `N` consecutive identical (or `N` consecutive
//! defaulted) values.

#[cfg(not(test))]
use alloc::boxed::Box;
#[cfg(not(test))]
use alloc::string::String;

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// A single value in a deck record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Item {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value (quoted or bare word in the textual format).
    Str(String),
    /// Run-length repeat, `count*value` or `count*` in the textual format.
    Repeat(Repeat),
}

impl Item {
    /// Create a string item.
    pub fn str(s: impl Into<String>) -> Self {
        Item::Str(s.into())
    }

    /// Is this item a scalar (anything but a repeat run)?
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Item::Repeat(_))
    }

    /// The type name of this item, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Item::Int(_) => "int",
            Item::Float(_) => "float",
            Item::Str(_) => "string",
            Item::Repeat(_) => "repeat",
        }
    }

    /// Convert to an `i64`, if this is an integer item.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Item::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to an `f64`. Integer items widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Item::Int(n) => Some(*n as f64),
            Item::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Borrow the string, if this is a string item.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Item::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the repeat run, if this is a repeat item.
    pub fn as_repeat(&self) -> Option<&Repeat> {
        match self {
            Item::Repeat(r) => Some(r),
            _ => None,
        }
    }

    /// Check this item against the data model invariants, including wire
    /// representability: the serializer single-quotes every string, so a
    /// string carrying a single quote or a line break has no textual
    /// spelling that re-parses to the same value.
    pub(crate) fn invariant(&self) -> Result<(), &'static str> {
        match self {
            Item::Str(s) => str_invariant(s),
            Item::Repeat(r) => r.invariant(),
            Item::Int(_) | Item::Float(_) => Ok(()),
        }
    }
}

fn str_invariant(s: &str) -> Result<(), &'static str> {
    if s.contains('\'') {
        return Err("string value must not contain a single quote");
    }
    if s.contains(['\n', '\r']) {
        return Err("string value must not contain line breaks");
    }
    Ok(())
}

impl From<i64> for Item {
    fn from(n: i64) -> Self {
        Item::Int(n)
    }
}

impl From<f64> for Item {
    fn from(x: f64) -> Self {
        Item::Float(x)
    }
}

impl From<&str> for Item {
    fn from(s: &str) -> Self {
        Item::Str(s.into())
    }
}

impl From<String> for Item {
    fn from(s: String) -> Self {
        Item::Str(s)
    }
}

impl From<Repeat> for Item {
    fn from(r: Repeat) -> Self {
        Item::Repeat(r)
    }
}

/// Textual spelling of an item, as the serializer emits it.
///
/// Floats go through `{:?}` so whole values keep their decimal point
/// (`4.0`, not `4`) and re-parse as floats. Strings are single-quoted.
impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Int(n) => write!(f, "{}", n),
            Item::Float(x) => write!(f, "{:?}", x),
            Item::Str(s) => write!(f, "'{}'", s),
            Item::Repeat(r) => write!(f, "{}", r),
        }
    }
}

/// A run of `count` identical or `count` defaulted values.
///
/// Exactly two shapes are constructible:
///
/// - [`Repeat::default_run`]: `count` unspecified/default values
///   (`85*` in the textual format);
/// - [`Repeat::value_run`]: `count` copies of one explicit scalar
///   (`4*0.25` in the textual format).
///
/// The fields are private so every `Repeat` in existence is well-formed;
/// both constructors reject a zero count, and `value_run` rejects a nested
/// repeat as its value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Repeat {
    default: bool,
    count: u32,
    value: Option<Box<Item>>,
}

impl Repeat {
    /// A run of `count` defaulted values.
    pub fn default_run(count: u32) -> Result<Self, DeckError> {
        if count == 0 {
            return Err(DeckError::MalformedValue {
                reason: "repeat count must be positive",
            });
        }
        Ok(Repeat {
            default: true,
            count,
            value: None,
        })
    }

    /// A run of `count` copies of `value`.
    pub fn value_run(count: u32, value: Item) -> Result<Self, DeckError> {
        if count == 0 {
            return Err(DeckError::MalformedValue {
                reason: "repeat count must be positive",
            });
        }
        if !value.is_scalar() {
            return Err(DeckError::MalformedValue {
                reason: "repeat value must be a scalar, not another repeat",
            });
        }
        Ok(Repeat {
            default: false,
            count,
            value: Some(Box::new(value)),
        })
    }

    /// Does this run stand for defaulted values?
    #[inline]
    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Length of the run.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The repeated value, `None` for a default run.
    pub fn value(&self) -> Option<&Item> {
        self.value.as_deref()
    }

    /// Well-formedness check, used by [`crate::Deck::check_invariants`].
    ///
    /// Constructed repeats always satisfy the shape rules; the shape checks
    /// guard against values smuggled in through deserialization, and the
    /// value's own invariant is re-checked so a quote-bearing string cannot
    /// hide inside a run.
    pub(crate) fn invariant(&self) -> Result<(), &'static str> {
        if self.count == 0 {
            return Err("repeat count must be positive");
        }
        match (self.default, &self.value) {
            (true, None) => Ok(()),
            (false, Some(v)) if v.is_scalar() => v.invariant(),
            (false, Some(_)) => Err("repeat value must be a scalar, not another repeat"),
            (true, Some(_)) => Err("default repeat must not carry a value"),
            (false, None) => Err("non-default repeat must carry a value"),
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}*{}", self.count, v),
            None => write!(f, "{}*", self.count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_shape() {
        let r = Repeat::default_run(85).unwrap();
        assert!(r.is_default());
        assert_eq!(r.count(), 85);
        assert_eq!(r.value(), None);
    }

    #[test]
    fn test_value_run_shape() {
        let r = Repeat::value_run(4, Item::Float(0.25)).unwrap();
        assert!(!r.is_default());
        assert_eq!(r.count(), 4);
        assert_eq!(r.value(), Some(&Item::Float(0.25)));
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(Repeat::default_run(0).is_err());
        assert!(Repeat::value_run(0, Item::Int(1)).is_err());
    }

    #[test]
    fn test_nested_repeat_rejected() {
        let inner = Repeat::default_run(2).unwrap();
        let err = Repeat::value_run(3, Item::Repeat(inner)).unwrap_err();
        assert!(matches!(err, DeckError::MalformedValue { .. }));
    }

    #[test]
    fn test_item_display() {
        assert_eq!(Item::Int(1).to_string(), "1");
        assert_eq!(Item::Float(0.25).to_string(), "0.25");
        assert_eq!(Item::Float(4.0).to_string(), "4.0");
        assert_eq!(Item::str("PRESSURE").to_string(), "'PRESSURE'");
        assert_eq!(
            Item::Repeat(Repeat::default_run(85).unwrap()).to_string(),
            "85*"
        );
        assert_eq!(
            Item::Repeat(Repeat::value_run(4, Item::Float(0.25)).unwrap()).to_string(),
            "4*0.25"
        );
    }

    #[test]
    fn test_quote_in_string_fails_invariant() {
        assert!(Item::str("a' b").invariant().is_err());
        assert!(Item::str("line\nbreak").invariant().is_err());
        // Double quotes survive inside a single-quoted token.
        assert!(Item::str("a\"b").invariant().is_ok());
        assert!(Item::str("a--b").invariant().is_ok());
    }

    #[test]
    fn test_quote_in_repeat_value_fails_invariant() {
        let run = Repeat::value_run(2, Item::str("a' b")).unwrap();
        assert!(run.invariant().is_err());
        let run = Repeat::value_run(2, Item::str("NO")).unwrap();
        assert!(run.invariant().is_ok());
    }

    #[test]
    fn test_item_accessors() {
        assert_eq!(Item::Int(3).as_i64(), Some(3));
        assert_eq!(Item::Int(3).as_f64(), Some(3.0));
        assert_eq!(Item::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Item::str("X").as_str(), Some("X"));
        assert_eq!(Item::Int(3).as_str(), None);
        assert!(Item::Int(3).is_scalar());
        assert!(!Item::Repeat(Repeat::default_run(1).unwrap()).is_scalar());
    }
}
