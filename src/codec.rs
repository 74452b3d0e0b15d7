//! Textual encoding of decks.
//!
//! The serializer emits the keyword name on its own line, then each record
//! as space-separated items closed by a `/` terminator, greedily wrapped
//! so no line exceeds 78 characters. The output of [`encode_deck`] re-parses
//! to a value-equal deck (the round-trip contract). The byte-level quirks
//! here are part of that contract: the two-space record indent is excluded
//! from the width check, and every emitted item, the terminator included,
//! is followed by one space.

#[cfg(not(test))]
use alloc::string::String;
#[cfg(not(test))]
use alloc::{format, vec::Vec};

use crate::deck::{Deck, Keyword, Record};
use crate::engine::{EngineSource, LineEngine, ParseEngine, ParseError, ParseOptions, RawKeyword};
use crate::error::DeckError;

/// Maximum emitted line width, excluding the record indent.
const LINE_WIDTH: usize = 78;

/// Record indent.
const INDENT: &str = "  ";

/// Serialize one record.
///
/// The empty record is a lone terminator line. Otherwise the terminator is
/// appended as a final item before wrapping decisions are made, so it can
/// wrap onto a continuation line like any other item.
pub fn encode_record(record: &Record) -> String {
    if record.is_empty() {
        return String::from("/\n");
    }
    let mut out = String::new();
    let mut line = String::new();
    for text in record
        .iter()
        .map(|item| format!("{}", item))
        .chain([String::from("/")])
    {
        if !line.is_empty() && line.len() + text.len() > LINE_WIDTH {
            out.push_str(INDENT);
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        line.push_str(&text);
        line.push(' ');
    }
    if !line.is_empty() {
        out.push_str(INDENT);
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Serialize one keyword: the name line, then each record in order.
///
/// Validates the keyword first; serializing a malformed keyword is a
/// [`DeckError::MalformedValue`].
pub fn encode_keyword(kw: &Keyword) -> Result<String, DeckError> {
    kw.invariant()
        .map_err(|reason| DeckError::MalformedValue { reason })?;
    let mut out = String::new();
    out.push_str(&kw.name);
    out.push('\n');
    for record in &kw.records {
        out.push_str(&encode_record(record));
    }
    Ok(out)
}

/// Serialize a whole deck, each keyword followed by a blank separator line.
///
/// Checks the deck invariants before emitting anything.
pub fn encode_deck(deck: &Deck) -> Result<String, DeckError> {
    deck.check_invariants()?;
    let mut out = String::new();
    for kw in deck {
        out.push_str(&encode_keyword(kw)?);
        out.push('\n');
    }
    Ok(out)
}

/// Wrap a raw engine stream into a deck, 1:1.
fn wrap(raws: Vec<RawKeyword>) -> Deck {
    let mut deck = Deck::new();
    for raw in raws {
        let mut kw = Keyword::with_records(raw.name, raw.records);
        if raw.fixed_size_no_data {
            kw.records.push(Vec::new());
        }
        deck.push(kw);
    }
    deck
}

impl Deck {
    /// Parse a deck from an in-memory string with the reference engine.
    pub fn parse_str(text: &str, options: &ParseOptions) -> Result<Deck, ParseError> {
        Deck::parse_with(&LineEngine::new(), EngineSource::Text(text), options)
    }

    /// Parse a deck file with the reference engine, expanding `INCLUDE`
    /// entries relative to the file's directory.
    #[cfg(feature = "std")]
    pub fn parse_path(
        path: impl AsRef<std::path::Path>,
        options: &ParseOptions,
    ) -> Result<Deck, ParseError> {
        Deck::parse_with(
            &LineEngine::new(),
            EngineSource::Path(path.as_ref()),
            options,
        )
    }

    /// Parse a deck through any engine behind the [`ParseEngine`] seam.
    pub fn parse_with(
        engine: &impl ParseEngine,
        source: EngineSource<'_>,
        options: &ParseOptions,
    ) -> Result<Deck, ParseError> {
        Ok(wrap(engine.parse(source, options)?))
    }

    /// Serialize this deck; see [`encode_deck`].
    pub fn to_text(&self) -> Result<String, DeckError> {
        encode_deck(self)
    }
}
