//! The parsing engine seam and the reference line engine.
//!
//! The deck model treats the keyword grammar as an external collaborator:
//! anything implementing [`ParseEngine`] can feed it. An engine consumes a
//! source (text or, with `std`, a file path), a set of keyword-extension
//! schemas, and a recovery policy, and produces an ordered stream of
//! [`RawKeyword`]s with records already decoded into typed items, or
//! fails with a [`ParseError`] carrying a named event kind.
//!
//! [`LineEngine`] is the bundled reference engine for the textual deck
//! format (see [`tokenizer`] for the grammar it accepts). With `std` it
//! also expands `INCLUDE` entries when parsing from a path, where a base
//! directory exists to resolve targets against.

#[cfg(not(test))]
use alloc::string::String;
#[cfg(not(test))]
use alloc::vec::Vec;

mod error;
mod recovery;
mod schema;
mod tokenizer;

pub use error::ParseError;
pub use recovery::{Action, EventKind, RecoveryPolicy};
pub use schema::{DataSchema, ItemSchema, KeywordSchema, SizeType, ValueType};

use crate::value::Item;

/// One entry of the raw keyword stream an engine produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKeyword {
    /// The keyword name.
    pub name: String,
    /// The decoded records, in order.
    pub records: Vec<Vec<Item>>,
    /// The entry's schema declares a fixed size but the deck supplied no
    /// data. The core marks such entries with a trailing empty record.
    pub fixed_size_no_data: bool,
}

impl RawKeyword {
    /// An entry with no records yet.
    pub fn new(name: impl Into<String>) -> Self {
        RawKeyword {
            name: name.into(),
            records: Vec::new(),
            fixed_size_no_data: false,
        }
    }
}

/// What an engine reads from.
#[derive(Debug, Clone, Copy)]
pub enum EngineSource<'a> {
    /// An in-memory deck string.
    Text(&'a str),
    /// A deck file on disk.
    #[cfg(feature = "std")]
    Path(&'a std::path::Path),
}

/// Configuration handed through to the engine.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Keyword-extension schemas registering custom keywords.
    pub extensions: Vec<KeywordSchema>,
    /// Per-event-kind recovery actions.
    pub recovery: RecoveryPolicy,
}

impl ParseOptions {
    /// Options with no extensions and an all-fatal recovery policy.
    pub fn new() -> Self {
        ParseOptions::default()
    }

    /// Register one keyword-extension schema.
    pub fn with_extension(mut self, schema: KeywordSchema) -> Self {
        self.extensions.push(schema);
        self
    }

    /// Register several keyword-extension schemas.
    pub fn with_extensions(mut self, schemas: impl IntoIterator<Item = KeywordSchema>) -> Self {
        self.extensions.extend(schemas);
        self
    }

    /// Configure a recovery action.
    pub fn with_recovery(mut self, kind: EventKind, action: Action) -> Self {
        self.recovery.set(kind, action);
        self
    }
}

/// An external parsing engine.
///
/// The deck model never interprets deck text itself; it wraps whatever
/// raw stream the engine hands back, 1:1, into keyword entries.
pub trait ParseEngine {
    /// Parse `source` into a raw keyword stream.
    fn parse(
        &self,
        source: EngineSource<'_>,
        options: &ParseOptions,
    ) -> Result<Vec<RawKeyword>, ParseError>;
}

/// The reference engine for the textual deck format.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEngine;

impl LineEngine {
    /// The engine has no state; this is here for symmetry with richer
    /// engines behind the same trait.
    pub fn new() -> Self {
        LineEngine
    }
}

impl ParseEngine for LineEngine {
    fn parse(
        &self,
        source: EngineSource<'_>,
        options: &ParseOptions,
    ) -> Result<Vec<RawKeyword>, ParseError> {
        match source {
            EngineSource::Text(text) => tokenizer::tokenize(text, options),
            #[cfg(feature = "std")]
            EngineSource::Path(path) => {
                let text = read_source(path)?;
                let raws = tokenizer::tokenize(&text, options)?;
                let dir = path.parent().unwrap_or(std::path::Path::new("."));
                expand_includes(raws, dir, options)
            }
        }
    }
}

#[cfg(feature = "std")]
fn read_source(path: &std::path::Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Splice the contents of `INCLUDE` entries into the stream, recursively.
///
/// A missing target raises [`EventKind::MissingInclude`]; when the policy
/// tolerates it, the unexpanded entry stays in the stream verbatim.
#[cfg(feature = "std")]
fn expand_includes(
    raws: Vec<RawKeyword>,
    dir: &std::path::Path,
    options: &ParseOptions,
) -> Result<Vec<RawKeyword>, ParseError> {
    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        if raw.name == "INCLUDE" {
            let target = raw
                .records
                .first()
                .and_then(|record| record.first())
                .and_then(Item::as_str);
            if let Some(target) = target {
                let path = dir.join(target);
                if path.is_file() {
                    let text = read_source(&path)?;
                    let nested = tokenizer::tokenize(&text, options)?;
                    let nested_dir = path.parent().unwrap_or(std::path::Path::new("."));
                    out.extend(expand_includes(nested, nested_dir, options)?);
                    continue;
                }
                options
                    .recovery
                    .resolve(EventKind::MissingInclude, 0, target)?;
            }
        }
        out.push(raw);
    }
    Ok(out)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_from_path_expands_includes() {
        let dir = tempfile::tempdir().unwrap();
        let inc = dir.path().join("dx.inc");
        std::fs::write(&inc, "DX\n  4*0.25 /\n").unwrap();
        let deck_path = dir.path().join("CASE.DATA");
        let mut f = std::fs::File::create(&deck_path).unwrap();
        writeln!(f, "GRID").unwrap();
        writeln!(f, "INCLUDE").unwrap();
        writeln!(f, "  'dx.inc' /").unwrap();
        drop(f);

        let raws = LineEngine::new()
            .parse(EngineSource::Path(&deck_path), &ParseOptions::default())
            .unwrap();
        let names: Vec<_> = raws.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["GRID", "DX"]);
    }

    #[test]
    fn test_missing_include_is_fatal_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("CASE.DATA");
        std::fs::write(&deck_path, "INCLUDE\n  'nope.inc' /\n").unwrap();

        let err = LineEngine::new()
            .parse(EngineSource::Path(&deck_path), &ParseOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Event {
                kind: EventKind::MissingInclude,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_include_kept_verbatim_when_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("CASE.DATA");
        std::fs::write(&deck_path, "INCLUDE\n  'nope.inc' /\n").unwrap();

        let options =
            ParseOptions::default().with_recovery(EventKind::MissingInclude, Action::Ignore);
        let raws = LineEngine::new()
            .parse(EngineSource::Path(&deck_path), &options)
            .unwrap();
        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].name, "INCLUDE");
    }
}
