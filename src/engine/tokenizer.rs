//! Line scanner for the textual deck format.
//!
//! The format is free-form: a line whose first column holds a letter
//! starts a new keyword entry; every other non-blank line contributes
//! items to the current keyword's open record, which a `/` token closes
//! (the rest of that line is ignored). `--` begins a comment outside
//! quotes. A count-prefixed `*` denotes a repeat run, with or without a
//! trailing explicit value.
//!
//! Problems are raised as named error events and resolved against the
//! recovery policy; only `Throw` (the default) aborts the scan.

#[cfg(not(test))]
use alloc::string::{String, ToString};
#[cfg(not(test))]
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::value::{Item, Repeat};

use super::error::ParseError;
use super::recovery::EventKind;
use super::{ParseOptions, RawKeyword};

/// Scan `input` into a raw keyword stream.
pub(crate) fn tokenize(
    input: &str,
    options: &ParseOptions,
) -> Result<Vec<RawKeyword>, ParseError> {
    let mut scanner = Scanner::new(options);
    for line in input.lines() {
        scanner.line(line)?;
    }
    scanner.finish()
}

/// Is `name` acceptable without an extension schema registering it?
///
/// Native keyword names are at most 8 characters of ASCII letters,
/// digits, `_` or `-`, starting with a letter.
fn native_name(name: &str) -> bool {
    name.len() <= 8
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

struct Scanner<'a> {
    options: &'a ParseOptions,
    /// Extension schemas by name, insertion order preserved.
    registry: IndexMap<&'a str, &'a super::KeywordSchema>,
    raws: Vec<RawKeyword>,
    current: Option<RawKeyword>,
    /// Items of the open (not yet `/`-terminated) record.
    items: Vec<Item>,
    /// Inside an entry being skipped after a tolerated UnknownKeyword.
    skipping: bool,
    line_no: usize,
}

impl<'a> Scanner<'a> {
    fn new(options: &'a ParseOptions) -> Self {
        let registry = options
            .extensions
            .iter()
            .map(|schema| (schema.name.as_str(), schema))
            .collect();
        Scanner {
            options,
            registry,
            raws: Vec::new(),
            current: None,
            items: Vec::new(),
            skipping: false,
            line_no: 0,
        }
    }

    /// Raise an error event; `Ok(())` means the policy said continue.
    fn event(&self, kind: EventKind, message: &str) -> Result<(), ParseError> {
        self.options.recovery.resolve(kind, self.line_no, message)
    }

    /// Close the current keyword entry, if any.
    fn flush(&mut self) -> Result<(), ParseError> {
        if !self.items.is_empty() {
            self.event(EventKind::ExtraData, "record not terminated by '/'")?;
            // Tolerated: keep the dangling items as a record.
            let items = core::mem::take(&mut self.items);
            if let Some(current) = self.current.as_mut() {
                current.records.push(items);
            }
        }
        if let Some(mut raw) = self.current.take() {
            raw.fixed_size_no_data = raw.records.is_empty()
                && self
                    .registry
                    .get(raw.name.as_str())
                    .is_some_and(|schema| schema.fixed_size());
            self.raws.push(raw);
        }
        Ok(())
    }

    fn line(&mut self, raw_line: &str) -> Result<(), ParseError> {
        self.line_no += 1;
        let line = strip_comment(raw_line);
        if line.trim().is_empty() {
            return Ok(());
        }
        if line.starts_with(|c: char| c.is_ascii_alphabetic()) {
            self.keyword_line(line)
        } else {
            self.data_line(line)
        }
    }

    fn keyword_line(&mut self, line: &str) -> Result<(), ParseError> {
        self.flush()?;
        self.skipping = false;
        let mut tokens = line.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        if !native_name(name) && !self.registry.contains_key(name) {
            self.event(EventKind::UnknownKeyword, name)?;
            // Tolerated: skip the entry's data lines.
            self.skipping = true;
            return Ok(());
        }
        if tokens.next().is_some() {
            self.event(EventKind::ExtraData, "unexpected data after keyword name")?;
        }
        self.current = Some(RawKeyword::new(name));
        Ok(())
    }

    fn data_line(&mut self, line: &str) -> Result<(), ParseError> {
        if self.skipping {
            return Ok(());
        }
        if self.current.is_none() {
            if line.trim_start().starts_with('/') {
                self.event(EventKind::RandomSlash, "'/' with no open keyword")?;
            } else {
                self.event(EventKind::RandomText, line.trim())?;
            }
            return Ok(());
        }
        for token in split_tokens(line) {
            if token == "/" {
                let items = core::mem::take(&mut self.items);
                if let Some(current) = self.current.as_mut() {
                    current.records.push(items);
                }
                // Anything after the terminator is treated as commentary.
                break;
            }
            self.items.push(parse_item(&token));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<RawKeyword>, ParseError> {
        self.flush()?;
        Ok(self.raws)
    }
}

/// Cut a `--` comment, honoring single and double quotes.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        match (quote, bytes[i]) {
            (Some(q), b) if b == q => quote = None,
            (None, b @ (b'\'' | b'"')) => quote = Some(b),
            (None, b'-') if bytes.get(i + 1) == Some(&b'-') => return &line[..i],
            _ => {}
        }
        i += 1;
    }
    line
}

/// Split a data line into item tokens.
///
/// Tokens are delimited by whitespace and by an unquoted `/`, which is a
/// token of its own. Quoted spans stay glued to the token they started in
/// (so `3*'NO'` is one token and `'path/to/file'` keeps its slashes), with
/// the quote characters preserved for [`parse_item`] to strip.
fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(q) => {
                token.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => {
                if c.is_whitespace() {
                    if !token.is_empty() {
                        tokens.push(core::mem::take(&mut token));
                    }
                } else if c == '/' {
                    if !token.is_empty() {
                        tokens.push(core::mem::take(&mut token));
                    }
                    tokens.push("/".to_string());
                } else {
                    if c == '\'' || c == '"' {
                        quote = Some(c);
                    }
                    token.push(c);
                }
            }
        }
    }
    if !token.is_empty() {
        tokens.push(token);
    }
    tokens
}

/// Strip one layer of matching quotes, if present.
fn unquote(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 && (bytes[0] == b'\'' || bytes[0] == b'"') && bytes[bytes.len() - 1] == bytes[0]
    {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// A scalar item: quoted string, integer, float, or bare-word string.
fn parse_scalar(token: &str) -> Item {
    if let Some(inner) = unquote(token) {
        return Item::str(inner);
    }
    if let Ok(n) = token.parse::<i64>() {
        return Item::Int(n);
    }
    if let Ok(x) = token.parse::<f64>() {
        return Item::Float(x);
    }
    Item::str(token)
}

/// An item token: a repeat run (`85*`, `4*0.25`, `2*'NO'`) or a scalar.
///
/// A malformed run (zero count) falls through to the bare-word string
/// case; free format has no reserved tokens.
fn parse_item(token: &str) -> Item {
    if let Some(star) = token.find('*') {
        let (count_part, value_part) = (&token[..star], &token[star + 1..]);
        if !count_part.is_empty() && count_part.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(count) = count_part.parse::<u32>() {
                let run = if value_part.is_empty() {
                    Repeat::default_run(count)
                } else {
                    Repeat::value_run(count, parse_scalar(value_part))
                };
                if let Ok(run) = run {
                    return Item::Repeat(run);
                }
            }
        }
    }
    parse_scalar(token)
}
