//! Serialization round trips: encoded text must re-parse to an equal deck.

use proptest::prelude::*;

use deckly::{Deck, Item, Keyword, KeywordSchema, ParseOptions, Repeat};

const DECK: &str = "\
START             -- 0
  10 MAI 2007 /
RUNSPEC

DIMENS
  2 2 1 /
GRID
DX
  4*0.25 /
DY
  4*0.25 /
DZ
  4*0.25 /
TOPS
  4*0.25 /
REGIONS
OPERNUM
  3 3 1 2 /
FIPNUM
  1 1 2 3 /
PARALLEL
  1 \"DISTRIBUTED\" /
GRID
GRID
GRID
";

#[test]
fn test_known_byte_exact_encodings() {
    let deck = Deck::parse_str("OPTIONS\n  85* 1 /\n", &ParseOptions::default()).unwrap();
    assert_eq!(deck.to_text().unwrap(), "OPTIONS\n  85* 1 / \n\n");

    let deck = Deck::parse_str("DX\n  4*0.25 /\n", &ParseOptions::default()).unwrap();
    assert_eq!(deck.to_text().unwrap(), "DX\n  4*0.25 / \n\n");
}

#[test]
fn test_sample_deck_reparses_equal() {
    let deck = Deck::parse_str(DECK, &ParseOptions::default()).unwrap();
    let text = deck.to_text().unwrap();
    let reparsed = Deck::parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(reparsed, deck);
    // The encoding is a fixed point: encoding again changes nothing.
    assert_eq!(reparsed.to_text().unwrap(), text);
}

#[test]
fn test_float_spelling_roundtrip() {
    let deck = Deck::from_keywords([Keyword::new("TOPS").record([Item::Float(4.0)])]);
    let text = deck.to_text().unwrap();
    assert!(text.contains("4.0"));
    let reparsed = Deck::parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(reparsed, deck);
}

#[test]
fn test_empty_record_marker_roundtrip() {
    // A trailing empty record (fixed-size keyword with no data) must
    // survive a round trip without the schema being present at re-parse.
    let deck = Deck::from_keywords([Keyword::with_records("GCONTOL", vec![vec![]])]);
    let text = deck.to_text().unwrap();
    assert_eq!(text, "GCONTOL\n/\n\n");
    let reparsed = Deck::parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(reparsed, deck);
}

#[test]
fn test_quote_bearing_string_rejected_at_encode() {
    // A single quote inside a string has no textual spelling the scanner
    // reads back as one token, so the invariants reject it before any
    // non-reparseable text is emitted.
    let deck = Deck::from_keywords([Keyword::new("TITLE").record([Item::str("a' b")])]);
    assert!(deck.check_invariants().is_err());
    assert!(deck.to_text().is_err());
}

#[test]
fn test_awkward_but_representable_strings_roundtrip() {
    let deck = Deck::from_keywords([Keyword::new("TITLE").record([
        Item::str("a\"b"),
        Item::str("a--b"),
        Item::str("3*4"),
        Item::str("path/to/file"),
        Item::str(""),
    ])]);
    let text = deck.to_text().unwrap();
    let reparsed = Deck::parse_str(&text, &ParseOptions::default()).unwrap();
    assert_eq!(reparsed, deck);
}

#[test]
fn test_extension_name_roundtrips_with_matching_options() {
    // Names beyond the native 8-character shape are representable, but
    // only an options set registering them can read them back.
    let deck = Deck::from_keywords([Keyword::new("LONGKEYWORDNAME").record([Item::Int(1)])]);
    let text = deck.to_text().unwrap();

    let options =
        ParseOptions::default().with_extension(KeywordSchema::named("LONGKEYWORDNAME"));
    let reparsed = Deck::parse_str(&text, &options).unwrap();
    assert_eq!(reparsed, deck);

    assert!(Deck::parse_str(&text, &ParseOptions::default()).is_err());
}

fn scalar_item() -> impl Strategy<Value = Item> {
    // Strings range over everything the invariants admit short of single
    // quotes and line breaks, including comment markers, repeat stars,
    // slashes, and double quotes.
    prop_oneof![
        any::<i64>().prop_map(Item::Int),
        prop::num::f64::NORMAL.prop_map(Item::Float),
        "[A-Za-z0-9 ./_*\"=+:,()!-]{0,12}".prop_map(Item::Str),
    ]
}

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        scalar_item(),
        (1u32..500).prop_map(|n| Item::Repeat(Repeat::default_run(n).unwrap())),
        (1u32..500, scalar_item())
            .prop_map(|(n, v)| Item::Repeat(Repeat::value_run(n, v).unwrap())),
    ]
}

fn keyword() -> impl Strategy<Value = Keyword> {
    (
        "[A-Za-z][A-Za-z0-9_]{0,7}",
        prop::collection::vec(prop::collection::vec(item(), 0..8), 0..4),
    )
        .prop_map(|(name, records)| Keyword::with_records(name, records))
}

proptest! {
    #[test]
    fn prop_encode_then_parse_is_identity(keywords in prop::collection::vec(keyword(), 0..8)) {
        let deck = Deck::from_keywords(keywords);
        let text = deck.to_text().unwrap();
        let reparsed = Deck::parse_str(&text, &ParseOptions::default()).unwrap();
        prop_assert_eq!(reparsed, deck);
    }

    #[test]
    fn prop_encoded_lines_fit_width(keywords in prop::collection::vec(keyword(), 0..8)) {
        let deck = Deck::from_keywords(keywords);
        for line in deck.to_text().unwrap().lines() {
            // Two columns of indent, 78 of content, plus the trailing
            // space after the last item on the line.
            prop_assert!(line.trim_end().len() <= 80, "line too long: {:?}", line);
        }
    }
}
