//! Sample token streams with known encodings
//!
//! Each case pushes a fixed list of tokens and checks the exact wire output,
//! so any change to the delta encoding or the repair path shows up here.

use rstest::rstest;
use semtok::text::{Position, Range};
use semtok::tokens::{SemanticTokensBuilder, SemanticTokensLegend};
use semtok::SemanticTokensError;

type Token = (u32, u32, u32, u32, u32);

fn encode(tokens: &[Token]) -> Vec<u32> {
    let mut builder = SemanticTokensBuilder::new();
    for &(line, character, length, token_type, modifiers) in tokens {
        builder.push(line, character, length, token_type, modifiers);
    }
    builder.build(None).data().to_vec()
}

#[rstest]
#[case::ascending(
    &[(1, 0, 3, 0, 0), (1, 4, 2, 1, 0), (2, 0, 1, 0, 0)],
    &[1, 0, 3, 0, 0, 0, 4, 2, 1, 0, 1, 0, 1, 0, 0]
)]
#[case::descending(
    &[(2, 0, 1, 0, 0), (1, 4, 2, 1, 0), (1, 0, 3, 0, 0)],
    &[1, 0, 3, 0, 0, 0, 4, 2, 1, 0, 1, 0, 1, 0, 0]
)]
#[case::out_of_order_pair(
    &[(2, 0, 1, 0, 0), (1, 0, 3, 0, 0)],
    &[1, 0, 3, 0, 0, 1, 0, 1, 0, 0]
)]
#[case::break_in_the_middle(
    &[(0, 2, 1, 0, 0), (0, 8, 1, 0, 0), (0, 5, 1, 0, 0), (3, 1, 1, 0, 0)],
    &[0, 2, 1, 0, 0, 0, 3, 1, 0, 0, 0, 3, 1, 0, 0, 3, 1, 1, 0, 0]
)]
#[case::modifiers_are_carried(
    &[(4, 4, 2, 7, 0b1010), (0, 0, 1, 1, 1)],
    &[0, 0, 1, 1, 1, 4, 4, 2, 7, 0b1010]
)]
#[case::empty(&[], &[])]
fn encodes_known_streams(#[case] tokens: &[Token], #[case] expected: &[u32]) {
    assert_eq!(encode(tokens), expected);
}

fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend::new(
        ["namespace", "function", "variable"],
        ["declaration", "readonly", "static"],
    )
    .unwrap()
}

#[rstest]
#[case::no_legend(
    None,
    Range::from_coords(0, 0, 0, 3),
    "function",
    &[],
    SemanticTokensError::MissingLegend
)]
#[case::multi_line(
    Some(legend()),
    Range::from_coords(0, 0, 1, 3),
    "function",
    &[],
    SemanticTokensError::MultiLineRangeNotSupported { start_line: 0, end_line: 1 }
)]
#[case::unknown_type(
    Some(legend()),
    Range::from_coords(0, 0, 0, 3),
    "keyword",
    &[],
    SemanticTokensError::UnknownTokenType("keyword".into())
)]
#[case::unknown_modifier(
    Some(legend()),
    Range::from_coords(0, 0, 0, 3),
    "function",
    &["static", "async"],
    SemanticTokensError::UnknownTokenModifier("async".into())
)]
fn push_range_failures_leave_no_trace(
    #[case] legend: Option<SemanticTokensLegend>,
    #[case] range: Range,
    #[case] token_type: &str,
    #[case] modifiers: &[&str],
    #[case] expected: SemanticTokensError,
) {
    let mut builder = match &legend {
        Some(legend) => SemanticTokensBuilder::with_legend(legend),
        None => SemanticTokensBuilder::new(),
    };
    builder.push(5, 0, 1, 0, 0);
    let before = builder.build(None);

    assert_eq!(
        builder.push_range(&range, token_type, modifiers.iter().copied()),
        Err(expected)
    );
    assert_eq!(builder.token_count(), 1);
    assert!(builder.is_sorted());
    assert_eq!(builder.build(None), before);
}

#[test]
fn push_range_matches_raw_push() {
    let legend = legend();
    let mut named = SemanticTokensBuilder::with_legend(&legend);
    named
        .push_range(
            &Range::new(Position::new(3, 10), Position::new(3, 4)),
            "variable",
            ["readonly", "static"],
        )
        .unwrap();
    named
        .push_range(&Range::from_coords(1, 0, 1, 9), "function", ["declaration"])
        .unwrap();

    let mut raw = SemanticTokensBuilder::new();
    raw.push(3, 4, 6, 2, 0b110);
    raw.push(1, 0, 9, 1, 0b001);

    assert_eq!(named.build(None), raw.build(None));
}

#[test]
fn result_id_is_attached() {
    let mut builder = SemanticTokensBuilder::new();
    builder.push(0, 0, 1, 0, 0);
    assert_eq!(builder.build(Some("42".into())).result_id(), Some("42"));
    assert_eq!(builder.build(None).result_id(), None);
}

#[test]
fn intersection_of_disjoint_ranges_is_absent() {
    let a = Range::from_coords(0, 0, 0, 2);
    let b = Range::from_coords(0, 5, 0, 8);
    assert_eq!(a.intersection(&b), None);
    assert_eq!(a.union(&a), a);
}
