//! Scenario tests for the sequence combinators.
//!
//! Each combinator is exercised through both façades and across the
//! representations it rebuilds into.

use rstest::rstest;
use seqwise::prelude::*;

fn as_int(value: &Value) -> i64 {
    value.as_int().unwrap_or_default()
}

// =============================================================================
// duplicates / unique / deduplicate
// =============================================================================

#[rstest]
fn test_duplicates_on_tuple() {
    let view = SeqView::new(Sequence::tuple([1, 2, 2, 3, 4, 4, 5]));
    assert_eq!(view.duplicates().unwrap(), Sequence::tuple([2, 4]));
}

#[rstest]
fn test_unique_on_tuple() {
    let view = SeqView::new(Sequence::tuple([1, 2, 2, 3, 4, 4, 5]));
    assert_eq!(view.unique().unwrap(), Sequence::tuple([1, 3, 5]));
}

#[rstest]
fn test_deduplicate_on_tuple() {
    let view = SeqView::new(Sequence::tuple([1, 2, 2, 3, 4, 4, 5]));
    assert_eq!(view.deduplicate().unwrap(), Sequence::tuple([1, 2, 3, 4, 5]));
}

#[rstest]
fn test_duplicates_lists_each_repeated_element_once() {
    let view = SeqView::new(Sequence::list([7, 7, 7, 8, 8]));
    assert_eq!(view.duplicates().unwrap(), Sequence::list([7, 8]));
}

#[rstest]
#[case::string(Sequence::from("mississippi"), Sequence::from("misp"))]
#[case::bytes(Sequence::bytes(b"aabbc"), Sequence::bytes(b"abc"))]
#[case::bytearray(Sequence::bytearray(b"xyxy".to_vec()), Sequence::bytearray(b"xy".to_vec()))]
fn test_deduplicate_preserves_representation(#[case] input: Sequence, #[case] expected: Sequence) {
    let deduplicated = SeqView::new(input.clone()).deduplicate().unwrap();
    assert_eq!(deduplicated.kind(), input.kind());
    assert_eq!(deduplicated, expected);
}

#[rstest]
fn test_deduplicate_on_range_materializes_into_target() {
    let view = SeqView::coercing(Sequence::range(0, 3), Kind::DynamicList).unwrap();
    assert_eq!(view.deduplicate().unwrap(), Sequence::list([0, 1, 2]));
}

#[rstest]
#[case::structural(KeyPolicy::Structural, 2)]
#[case::rendering(KeyPolicy::Rendering, 1)]
fn test_key_policy_decides_identity(#[case] key_policy: KeyPolicy, #[case] expected_len: usize) {
    let config = SeqConfig::default().with_key_policy(key_policy);
    let view = SeqView::with_config(Sequence::list([Value::from(1), Value::from("1")]), config);
    assert_eq!(view.deduplicate().unwrap().len(), expected_len);
}

// =============================================================================
// reduce
// =============================================================================

#[rstest]
fn test_reduce_two_parameters_without_initial() {
    let view = SeqView::new(Sequence::list([1, 1, 1, 1, 1]));
    let total = view
        .reduce(Reducer::binary(|sum: i64, value| sum + as_int(value)), None)
        .unwrap();
    assert_eq!(total, Some(5));
}

#[rstest]
fn test_reduce_two_parameters_with_initial() {
    let view = SeqView::new(Sequence::list([1, 1, 1, 1, 1]));
    let total = view
        .reduce(Reducer::binary(|sum: i64, value| sum + as_int(value)), Some(10))
        .unwrap();
    assert_eq!(total, Some(15));
}

#[rstest]
fn test_reduce_four_parameters() {
    let view = SeqView::new(Sequence::list([1, 1, 1, 1, 1]));
    let reducer = Reducer::quaternary(|sum: i64, value, index, container: &Sequence| {
        sum + as_int(value) + index as i64 + container.len() as i64
    });
    assert_eq!(view.reduce(reducer, None).unwrap(), Some(40));
}

#[rstest]
fn test_reduce_three_parameters_receives_index() {
    let view = SeqView::new(Sequence::list([5, 5, 5]));
    let reducer = Reducer::ternary(|sum: i64, _value, index| sum + index as i64);
    assert_eq!(view.reduce(reducer, Some(0)).unwrap(), Some(3));
}

#[rstest]
fn test_reduce_string_seeds_empty_text() {
    let view = SeqView::new(Sequence::from("abc"));
    let reversed = view
        .reduce(
            Reducer::binary(|text: String, value| format!("{value}{text}")),
            None,
        )
        .unwrap();
    assert_eq!(reversed.as_deref(), Some("cba"));
}

#[rstest]
fn test_reduce_empty_without_initial_is_none() {
    let view = SeqView::new(Sequence::list(Vec::<Value>::new()));
    let total = view
        .reduce(Reducer::binary(|sum: i64, value| sum + as_int(value)), None)
        .unwrap();
    assert_eq!(total, None);
}

#[rstest]
fn test_reduce_without_seed_fails() {
    let view = SeqView::new(Sequence::list([Value::None, Value::from(1)]));
    let result = view.reduce(Reducer::binary(|sum: Value, _| sum), None);
    assert!(matches!(result, Err(SeqError::NoAutoSeed(_))));
}

#[rstest]
fn test_reduce_unary_reducer_is_rejected() {
    let view = SeqView::new(Sequence::list([1, 2]));
    let result = view.reduce(Reducer::unary(|sum: i64| sum), Some(0));
    assert!(matches!(
        result,
        Err(SeqError::ArityMismatch {
            min: 2,
            max: 4,
            got: 1
        })
    ));
}

#[rstest]
fn test_fold_counts_into_usize() {
    let view = SeqView::new(Sequence::from("abca"));
    let count = view.fold(Reducer::binary(|count: usize, _| count + 1), 0).unwrap();
    assert_eq!(count, 4);
}

#[rstest]
fn test_fold_collects_positions() {
    let view = SeqView::new(Sequence::list([1, 2, 1, 3]));
    let reducer = Reducer::ternary(|mut positions: Vec<usize>, value: &Value, index| {
        if *value == Value::from(1) {
            positions.push(index);
        }
        positions
    });
    assert_eq!(view.fold(reducer, Vec::new()).unwrap(), vec![0, 2]);
}

// =============================================================================
// count / index
// =============================================================================

#[rstest]
#[case::bounded(Some(0), Some(5), 1)]
#[case::open_end(Some(5), None, 4)]
#[case::unbounded(None, None, 5)]
fn test_count_in_byte_string(
    #[case] start: Option<usize>,
    #[case] end: Option<usize>,
    #[case] expected: usize,
) {
    let view = SeqView::new(Sequence::bytes(b"123455555"));
    assert_eq!(view.count(&Value::from(b"5"), start, end).unwrap(), expected);
}

#[rstest]
fn test_count_byte_by_integer() {
    let view = SeqView::new(Sequence::bytearray(vec![0u8, 1, 0, 1, 1]));
    assert_eq!(view.count(&Value::from(1), None, None).unwrap(), 3);
}

#[rstest]
fn test_count_in_list_rejects_bounds() {
    let view = SeqView::new(Sequence::list([1, 1]));
    assert_eq!(view.count(&Value::from(1), None, None).unwrap(), 2);
    assert!(matches!(
        view.count(&Value::from(1), Some(0), None),
        Err(SeqError::UnsupportedRangeArgs(Kind::DynamicList))
    ));
}

#[rstest]
fn test_count_in_range() {
    let view = SeqView::new(Sequence::range(0, 10));
    assert_eq!(view.count(&Value::from(4), None, None).unwrap(), 1);
    assert_eq!(view.count(&Value::from(40), None, None).unwrap(), 0);
}

#[rstest]
#[case::string_at_end(Sequence::from("abc"), Value::from(""), 3, 1)]
#[case::string_past_end(Sequence::from("abc"), Value::from(""), 5, 0)]
#[case::bytes_at_end(Sequence::bytes(b"abc"), Value::from(b""), 3, 1)]
#[case::bytes_past_end(Sequence::bytes(b"abc"), Value::from(b""), 5, 0)]
fn test_count_empty_needle_from_start(
    #[case] input: Sequence,
    #[case] item: Value,
    #[case] start: usize,
    #[case] expected: usize,
) {
    assert_eq!(SeqView::new(input).count(&item, Some(start), None).unwrap(), expected);
}

#[rstest]
#[case::string(Sequence::from("abc"), Value::from(""))]
#[case::bytearray(Sequence::bytearray(b"abc".to_vec()), Value::from(b""))]
#[case::list(Sequence::list([1, 2, 3]), Value::from(3))]
fn test_index_start_past_end_is_not_found(#[case] input: Sequence, #[case] item: Value) {
    let result = SeqView::new(input).index(&item, Some(5), None);
    assert!(matches!(result, Err(SeqError::NotFound(_))));
}

#[rstest]
#[case::list(Sequence::list([3, 1, 4, 1]), Value::from(1), None, None, 1)]
#[case::list_from_start(Sequence::list([3, 1, 4, 1]), Value::from(1), Some(2), None, 3)]
#[case::tuple(Sequence::tuple(["a", "b"]), Value::from("b"), None, None, 1)]
#[case::string(Sequence::from("hello"), Value::from("ll"), None, None, 2)]
#[case::bytes(Sequence::bytes(b"hello"), Value::from(b"lo"), None, None, 3)]
#[case::range(Sequence::stepped_range(10, 0, -2).unwrap(), Value::from(6), None, None, 2)]
fn test_index_finds_position(
    #[case] input: Sequence,
    #[case] item: Value,
    #[case] start: Option<usize>,
    #[case] stop: Option<usize>,
    #[case] expected: usize,
) {
    assert_eq!(SeqView::new(input).index(&item, start, stop).unwrap(), expected);
}

#[rstest]
fn test_index_missing_item() {
    let view = SeqView::new(Sequence::list([1, 2, 3]));
    let error = view.index(&Value::from(9), None, None).unwrap_err();
    assert!(matches!(error, SeqError::NotFound(_)));
}

#[rstest]
fn test_index_respects_stop() {
    let view = SeqView::new(Sequence::list([1, 2, 3]));
    assert!(view.index(&Value::from(3), None, Some(2)).is_err());
}

#[rstest]
fn test_index_range_rejects_bounds() {
    let view = SeqView::new(Sequence::range(0, 5));
    assert!(matches!(
        view.index(&Value::from(1), Some(0), None),
        Err(SeqError::UnsupportedRangeArgs(Kind::IntegerRange))
    ));
}

// =============================================================================
// filter / map / find / all / any
// =============================================================================

#[rstest]
fn test_filter_evens_from_list() {
    let view = SeqView::new(Sequence::list([1, 2, 3, 4, 5, 6]));
    let evens = view
        .filter(Callback::unary(|value| as_int(value) % 2 == 0))
        .unwrap();
    assert_eq!(evens, Sequence::list([2, 4, 6]));
}

#[rstest]
fn test_filter_by_index() {
    let view = SeqView::new(Sequence::from("abcdef"));
    let even_positions = view
        .filter(Callback::binary(|_, index| index % 2 == 0))
        .unwrap();
    assert_eq!(even_positions, Sequence::from("ace"));
}

#[rstest]
fn test_filter_with_container() {
    let view = SeqView::new(Sequence::list([1, 2, 3]));
    let not_last = view
        .filter(Callback::ternary(|_, index, container| index + 1 < container.len()))
        .unwrap();
    assert_eq!(not_last, Sequence::list([1, 2]));
}

#[rstest]
fn test_map_range_into_default_tuple() {
    let view = SeqView::new(Sequence::range(1, 4));
    let squares = view
        .map(Callback::unary(|value| as_int(value) * as_int(value)))
        .unwrap();
    assert_eq!(squares, Sequence::tuple([1, 4, 9]));
}

#[rstest]
fn test_map_bytes_stays_bytes() {
    let view = SeqView::new(Sequence::bytes(b"abc"));
    let upper = view
        .map(Callback::unary(|value| as_int(value) - 32))
        .unwrap();
    assert_eq!(upper, Sequence::bytes(b"ABC"));
}

#[rstest]
fn test_map_bytes_out_of_range_fails() {
    let view = SeqView::new(Sequence::bytes(b"a"));
    let result = view.map(Callback::unary(|value| as_int(value) + 1000));
    assert!(matches!(result, Err(SeqError::InvalidByteElement(_))));
}

#[rstest]
fn test_find_returns_first_match() {
    let view = SeqView::new(Sequence::list([1, 8, 9, 10]));
    let found = view.find(Callback::unary(|value| as_int(value) > 5)).unwrap();
    assert_eq!(found, Some(Value::from(8)));
    let missing = view.find(Callback::unary(|value| as_int(value) > 50)).unwrap();
    assert_eq!(missing, None);
}

#[rstest]
fn test_all_and_any() {
    let view = SeqView::new(Sequence::list([2, 4, 6]));
    assert!(view.all(Callback::unary(|value| as_int(value) % 2 == 0)).unwrap());
    assert!(!view.any(Callback::unary(|value| as_int(value) > 10)).unwrap());
}

#[rstest]
fn test_nullary_callback_is_rejected() {
    let view = SeqView::new(Sequence::list([1]));
    assert!(matches!(
        view.all(Callback::nullary(|| true)),
        Err(SeqError::ArityMismatch {
            min: 1,
            max: 3,
            got: 0
        })
    ));
}

#[rstest]
fn test_nullary_callback_on_empty_sequence_never_runs() {
    let view = SeqView::new(Sequence::list(Vec::<Value>::new()));
    assert!(view.all(Callback::nullary(|| false)).unwrap());
}

// =============================================================================
// conversions
// =============================================================================

#[rstest]
fn test_join_into_str() {
    let view = SeqView::new(Sequence::list([Value::from(1), Value::from("a"), Value::None]));
    assert_eq!(view.join_into_str(Some(", ")), "1, a, None");
    assert_eq!(view.join_into_str(None), "1aNone");
}

#[rstest]
fn test_to_bytes_encodes_rendering() {
    let view = SeqView::new(Sequence::range(0, 3));
    assert_eq!(view.to_bytes(), b"012".to_vec());
}

#[rstest]
fn test_to_list_and_tuple() {
    let view = SeqView::new(Sequence::from("ab"));
    let expected = vec![Value::from("a"), Value::from("b")];
    assert_eq!(view.to_list(), expected);
    assert_eq!(view.to_tuple(), expected.into_boxed_slice());
}
