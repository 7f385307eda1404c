use crate::references::{line_references, shift_for_insert, shift_for_removal};
use std::borrow::Cow;

#[test]
fn test_insert_shifts_references_at_and_below() {
    assert_eq!(shift_for_insert("$1 + $2 + $3", 2), "$1 + $3 + $4");
    assert_eq!(shift_for_insert("$5", 1), "$6");
}

#[test]
fn test_insert_leaves_references_above() {
    let shifted = shift_for_insert("$1 * $2", 3);
    assert_eq!(shifted, "$1 * $2");
    assert!(matches!(shifted, Cow::Borrowed(_)));
}

#[test]
fn test_removal_shifts_references_below() {
    assert_eq!(shift_for_removal("$1 + $3 + $4", 2), "$1 + $2 + $3");
}

#[test]
fn test_removal_keeps_reference_to_removed_line() {
    assert_eq!(shift_for_removal("$2 * 10", 2), "$2 * 10");
    assert_eq!(shift_for_removal("$2 + $3", 2), "$2 + $2");
}

#[test]
fn test_variables_are_not_renumbered() {
    assert_eq!(shift_for_insert("$total + $x2", 1), "$total + $x2");
    assert_eq!(shift_for_removal("$a1 = $3", 1), "$a1 = $2");
}

#[test]
fn test_formatting_is_preserved() {
    assert_eq!(
        shift_for_insert("  $9   ×($10)", 1),
        "  $10   ×($11)"
    );
}

#[test]
fn test_digit_count_can_change() {
    assert_eq!(shift_for_insert("$99 + 1", 5), "$100 + 1");
    assert_eq!(shift_for_removal("$10 + 1", 5), "$9 + 1");
}

#[test]
fn test_comments_are_renumbered_too() {
    assert_eq!(shift_for_insert("# see $3", 1), "# see $4");
}

#[test]
fn test_lines_with_invalid_tokens_are_still_renumbered() {
    assert_eq!(shift_for_insert("$2 + @ + $3", 1), "$3 + @ + $4");
}

#[test]
fn test_oversized_reference_is_left_alone() {
    let input = "$99999999999999999999999999 + $1";
    assert_eq!(shift_for_insert(input, 1), "$99999999999999999999999999 + $2");
}

#[test]
fn test_line_references_lists_numbers_in_order() {
    assert_eq!(line_references("$3 + $1 * $rate + $3"), vec![3, 1, 3]);
    assert!(line_references("1 + 2").is_empty());
}
