use std::ops::{Index, Range};

/// Given two lookups and ranges calculates the length of the common prefix.
///
/// Items are compared with `eq` rather than `PartialEq` so that callers can
/// plug in their own notion of equality.
pub fn common_prefix_len<Old, New, F>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    mut eq: F,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    F: FnMut(&Old::Output, &New::Output) -> bool,
{
    if old_range.is_empty() || new_range.is_empty() {
        return 0;
    }
    old_range
        .zip(new_range)
        .take_while(
            #[inline(always)]
            |&(o, n)| eq(&old[o], &new[n]),
        )
        .count()
}

/// Given two lookups and ranges calculates the length of common suffix.
pub fn common_suffix_len<Old, New, F>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    mut eq: F,
) -> usize
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    F: FnMut(&Old::Output, &New::Output) -> bool,
{
    if old_range.is_empty() || new_range.is_empty() {
        return 0;
    }
    old_range
        .rev()
        .zip(new_range.rev())
        .take_while(
            #[inline(always)]
            |&(o, n)| eq(&old[o], &new[n]),
        )
        .count()
}

#[test]
fn test_common_prefix_len() {
    let eq = |a: &u8, b: &u8| a == b;
    assert_eq!(
        common_prefix_len("".as_bytes(), 0..0, "".as_bytes(), 0..0, eq),
        0
    );
    assert_eq!(
        common_prefix_len("foobarbaz".as_bytes(), 0..9, "foobarblah".as_bytes(), 0..10, eq),
        7
    );
    assert_eq!(
        common_prefix_len("foobarbaz".as_bytes(), 0..9, "blablabla".as_bytes(), 0..9, eq),
        0
    );
    assert_eq!(
        common_prefix_len("foobarbaz".as_bytes(), 3..9, "foobarblah".as_bytes(), 3..10, eq),
        4
    );
}

#[test]
fn test_common_suffix_len() {
    let eq = |a: &u8, b: &u8| a == b;
    assert_eq!(
        common_suffix_len("".as_bytes(), 0..0, "".as_bytes(), 0..0, eq),
        0
    );
    assert_eq!(
        common_suffix_len("1234".as_bytes(), 0..4, "X0001234".as_bytes(), 0..8, eq),
        4
    );
    assert_eq!(
        common_suffix_len("1234".as_bytes(), 0..4, "Xxxx".as_bytes(), 0..4, eq),
        0
    );
    assert_eq!(
        common_suffix_len("1234".as_bytes(), 2..4, "01234".as_bytes(), 2..5, eq),
        2
    );
}

#[test]
fn test_inverted_ranges_are_empty() {
    let eq = |a: &u8, b: &u8| a == b;
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = 3..1;
    assert_eq!(
        common_prefix_len("aaaa".as_bytes(), inverted.clone(), "aaaa".as_bytes(), 0..4, eq),
        0
    );
    assert_eq!(
        common_suffix_len("aaaa".as_bytes(), 0..4, "aaaa".as_bytes(), inverted, eq),
        0
    );
}

#[test]
fn test_custom_equality() {
    let eq = |a: &u8, b: &u8| a.eq_ignore_ascii_case(b);
    assert_eq!(
        common_prefix_len("FooBar".as_bytes(), 0..6, "foobaz".as_bytes(), 0..6, eq),
        5
    );
    assert_eq!(
        common_suffix_len("xBAR".as_bytes(), 0..4, "ybar".as_bytes(), 0..4, eq),
        3
    );
}
