use std::convert::Infallible;
use std::ops::{Index, Range};

use crate::algorithms::{myers, Capture, DiffOp};

/// Creates a diff between old and new capturing the ops.
///
/// This is like [`myers::diff`] but instead of using an arbitrary hook
/// this will always use [`Capture`] and return the captured [`DiffOp`]s.
pub fn capture_diff<Old, New>(
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Vec<DiffOp>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    New::Output: PartialEq<Old::Output>,
{
    let mut d = Capture::new();
    let result: Result<(), Infallible> = myers::diff(&mut d, old, old_range, new, new_range);
    match result {
        Ok(()) => d.into_ops(),
        Err(never) => match never {},
    }
}

/// Creates a diff between two slices capturing the ops.
pub fn capture_diff_slices<T>(old: &[T], new: &[T]) -> Vec<DiffOp>
where
    T: PartialEq,
{
    capture_diff(old, 0..old.len(), new, 0..new.len())
}

/// Return a measure of similarity in the range `0..=1`.
///
/// A ratio of `1.0` means the two sequences are a complete match, a
/// ratio of `0.0` would indicate completely distinct sequences.  The input
/// is the sequence of diff operations and the length of the old and new
/// sequence.
pub fn get_diff_ratio(ops: &[DiffOp], old_len: usize, new_len: usize) -> f32 {
    let matches = ops
        .iter()
        .map(|op| {
            if let DiffOp::Equal { len, .. } = *op {
                len
            } else {
                0
            }
        })
        .sum::<usize>();
    let len = old_len + new_len;
    if len == 0 {
        1.0
    } else {
        2.0 * matches as f32 / len as f32
    }
}

#[test]
fn test_capture_diff_slices() {
    let ops = capture_diff_slices(&[1, 2, 3, 4], &[1, 3, 4, 5]);
    assert_eq!(
        ops,
        vec![
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1
            },
            DiffOp::Delete {
                old_index: 1,
                old_len: 1,
                new_index: 1
            },
            DiffOp::Equal {
                old_index: 2,
                new_index: 1,
                len: 2
            },
            DiffOp::Insert {
                old_index: 4,
                new_index: 3,
                new_len: 1
            },
        ]
    );
}

#[test]
fn test_capture_diff_mixed_types() {
    let old = vec![String::from("a"), String::from("b")];
    let new = ["a", "c"];
    let ops = capture_diff(&old, 0..2, &new[..], 0..2);
    assert_eq!(ops.len(), 3);
    assert_eq!(get_diff_ratio(&ops, 2, 2), 0.5);
}

#[test]
fn test_get_diff_ratio() {
    assert_eq!(get_diff_ratio(&[], 0, 0), 1.0);
    let ops = capture_diff_slices(&["a", "b"], &["a", "b"]);
    assert_eq!(get_diff_ratio(&ops, 2, 2), 1.0);
    let ops = capture_diff_slices(&["a", "b"], &["c", "d"]);
    assert_eq!(get_diff_ratio(&ops, 2, 2), 0.0);
}
