//! Myers' diff algorithm with the linear space refinement.
//!
//! * time: `O((N+M)D)`
//! * space `O(N+M)`
//!
//! See [the original article by Eugene W. Myers](http://www.xmailserver.org/diff2.pdf)
//! describing it.
//!
//! The algorithm does not record the edit paths it explores.  Instead it
//! repeatedly searches for the middle snake of a region from both ends at
//! once, splits the region there and continues with the two halves.  Every
//! item that ends up outside the common subsequence gets a mark, and the
//! marks are finally turned into runs of equal, deleted and inserted items.
//!
//! Regions are kept on an explicit work stack rather than the call stack, and
//! the two search vectors are allocated once per diff.

use std::ops::{Index, IndexMut, Range};

use crate::algorithms::utils::{common_prefix_len, common_suffix_len};
use crate::algorithms::DiffHook;

/// Myers' diff algorithm.
///
/// Diff `old`, between indices `old_range` and `new` between indices `new_range`.
pub fn diff<Old, New, D>(
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    New::Output: PartialEq<Old::Output>,
{
    diff_by(d, old, old_range, new, new_range, |o, n| n == o)
}

/// Myers' diff algorithm with a custom equality function.
///
/// `eq` is called with an item from `old` and an item from `new` and decides
/// whether the two can be paired up.
///
/// ```rust
/// use differences::algorithms::{myers, Capture, DiffOp};
///
/// let old = ["Foo", "bar"];
/// let new = ["foo", "BAR", "baz"];
/// let mut d = Capture::new();
/// myers::diff_by(&mut d, &old, 0..2, &new, 0..3, |a: &&str, b: &&str| {
///     a.eq_ignore_ascii_case(b)
/// })
/// .unwrap();
/// assert_eq!(d.ops(), &[
///     DiffOp::Equal { old_index: 0, new_index: 0, len: 2 },
///     DiffOp::Insert { old_index: 2, new_index: 2, new_len: 1 },
/// ]);
/// ```
pub fn diff_by<Old, New, D, F>(
    d: &mut D,
    old: &Old,
    old_range: Range<usize>,
    new: &New,
    new_range: Range<usize>,
    eq: F,
) -> Result<(), D::Error>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    D: DiffHook,
    F: FnMut(&Old::Output, &New::Output) -> bool,
{
    let old_start = old_range.start;
    let new_start = new_range.start;
    let marks = Marks::compute(old, old_range, new, new_range, eq);
    marks.replay(d, old_start, new_start)?;
    d.finish()
}

/// Shortcut for diffing slices.
pub fn diff_slices<D, T>(d: &mut D, old: &[T], new: &[T]) -> Result<(), D::Error>
where
    D: DiffHook,
    T: PartialEq,
{
    diff(d, old, 0..old.len(), new, 0..new.len())
}

/// `V` holds the furthest reaching `x` for every diagonal `k` of one search
/// direction.
///
/// Diagonals can be negative, so `V` maps them into a plain vector through
/// an offset.  The offset is re-centered on every middle snake search so the
/// vector is only ever allocated once.
struct V {
    offset: isize,
    v: Vec<isize>,
}

impl V {
    fn new(size: usize) -> V {
        V {
            offset: 0,
            v: vec![0; size],
        }
    }

    /// Makes diagonal `k` land on slot `max`.
    fn center(&mut self, max: isize, k: isize) {
        self.offset = max - k;
    }
}

impl Index<isize> for V {
    type Output = isize;

    #[inline(always)]
    fn index(&self, k: isize) -> &isize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    #[inline(always)]
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// A region of the edit graph still waiting to be processed.
///
/// Bounds are relative to the start of the compared ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    lower_old: usize,
    upper_old: usize,
    lower_new: usize,
    upper_new: usize,
}

/// The compared ranges plus the equality function.
struct Lookup<'x, Old: ?Sized, New: ?Sized, F> {
    old: &'x Old,
    old_start: usize,
    new: &'x New,
    new_start: usize,
    eq: F,
}

impl<'x, Old, New, F> Lookup<'x, Old, New, F>
where
    Old: Index<usize> + ?Sized,
    New: Index<usize> + ?Sized,
    F: FnMut(&Old::Output, &New::Output) -> bool,
{
    #[inline(always)]
    fn same(&mut self, x: isize, y: isize) -> bool {
        (self.eq)(
            &self.old[self.old_start + x as usize],
            &self.new[self.new_start + y as usize],
        )
    }

    fn trim(&mut self, rect: &mut Rect) {
        let prefix = common_prefix_len(
            self.old,
            self.old_start + rect.lower_old..self.old_start + rect.upper_old,
            self.new,
            self.new_start + rect.lower_new..self.new_start + rect.upper_new,
            &mut self.eq,
        );
        rect.lower_old += prefix;
        rect.lower_new += prefix;
        let suffix = common_suffix_len(
            self.old,
            self.old_start + rect.lower_old..self.old_start + rect.upper_old,
            self.new,
            self.new_start + rect.lower_new..self.new_start + rect.upper_new,
            &mut self.eq,
        );
        rect.upper_old -= suffix;
        rect.upper_new -= suffix;
    }

    /// Finds the point where the middle snake of `rect` ends.
    ///
    /// Both the forward search (from the top left corner) and the reverse
    /// search (from the bottom right corner) advance one edit at a time until
    /// their frontiers overlap on a diagonal.  When the difference in length
    /// `delta` is odd the overlap can only be detected during the forward
    /// step, when it is even only during the reverse step.
    ///
    /// `rect` must have both sides non-empty and differ in its first and its
    /// last items.
    fn middle_snake(&mut self, rect: Rect, down: &mut V, up: &mut V) -> Option<(usize, usize)> {
        let max = down.v.len() as isize / 2 - 1;
        let lower_old = rect.lower_old as isize;
        let upper_old = rect.upper_old as isize;
        let lower_new = rect.lower_new as isize;
        let upper_new = rect.upper_new as isize;

        let down_k = lower_old - lower_new;
        let up_k = upper_old - upper_new;
        let delta = (upper_old - lower_old) - (upper_new - lower_new);
        let odd_delta = delta & 1 != 0;
        let max_d = ((upper_old - lower_old) + (upper_new - lower_new)) / 2 + 1;

        down.center(max, down_k);
        up.center(max, up_k);
        down[down_k + 1] = lower_old;
        up[up_k - 1] = upper_old;

        for d in 0..=max_d {
            // forward
            for k in (down_k - d..=down_k + d).step_by(2) {
                let mut x = if k == down_k - d {
                    down[k + 1]
                } else {
                    let right = down[k - 1] + 1;
                    if k < down_k + d && down[k + 1] >= right {
                        down[k + 1]
                    } else {
                        right
                    }
                };
                let mut y = x - k;
                while x < upper_old && y < upper_new && self.same(x, y) {
                    x += 1;
                    y += 1;
                }
                down[k] = x;

                if odd_delta && up_k - d < k && k < up_k + d && up[k] <= down[k] {
                    return Some((down[k] as usize, (down[k] - k) as usize));
                }
            }

            // reverse
            for k in (up_k - d..=up_k + d).step_by(2) {
                let mut x = if k == up_k + d {
                    up[k - 1]
                } else {
                    let left = up[k + 1] - 1;
                    if k > up_k - d && up[k - 1] < left {
                        up[k - 1]
                    } else {
                        left
                    }
                };
                let mut y = x - k;
                while x > lower_old && y > lower_new && self.same(x - 1, y - 1) {
                    x -= 1;
                    y -= 1;
                }
                up[k] = x;

                if !odd_delta && down_k - d <= k && k <= down_k + d && up[k] <= down[k] {
                    return Some((down[k] as usize, (down[k] - k) as usize));
                }
            }
        }

        None
    }
}

/// Per item change marks for both compared ranges.
///
/// `old[i]` is `true` if the `i`-th item of the old range is deleted,
/// `new[j]` is `true` if the `j`-th item of the new range is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Marks {
    pub(crate) old: Vec<bool>,
    pub(crate) new: Vec<bool>,
}

impl Marks {
    /// Runs the algorithm and marks every item outside of the longest
    /// common subsequence.
    pub(crate) fn compute<Old, New, F>(
        old: &Old,
        old_range: Range<usize>,
        new: &New,
        new_range: Range<usize>,
        eq: F,
    ) -> Marks
    where
        Old: Index<usize> + ?Sized,
        New: Index<usize> + ?Sized,
        F: FnMut(&Old::Output, &New::Output) -> bool,
    {
        let old_len = old_range.len();
        let new_len = new_range.len();
        let mut marks = Marks {
            old: vec![false; old_len],
            new: vec![false; new_len],
        };
        let mut lookup = Lookup {
            old,
            old_start: old_range.start,
            new,
            new_start: new_range.start,
            eq,
        };

        let max = old_len + new_len + 1;
        let mut down = V::new(2 * max + 2);
        let mut up = V::new(2 * max + 2);

        let mut stack = vec![Rect {
            lower_old: 0,
            upper_old: old_len,
            lower_new: 0,
            upper_new: new_len,
        }];
        let mut rects = 0usize;

        while let Some(mut rect) = stack.pop() {
            rects += 1;
            lookup.trim(&mut rect);

            if rect.lower_old == rect.upper_old {
                mark_all(&mut marks.new[rect.lower_new..rect.upper_new]);
                continue;
            }
            if rect.lower_new == rect.upper_new {
                mark_all(&mut marks.old[rect.lower_old..rect.upper_old]);
                continue;
            }

            let cut = lookup.middle_snake(rect, &mut down, &mut up);
            debug_assert!(
                matches!(cut, Some((cut_old, cut_new)) if splits(rect, cut_old, cut_new)),
                "no usable middle snake for {:?}: {:?}",
                rect,
                cut
            );
            match cut {
                Some((cut_old, cut_new)) if splits(rect, cut_old, cut_new) => {
                    tracing::trace!(?rect, cut_old, cut_new, "middle snake");
                    stack.push(Rect {
                        lower_old: cut_old,
                        upper_old: rect.upper_old,
                        lower_new: cut_new,
                        upper_new: rect.upper_new,
                    });
                    stack.push(Rect {
                        lower_old: rect.lower_old,
                        upper_old: cut_old,
                        lower_new: rect.lower_new,
                        upper_new: cut_new,
                    });
                }
                cut => {
                    // cannot happen for a trimmed region; degrade to a full
                    // replacement rather than looping forever
                    tracing::warn!(?rect, ?cut, "no usable middle snake");
                    mark_all(&mut marks.old[rect.lower_old..rect.upper_old]);
                    mark_all(&mut marks.new[rect.lower_new..rect.upper_new]);
                }
            }
        }

        tracing::trace!(rects, old_len, new_len, "marked changes");
        marks
    }

    /// Walks both mark arrays in lock step and reports the runs to `d`.
    ///
    /// Positions are reported relative to `old_start` and `new_start`.
    pub(crate) fn replay<D: DiffHook>(
        &self,
        d: &mut D,
        old_start: usize,
        new_start: usize,
    ) -> Result<(), D::Error> {
        let old_len = self.old.len();
        let new_len = self.new.len();
        let mut i = 0;
        let mut j = 0;

        while i < old_len || j < new_len {
            let start = (i, j);

            let (i0, j0) = start;
            while i < old_len && j < new_len && !self.old[i] && !self.new[j] {
                i += 1;
                j += 1;
            }
            if i > i0 {
                d.equal(old_start + i0..old_start + i, new_start + j0..new_start + j)?;
            }

            let i0 = i;
            while i < old_len && self.old[i] {
                i += 1;
            }
            if i > i0 {
                d.delete(old_start + i0..old_start + i, new_start + j)?;
            }

            let j0 = j;
            while j < new_len && self.new[j] {
                j += 1;
            }
            if j > j0 {
                d.insert(old_start + i, new_start + j0..new_start + j)?;
            }

            debug_assert!((i, j) != start, "unbalanced change marks at {}, {}", i, j);
            if (i, j) == start {
                // unmarked items remain on one side only, flush them as
                // changes so the walk terminates
                tracing::warn!(i, j, "unbalanced change marks");
                if i < old_len {
                    d.delete(old_start + i..old_start + old_len, new_start + j)?;
                    i = old_len;
                }
                if j < new_len {
                    d.insert(old_start + i, new_start + j..new_start + new_len)?;
                    j = new_len;
                }
            }
        }

        Ok(())
    }

    /// Number of deleted and inserted items.
    pub(crate) fn counts(&self) -> (usize, usize) {
        (
            self.old.iter().filter(|&&x| x).count(),
            self.new.iter().filter(|&&x| x).count(),
        )
    }
}

fn mark_all(marks: &mut [bool]) {
    for mark in marks {
        *mark = true;
    }
}

/// Checks that cutting `rect` at the given point yields two strictly
/// smaller regions.
fn splits(rect: Rect, cut_old: usize, cut_new: usize) -> bool {
    (rect.lower_old..=rect.upper_old).contains(&cut_old)
        && (rect.lower_new..=rect.upper_new).contains(&cut_new)
        && (cut_old, cut_new) != (rect.lower_old, rect.lower_new)
        && (cut_old, cut_new) != (rect.upper_old, rect.upper_new)
}

#[cfg(test)]
fn marks_for(old: &[u8], new: &[u8]) -> Marks {
    Marks::compute(old, 0..old.len(), new, 0..new.len(), |a, b| a == b)
}

#[test]
fn test_diff() {
    let a: &[usize] = &[0, 1, 2, 3, 4];
    let b: &[usize] = &[0, 1, 2, 9, 4];

    struct D(Vec<&'static str>);
    impl DiffHook for D {
        type Error = ();
        fn delete(&mut self, old: Range<usize>, new_index: usize) -> Result<(), ()> {
            assert_eq!(old, 3..4);
            assert_eq!(new_index, 3);
            self.0.push("delete");
            Ok(())
        }
        fn insert(&mut self, old_index: usize, new: Range<usize>) -> Result<(), ()> {
            assert_eq!(old_index, 4);
            assert_eq!(new, 3..4);
            self.0.push("insert");
            Ok(())
        }
        fn finish(&mut self) -> Result<(), ()> {
            self.0.push("finish");
            Ok(())
        }
    }

    let mut d = D(Vec::new());
    diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    assert_eq!(d.0, vec!["delete", "insert", "finish"]);
}

#[test]
fn test_contiguous() {
    let a: &[usize] = &[0, 1, 2, 3, 4, 4, 4, 5];
    let b: &[usize] = &[0, 1, 2, 8, 9, 4, 4, 7];
    let mut d = crate::algorithms::Capture::new();
    diff_slices(&mut d, a, b).unwrap();
    let ops = d
        .ops()
        .iter()
        .map(|op| (op.tag(), op.old_range(), op.new_range()))
        .collect::<Vec<_>>();
    use crate::ChangeTag::*;
    assert_eq!(
        ops,
        vec![
            (Equal, 0..3, 0..3),
            (Delete, 3..4, 3..3),
            (Insert, 4..4, 3..5),
            (Equal, 4..6, 5..7),
            (Delete, 6..8, 7..7),
            (Insert, 8..8, 7..8),
        ]
    );
}

#[test]
fn test_sub_ranges() {
    let a = "xxabcyy".as_bytes();
    let b = "zaXcz".as_bytes();
    let mut d = crate::algorithms::Capture::new();
    diff(&mut d, a, 2..5, b, 1..4).unwrap();
    let ops = d
        .ops()
        .iter()
        .map(|op| (op.tag(), op.old_range(), op.new_range()))
        .collect::<Vec<_>>();
    use crate::ChangeTag::*;
    assert_eq!(
        ops,
        vec![
            (Equal, 2..3, 1..2),
            (Delete, 3..4, 2..2),
            (Insert, 4..4, 2..3),
            (Equal, 4..5, 3..4),
        ]
    );
}

#[test]
fn test_middle_snake_splits() {
    let old = "abcabba".as_bytes();
    let new = "cbabac".as_bytes();
    let mut lookup = Lookup {
        old,
        old_start: 0,
        new,
        new_start: 0,
        eq: |a: &u8, b: &u8| a == b,
    };
    let max = old.len() + new.len() + 1;
    let mut down = V::new(2 * max + 2);
    let mut up = V::new(2 * max + 2);
    let rect = Rect {
        lower_old: 0,
        upper_old: old.len(),
        lower_new: 0,
        upper_new: new.len(),
    };
    let (cut_old, cut_new) = lookup.middle_snake(rect, &mut down, &mut up).unwrap();
    assert!(splits(rect, cut_old, cut_new));
}

#[test]
fn test_marks() {
    let marks = marks_for(b"abcabba", b"cbabac");
    // the classic example from the paper has an edit distance of 5
    assert_eq!(marks.counts(), (3, 2));
    assert_eq!(
        marks.old.iter().filter(|&&x| !x).count(),
        marks.new.iter().filter(|&&x| !x).count()
    );
}

#[test]
fn test_marks_minimal() {
    let marks = marks_for(b"ababa", b"babab");
    assert_eq!(marks.counts(), (1, 1));

    let marks = marks_for(b"", b"xy");
    assert_eq!(marks.counts(), (0, 2));

    let marks = marks_for(b"xy", b"");
    assert_eq!(marks.counts(), (2, 0));

    let marks = marks_for(b"abc", b"xyz");
    assert_eq!(marks.counts(), (3, 3));
}

#[test]
fn test_every_small_pair_splits_cleanly() {
    // every pair over a two letter alphabet up to length 6; the debug
    // assertions in `compute` and `replay` fire on a degenerate cut
    let inputs = (0..=6usize)
        .flat_map(|len| {
            (0..1u32 << len).map(move |bits| {
                (0..len)
                    .map(|idx| if bits & (1 << idx) != 0 { b'a' } else { b'b' })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();
    for old in &inputs {
        for new in &inputs {
            let marks = marks_for(old, new);
            let (deleted, inserted) = marks.counts();
            assert_eq!(old.len() - deleted, new.len() - inserted);
            let mut d = crate::algorithms::Capture::new();
            marks.replay(&mut d, 0, 0).unwrap();
            let covered = d.ops().iter().map(|op| op.old_range().len()).sum::<usize>();
            assert_eq!(covered, old.len());
        }
    }
}

#[test]
fn test_deletions_before_insertions() {
    let mut d = crate::algorithms::Capture::new();
    diff_slices(&mut d, &["a", "b", "c"], &["a", "x", "c"]).unwrap();
    let tags = d.ops().iter().map(|op| op.tag()).collect::<Vec<_>>();
    use crate::ChangeTag::*;
    assert_eq!(tags, vec![Equal, Delete, Insert, Equal]);
}
