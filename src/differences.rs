//! The high level diff result.
//!
//! [`Differences`] runs the diff eagerly when it is created and keeps the
//! outcome as a list of [`Chunk`]s.  Walking the chunks in order reproduces
//! both inputs: the old side of every chunk concatenated gives the old
//! sequence, the new side of every chunk gives the new sequence.
//!
//! ```rust
//! use differences::{ChangeTag, Differences};
//!
//! let old = ["a", "b", "c"];
//! let new = ["a", "x", "c"];
//! let diff = Differences::from_slices(&old, &new);
//! let tags = diff.iter().map(|chunk| chunk.tag()).collect::<Vec<_>>();
//! assert_eq!(tags, vec![
//!     ChangeTag::Equal,
//!     ChangeTag::Delete,
//!     ChangeTag::Insert,
//!     ChangeTag::Equal,
//! ]);
//! assert_eq!(diff.to_string(), "  a\n- b\n+ x\n  c\n");
//! ```
use std::convert::Infallible;
use std::fmt;
use std::ops::{Index, Range};
use std::slice;
use std::vec;

use crate::algorithms::{myers, ChangeTag, DiffHook, DiffOp};
use crate::chunk::Chunk;
use crate::common::get_diff_ratio;
use crate::error::Result;
use crate::window::Window;

/// A builder type config for more complex uses of [`Differences`].
///
/// ```rust
/// use differences::Differences;
///
/// let old = ["x", "Foo", "bar", "x"];
/// let new = ["foo", "BAR"];
/// let diff = Differences::configure()
///     .old_range(1..3)
///     .diff_by(&old, &new, |a, b| a.eq_ignore_ascii_case(b))
///     .unwrap();
/// assert!(diff.is_identical());
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiffConfig {
    old_range: Option<Range<usize>>,
    new_range: Option<Range<usize>>,
}

impl DiffConfig {
    /// Restricts the diff to a range of the old sequence.
    ///
    /// By default the whole sequence is compared.
    pub fn old_range(&mut self, range: Range<usize>) -> &mut Self {
        self.old_range = Some(range);
        self
    }

    /// Restricts the diff to a range of the new sequence.
    ///
    /// By default the whole sequence is compared.
    pub fn new_range(&mut self, range: Range<usize>) -> &mut Self {
        self.new_range = Some(range);
        self
    }

    /// Diffs two sequences comparing items with `==`.
    pub fn diff<'a, T: PartialEq>(&self, old: &'a [T], new: &'a [T]) -> Result<Differences<'a, T>> {
        self.diff_by(old, new, |a, b| a == b)
    }

    /// Diffs two sequences with a custom equality function.
    pub fn diff_by<'a, T, F>(&self, old: &'a [T], new: &'a [T], eq: F) -> Result<Differences<'a, T>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let old = select(old, self.old_range.as_ref())?;
        let new = select(new, self.new_range.as_ref())?;
        Ok(Differences::from_windows(old, new, eq))
    }
}

fn select<'a, T>(source: &'a [T], range: Option<&Range<usize>>) -> Result<Window<'a, T>> {
    match range {
        Some(range) => Window::from_range(source, range.clone()),
        None => Ok(Window::full(source)),
    }
}

/// Collects the hook callbacks of the algorithm into chunks.
///
/// The algorithm runs directly on the windows, so the reported positions are
/// relative to the window starts.
struct ChunkBuilder<'a, T> {
    old: Window<'a, T>,
    new: Window<'a, T>,
    chunks: Vec<Chunk<'a, T>>,
}

impl<'a, T> DiffHook for ChunkBuilder<'a, T> {
    type Error = Infallible;

    fn equal(&mut self, old: Range<usize>, new: Range<usize>) -> Result<(), Infallible> {
        self.chunks.push(Chunk::new(
            ChangeTag::Equal,
            self.old.slice(old),
            self.new.slice(new),
        ));
        Ok(())
    }

    fn delete(&mut self, old: Range<usize>, new_index: usize) -> Result<(), Infallible> {
        self.chunks.push(Chunk::new(
            ChangeTag::Delete,
            self.old.slice(old),
            self.new.slice(new_index..new_index),
        ));
        Ok(())
    }

    fn insert(&mut self, old_index: usize, new: Range<usize>) -> Result<(), Infallible> {
        self.chunks.push(Chunk::new(
            ChangeTag::Insert,
            self.old.slice(old_index..old_index),
            self.new.slice(new),
        ));
        Ok(())
    }
}

/// The differences between two sequences, as an ordered list of chunks.
///
/// The diff is computed in full by the constructor.  Afterwards the value
/// is immutable and can be indexed and iterated like a slice of
/// [`Chunk`]s.
pub struct Differences<'a, T> {
    old: Window<'a, T>,
    new: Window<'a, T>,
    chunks: Vec<Chunk<'a, T>>,
}

impl Differences<'static, ()> {
    /// Configures a diff.
    ///
    /// This is the same as [`DiffConfig::default`].  The item type is only
    /// picked once [`DiffConfig::diff`] or [`DiffConfig::diff_by`] is called.
    pub fn configure() -> DiffConfig {
        DiffConfig::default()
    }
}

impl<'a, T> Differences<'a, T> {
    /// Diffs `old[old_offset..old_offset + old_len]` against
    /// `new[new_offset..new_offset + new_len]`.
    ///
    /// Fails if either range does not fit its sequence.
    pub fn new(
        old: &'a [T],
        old_offset: usize,
        old_len: usize,
        new: &'a [T],
        new_offset: usize,
        new_len: usize,
    ) -> Result<Differences<'a, T>>
    where
        T: PartialEq,
    {
        Differences::with_comparison(old, old_offset, old_len, new, new_offset, new_len, |a, b| {
            a == b
        })
    }

    /// Like [`new`](Self::new) but compares items with `eq`.
    pub fn with_comparison<F>(
        old: &'a [T],
        old_offset: usize,
        old_len: usize,
        new: &'a [T],
        new_offset: usize,
        new_len: usize,
        eq: F,
    ) -> Result<Differences<'a, T>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let old = Window::new(old, old_offset, old_len)?;
        let new = Window::new(new, new_offset, new_len)?;
        Ok(Differences::from_windows(old, new, eq))
    }

    /// Diffs two complete slices.
    pub fn from_slices(old: &'a [T], new: &'a [T]) -> Differences<'a, T>
    where
        T: PartialEq,
    {
        Differences::from_windows(Window::full(old), Window::full(new), |a, b| a == b)
    }

    /// Diffs two windows comparing items with `eq`.
    pub fn from_windows<F>(old: Window<'a, T>, new: Window<'a, T>, eq: F) -> Differences<'a, T>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let _span = tracing::debug_span!("diff", old_len = old.len(), new_len = new.len()).entered();

        let mut builder = ChunkBuilder {
            old,
            new,
            chunks: Vec::new(),
        };
        let result = myers::diff_by(&mut builder, &old, 0..old.len(), &new, 0..new.len(), eq);
        if let Err(never) = result {
            match never {}
        }

        let rv = Differences {
            old,
            new,
            chunks: builder.chunks,
        };
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                chunks = rv.chunks.len(),
                deleted = rv.count(ChangeTag::Delete),
                inserted = rv.count(ChangeTag::Insert),
                "diff complete"
            );
        }
        rv
    }

    /// The compared range of the old sequence.
    pub fn old_window(&self) -> Window<'a, T> {
        self.old
    }

    /// The compared range of the new sequence.
    pub fn new_window(&self) -> Window<'a, T> {
        self.new
    }

    /// The number of chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// `true` if there are no chunks, which only happens when both compared
    /// ranges are empty.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns the chunk at `index`.
    pub fn get(&self, index: usize) -> Option<&Chunk<'a, T>> {
        self.chunks.get(index)
    }

    /// All chunks as a slice.
    pub fn chunks(&self) -> &[Chunk<'a, T>] {
        &self.chunks
    }

    /// Iterates over the chunks in order.
    pub fn iter(&self) -> slice::Iter<'_, Chunk<'a, T>> {
        self.chunks.iter()
    }

    /// `true` if both compared ranges hold equal items.
    pub fn is_identical(&self) -> bool {
        self.chunks
            .iter()
            .all(|chunk| chunk.tag() == ChangeTag::Equal)
    }

    /// Returns the chunks as [`DiffOp`]s.
    ///
    /// Indices in the ops refer to the original sequences, not to the
    /// compared ranges.
    pub fn ops(&self) -> Vec<DiffOp> {
        self.chunks.iter().map(|chunk| chunk.as_diff_op()).collect()
    }

    /// Return a measure of similarity in the range `0..=1`.
    ///
    /// See [`get_diff_ratio`].
    pub fn ratio(&self) -> f32 {
        get_diff_ratio(&self.ops(), self.old.len(), self.new.len())
    }

    /// Feeds the chunks to a [`DiffHook`].
    ///
    /// The hook sees the same calls, in the same order, as it would from
    /// running [`myers::diff`] on the original sequences.
    pub fn replay<D: DiffHook>(&self, d: &mut D) -> Result<(), D::Error> {
        for chunk in &self.chunks {
            match chunk.tag() {
                ChangeTag::Equal => d.equal(chunk.old_range(), chunk.new_range())?,
                ChangeTag::Delete => d.delete(chunk.old_range(), chunk.new_range().start)?,
                ChangeTag::Insert => d.insert(chunk.old_range().start, chunk.new_range())?,
            }
        }
        d.finish()
    }

    fn count(&self, tag: ChangeTag) -> usize {
        self.chunks
            .iter()
            .filter(|chunk| chunk.tag() == tag)
            .map(|chunk| chunk.len())
            .sum()
    }
}

impl<'a, T> Index<usize> for Differences<'a, T> {
    type Output = Chunk<'a, T>;

    fn index(&self, index: usize) -> &Chunk<'a, T> {
        &self.chunks[index]
    }
}

impl<'d, 'a, T> IntoIterator for &'d Differences<'a, T> {
    type Item = &'d Chunk<'a, T>;
    type IntoIter = slice::Iter<'d, Chunk<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

impl<'a, T> IntoIterator for Differences<'a, T> {
    type Item = Chunk<'a, T>;
    type IntoIter = vec::IntoIter<Chunk<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Differences<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.chunks).finish()
    }
}

impl<'a, T: fmt::Display> fmt::Display for Differences<'a, T> {
    /// Renders one line per chunk.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            writeln!(f, "{}", chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use crate::algorithms::Capture;

#[test]
fn test_scenarios() {
    let diff = Differences::from_slices(&["a", "b", "c"], &["a", "b", "c"]);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].tag(), ChangeTag::Equal);
    assert_eq!(diff[0].len(), 3);

    let diff = Differences::from_slices(&[], &["x", "y"]);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].tag(), ChangeTag::Insert);
    assert!(diff[0].old_window().is_none());

    let diff = Differences::from_slices(&["x", "y"], &[]);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].tag(), ChangeTag::Delete);
    assert!(diff[0].new_window().is_none());

    let diff = Differences::<u8>::from_slices(&[], &[]);
    assert!(diff.is_empty());
    assert!(diff.is_identical());
}

#[test]
fn test_render() {
    let old = "quick brown fox jumps".split(' ').collect::<Vec<_>>();
    let new = "slow brown cat fox leaps".split(' ').collect::<Vec<_>>();
    let diff = Differences::from_slices(&old, &new);
    insta::assert_snapshot!(diff.to_string(), @r###"
    - quick
    + slow
      brown
    + cat
      fox
    - jumps
    + leaps
    "###);
}

#[test]
fn test_new_with_ranges() {
    let old = [0, 1, 2, 3, 4, 5];
    let new = [9, 1, 7, 3, 9];
    let diff = Differences::new(&old, 1, 3, &new, 1, 3).unwrap();
    assert_eq!(diff.old_window().range(), 1..4);
    assert_eq!(
        diff.ops(),
        vec![
            DiffOp::Equal {
                old_index: 1,
                new_index: 1,
                len: 1
            },
            DiffOp::Delete {
                old_index: 2,
                old_len: 1,
                new_index: 2
            },
            DiffOp::Insert {
                old_index: 3,
                new_index: 2,
                new_len: 1
            },
            DiffOp::Equal {
                old_index: 3,
                new_index: 3,
                len: 1
            },
        ]
    );

    assert!(Differences::new(&old, 4, 3, &new, 0, 1).is_err());
    assert!(Differences::new(&old, 0, 1, &new, 5, 1).is_err());
}

#[test]
fn test_with_comparison() {
    let old = ["Hello", "World"];
    let new = ["hello", "world", "!"];
    let diff = Differences::with_comparison(&old, 0, 2, &new, 0, 3, |a, b| {
        a.eq_ignore_ascii_case(b)
    })
    .unwrap();
    assert_eq!(diff.len(), 2);
    assert_eq!(diff[0].old_window().unwrap().as_slice(), &["Hello", "World"]);
    assert_eq!(diff[0].new_window().unwrap().as_slice(), &["hello", "world"]);
    assert_eq!(diff[1].tag(), ChangeTag::Insert);
}

#[test]
fn test_configure() {
    let old = [1, 2, 3, 4];
    let new = [0, 2, 3, 5];
    let diff = Differences::configure()
        .old_range(1..3)
        .new_range(1..3)
        .diff(&old, &new)
        .unwrap();
    assert!(diff.is_identical());
    assert_eq!(diff.ratio(), 1.0);

    let err = Differences::configure()
        .old_range(2..9)
        .diff(&old, &new)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "range 2..9 is out of bounds for a sequence of length 4"
    );
}

#[test]
fn test_configure_picks_item_type_late() {
    let words = Differences::configure().diff(&["a", "b"], &["a", "c"]).unwrap();
    assert_eq!(words.len(), 3);

    let numbers = Differences::configure()
        .new_range(1..2)
        .diff_by(&[2u32], &[1, 2, 3], |a, b| a == b)
        .unwrap();
    assert!(numbers.is_identical());
    assert_eq!(numbers[0].new_range(), 1..2);

    let mut config = DiffConfig::default();
    config.old_range(0..1);
    let chars = config.diff(&['x', 'y'], &['x']).unwrap();
    assert!(chars.is_identical());
}

#[test]
fn test_replay_matches_algorithm() {
    let old = "abcabba".as_bytes();
    let new = "cbabac".as_bytes();
    let diff = Differences::from_slices(old, new);

    let mut replayed = Capture::new();
    diff.replay(&mut replayed).unwrap();
    let mut direct = Capture::new();
    myers::diff_slices(&mut direct, old, new).unwrap();

    assert_eq!(replayed.ops(), direct.ops());
    assert_eq!(diff.ops(), direct.into_ops());
}

#[test]
fn test_iteration() {
    let diff = Differences::from_slices(&[1, 2, 3], &[1, 4, 3]);
    let mut old = Vec::new();
    let mut new = Vec::new();
    for chunk in &diff {
        if let Some(window) = chunk.old_window() {
            old.extend(window.iter().copied());
        }
        if let Some(window) = chunk.new_window() {
            new.extend(window.iter().copied());
        }
    }
    assert_eq!(old, vec![1, 2, 3]);
    assert_eq!(new, vec![1, 4, 3]);
    assert_eq!(diff.iter().count(), diff.len());
    assert_eq!(diff.get(diff.len()), None);
    assert_eq!(diff.into_iter().map(|chunk| chunk.len()).sum::<usize>(), 4);
}
