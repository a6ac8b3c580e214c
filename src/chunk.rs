use std::fmt;
use std::ops::Range;

use crate::algorithms::{ChangeTag, DiffOp};
use crate::window::Window;

/// One contiguous run in the alignment of two sequences.
///
/// A chunk comes in one of three shapes, reported by [`tag`](Self::tag):
///
/// * [`ChangeTag::Equal`]: both sides are present, have the same length and
///   are pairwise equal.
/// * [`ChangeTag::Delete`]: only the old side is present.
/// * [`ChangeTag::Insert`]: only the new side is present.
///
/// A side that is not present is reported as `None` by
/// [`old_window`](Self::old_window) and [`new_window`](Self::new_window).  It
/// still has a position though, which is what [`old_range`](Self::old_range)
/// and [`new_range`](Self::new_range) return as an empty range.
pub struct Chunk<'a, T> {
    tag: ChangeTag,
    old: Window<'a, T>,
    new: Window<'a, T>,
}

impl<'a, T> Chunk<'a, T> {
    pub(crate) fn new(tag: ChangeTag, old: Window<'a, T>, new: Window<'a, T>) -> Chunk<'a, T> {
        debug_assert!(match tag {
            ChangeTag::Equal => old.len() == new.len() && !old.is_empty(),
            ChangeTag::Delete => new.is_empty() && !old.is_empty(),
            ChangeTag::Insert => old.is_empty() && !new.is_empty(),
        });
        Chunk { tag, old, new }
    }

    /// Returns the kind of the chunk.
    pub fn tag(&self) -> ChangeTag {
        self.tag
    }

    /// The run taken from the old sequence, unless this is an insertion.
    pub fn old_window(&self) -> Option<Window<'a, T>> {
        match self.tag {
            ChangeTag::Insert => None,
            ChangeTag::Equal | ChangeTag::Delete => Some(self.old),
        }
    }

    /// The run taken from the new sequence, unless this is a deletion.
    pub fn new_window(&self) -> Option<Window<'a, T>> {
        match self.tag {
            ChangeTag::Delete => None,
            ChangeTag::Equal | ChangeTag::Insert => Some(self.new),
        }
    }

    /// The run that carries the values, preferring the new side.
    pub fn values(&self) -> Window<'a, T> {
        match self.tag {
            ChangeTag::Delete => self.old,
            ChangeTag::Equal | ChangeTag::Insert => self.new,
        }
    }

    /// Position of the chunk in the original old sequence.
    pub fn old_range(&self) -> Range<usize> {
        self.old.range()
    }

    /// Position of the chunk in the original new sequence.
    pub fn new_range(&self) -> Range<usize> {
        self.new.range()
    }

    /// The number of items in the chunk.
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Chunks produced by a diff are never empty.
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Converts the chunk into the equivalent [`DiffOp`].
    pub fn as_diff_op(&self) -> DiffOp {
        match self.tag {
            ChangeTag::Equal => DiffOp::Equal {
                old_index: self.old.offset(),
                new_index: self.new.offset(),
                len: self.old.len(),
            },
            ChangeTag::Delete => DiffOp::Delete {
                old_index: self.old.offset(),
                old_len: self.old.len(),
                new_index: self.new.offset(),
            },
            ChangeTag::Insert => DiffOp::Insert {
                old_index: self.old.offset(),
                new_index: self.new.offset(),
                new_len: self.new.len(),
            },
        }
    }
}

impl<'a, T> Clone for Chunk<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Chunk<'a, T> {}

impl<'a, 'b, T, U> PartialEq<Chunk<'b, U>> for Chunk<'a, T>
where
    T: PartialEq<U>,
{
    /// Chunks compare by shape and values, not by position.
    fn eq(&self, other: &Chunk<'b, U>) -> bool {
        self.tag == other.tag && self.old == other.old && self.new == other.new
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Chunk<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("tag", &self.tag)
            .field("old", &self.old_window().map(|w| w.as_slice()))
            .field("new", &self.new_window().map(|w| w.as_slice()))
            .finish()
    }
}

impl<'a, T: fmt::Display> fmt::Display for Chunk<'a, T> {
    /// Renders the chunk as a single line.
    ///
    /// The line starts with the diff marker (`+`, `-` or a space) and a
    /// space, followed by the comma separated values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.tag)?;
        for (idx, value) in self.values().iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn window<T>(items: &[T], range: Range<usize>) -> Window<'_, T> {
    Window::from_range(items, range).unwrap()
}

#[test]
fn test_shapes() {
    let old = ["a", "b", "c"];
    let new = ["a", "x"];

    let equal = Chunk::new(ChangeTag::Equal, window(&old, 0..1), window(&new, 0..1));
    assert_eq!(equal.old_window().unwrap().as_slice(), &["a"]);
    assert_eq!(equal.new_window().unwrap().as_slice(), &["a"]);
    assert_eq!(equal.len(), 1);

    let delete = Chunk::new(ChangeTag::Delete, window(&old, 1..3), window(&new, 1..1));
    assert!(delete.new_window().is_none());
    assert_eq!(delete.old_range(), 1..3);
    assert_eq!(delete.new_range(), 1..1);
    assert_eq!(delete.values().as_slice(), &["b", "c"]);

    let insert = Chunk::new(ChangeTag::Insert, window(&old, 3..3), window(&new, 1..2));
    assert!(insert.old_window().is_none());
    assert_eq!(
        insert.as_diff_op(),
        DiffOp::Insert {
            old_index: 3,
            new_index: 1,
            new_len: 1
        }
    );
}

#[test]
fn test_display() {
    let old = [1, 2, 3];
    let new = [4];
    let delete = Chunk::new(ChangeTag::Delete, window(&old, 0..3), window(&new, 0..0));
    let insert = Chunk::new(ChangeTag::Insert, window(&old, 3..3), window(&new, 0..1));
    assert_eq!(delete.to_string(), "- 1,2,3");
    assert_eq!(insert.to_string(), "+ 4");
    let equal = Chunk::new(ChangeTag::Equal, window(&old, 0..1), window(&old, 0..1));
    assert_eq!(equal.to_string(), "  1");
}
