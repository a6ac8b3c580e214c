use std::convert::Infallible;
use std::fmt;
use std::ops::Range;

use crate::algorithms::hook::DiffHook;

/// The kind of change a [`DiffOp`] or [`Chunk`](crate::Chunk) describes.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ChangeTag {
    /// The run is present in both versions.
    Equal,
    /// The run only exists in the old version.
    Delete,
    /// The run only exists in the new version.
    Insert,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ChangeTag::Equal => " ",
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
        })
    }
}

/// Utility enum to capture a diff operation.
///
/// This is used by [`Capture`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "op", rename_all = "lowercase")
)]
pub enum DiffOp {
    /// A segment is equal (see [`DiffHook::equal`])
    Equal {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
    /// A segment was deleted (see [`DiffHook::delete`])
    Delete {
        old_index: usize,
        old_len: usize,
        new_index: usize,
    },
    /// A segment was inserted (see [`DiffHook::insert`])
    Insert {
        old_index: usize,
        new_index: usize,
        new_len: usize,
    },
}

impl DiffOp {
    /// Returns the tag of the operation.
    pub fn tag(&self) -> ChangeTag {
        match *self {
            DiffOp::Equal { .. } => ChangeTag::Equal,
            DiffOp::Delete { .. } => ChangeTag::Delete,
            DiffOp::Insert { .. } => ChangeTag::Insert,
        }
    }

    /// Returns the old range.
    ///
    /// Insertions yield an empty range at the position they apply to.
    pub fn old_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { old_index, len, .. } => old_index..old_index + len,
            DiffOp::Delete {
                old_index, old_len, ..
            } => old_index..old_index + old_len,
            DiffOp::Insert { old_index, .. } => old_index..old_index,
        }
    }

    /// Returns the new range.
    ///
    /// Deletions yield an empty range at the position they line up with.
    pub fn new_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { new_index, len, .. } => new_index..new_index + len,
            DiffOp::Delete { new_index, .. } => new_index..new_index,
            DiffOp::Insert {
                new_index, new_len, ..
            } => new_index..new_index + new_len,
        }
    }
}

/// A [`DiffHook`] that captures all diff operations.
#[derive(Default, Clone)]
pub struct Capture(Vec<DiffOp>);

impl Capture {
    /// Creates a new capture hook.
    pub fn new() -> Capture {
        Capture::default()
    }

    /// Converts the capture hook into a vector of ops.
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.0
    }

    /// Accesses the captured operations.
    pub fn ops(&self) -> &[DiffOp] {
        &self.0
    }
}

impl DiffHook for Capture {
    type Error = Infallible;

    fn equal(&mut self, old: Range<usize>, new: Range<usize>) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Equal {
            old_index: old.start,
            new_index: new.start,
            len: old.len(),
        });
        Ok(())
    }

    fn delete(&mut self, old: Range<usize>, new_index: usize) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Delete {
            old_index: old.start,
            old_len: old.len(),
            new_index,
        });
        Ok(())
    }

    fn insert(&mut self, old_index: usize, new: Range<usize>) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Insert {
            old_index,
            new_index: new.start,
            new_len: new.len(),
        });
        Ok(())
    }
}

#[test]
fn test_op_ranges() {
    let op = DiffOp::Delete {
        old_index: 3,
        old_len: 2,
        new_index: 1,
    };
    assert_eq!(op.tag(), ChangeTag::Delete);
    assert_eq!(op.old_range(), 3..5);
    assert_eq!(op.new_range(), 1..1);

    let op = DiffOp::Insert {
        old_index: 4,
        new_index: 0,
        new_len: 3,
    };
    assert_eq!(op.old_range(), 4..4);
    assert_eq!(op.new_range(), 0..3);
}

#[test]
fn test_capture() {
    let mut d = Capture::new();
    d.equal(0..2, 0..2).unwrap();
    d.delete(2..3, 2).unwrap();
    d.insert(3, 2..4).unwrap();
    assert_eq!(
        d.ops(),
        &[
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 2
            },
            DiffOp::Delete {
                old_index: 2,
                old_len: 1,
                new_index: 2
            },
            DiffOp::Insert {
                old_index: 3,
                new_index: 2,
                new_len: 2
            },
        ]
    );
}

#[test]
fn test_tag_display() {
    let rendered = [ChangeTag::Equal, ChangeTag::Delete, ChangeTag::Insert]
        .iter()
        .map(|tag| tag.to_string())
        .collect::<Vec<_>>();
    assert_eq!(rendered, vec![" ", "-", "+"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde() {
    let op = DiffOp::Insert {
        old_index: 1,
        new_index: 2,
        new_len: 3,
    };
    let json = serde_json::to_string(&op).unwrap();
    assert_eq!(
        json,
        r#"{"op":"insert","old_index":1,"new_index":2,"new_len":3}"#
    );
    assert_eq!(serde_json::from_str::<DiffOp>(&json).unwrap(), op);
    assert_eq!(
        serde_json::to_string(&ChangeTag::Delete).unwrap(),
        r#""delete""#
    );
}
