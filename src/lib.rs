//! This crate computes the differences between two sequences.  It implements
//! Myers' `O(ND)` diff algorithm in its linear space variant, and groups the
//! resulting edit script into chunks of equal, deleted and inserted items.
//!
//! ```rust
//! use differences::Differences;
//!
//! let old = ["a", "b", "c"];
//! let new = ["a", "x", "c"];
//! let diff = Differences::from_slices(&old, &new);
//! print!("{}", diff);
//! ```
//!
//! The crate is split into two levels:
//!
//! * [`Differences`]: the diff of two sequences as an ordered list of
//!   [`Chunk`]s.  Every chunk is either a run of equal items present in both
//!   sequences, a run deleted from the old sequence, or a run inserted into the
//!   new one.  Chunks hand out [`Window`]s, which are views into the original
//!   sequences rather than copies.
//! * [`algorithms`]: the algorithm itself, driving a [`DiffHook`] with the
//!   positions of the changes.  It works on anything indexable and is useful
//!   when the values do not live in a slice or the result should not be
//!   collected.
//!
//! # Comparing items
//!
//! By default items are compared with [`PartialEq`].  All entry points have a
//! variant taking an equality function instead, for instance
//! [`Differences::with_comparison`] or [`DiffConfig::diff_by`]:
//!
//! ```rust
//! use differences::Differences;
//!
//! let old = ["Foo", "bar"];
//! let new = ["foo", "BAR"];
//! let diff = Differences::configure()
//!     .diff_by(&old, &new, |a, b| a.eq_ignore_ascii_case(b))
//!     .unwrap();
//! assert!(diff.is_identical());
//! ```
//!
//! # Optional Features
//!
//! * `serde`: derives `Serialize` and `Deserialize` for [`DiffOp`] and
//!   [`ChangeTag`].

pub mod algorithms;
mod chunk;
mod common;
mod differences;
mod error;
mod window;

pub use self::algorithms::{ChangeTag, DiffHook, DiffOp};
pub use self::chunk::Chunk;
pub use self::common::*;
pub use self::differences::{DiffConfig, Differences};
pub use self::error::{Error, Result};
pub use self::window::Window;
