//! The low level diff algorithm.
//!
//! The implementation in this module exposes the most generic bounds
//! possible.  Most of the time you want the higher level
//! [`Differences`](crate::Differences) type instead, but direct access can be
//! useful when the compared items are not stored in a slice or when the
//! result should be streamed somewhere rather than collected.
//!
//! The algorithm does not report the values it compares, only their indexes,
//! through a [`DiffHook`].  [`Capture`] is a hook that simply records the
//! reported [`DiffOp`]s.

// general traits and utilities
mod capture;
mod hook;
pub mod utils;

pub use capture::*;
pub use hook::*;

// the actual diffing algorithm
pub mod myers;
