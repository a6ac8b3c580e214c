//! Error types.
//!
//! Diffing itself cannot fail.  The only errors surface while selecting the
//! windows that are compared, before the algorithm runs.
use thiserror::Error;

/// Alias for results returned by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised when building a [`Window`](crate::Window).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The requested range does not fit the underlying sequence.
    #[error(
        "range {offset}..{} is out of bounds for a sequence of length {available}",
        range_end(.offset, .len)
    )]
    OutOfRange {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// `offset + len` does not fit into `usize`.
    #[error("range starting at {offset} with length {len} overflows")]
    Overflow { offset: usize, len: usize },

    /// A range ends before it starts.
    #[error("range {start}..{end} ends before it starts")]
    Inverted { start: usize, end: usize },
}

fn range_end(offset: &usize, len: &usize) -> usize {
    offset.saturating_add(*len)
}

impl Error {
    /// Checks that `offset..offset + len` lies within `0..available`.
    pub(crate) fn check_range(offset: usize, len: usize, available: usize) -> Result<usize> {
        let end = offset
            .checked_add(len)
            .ok_or(Error::Overflow { offset, len })?;
        if end > available {
            return Err(Error::OutOfRange {
                offset,
                len,
                available,
            });
        }
        Ok(end)
    }
}

#[test]
fn test_check_range() {
    assert_eq!(Error::check_range(0, 0, 0), Ok(0));
    assert_eq!(Error::check_range(2, 3, 5), Ok(5));
    assert_eq!(
        Error::check_range(2, 4, 5),
        Err(Error::OutOfRange {
            offset: 2,
            len: 4,
            available: 5
        })
    );
    assert_eq!(
        Error::check_range(usize::MAX, 1, 5),
        Err(Error::Overflow {
            offset: usize::MAX,
            len: 1
        })
    );
}

#[test]
fn test_messages() {
    let err = Error::OutOfRange {
        offset: 3,
        len: 4,
        available: 5,
    };
    assert_eq!(
        err.to_string(),
        "range 3..7 is out of bounds for a sequence of length 5"
    );
}

#[test]
fn test_message_near_usize_max() {
    let err = Error::OutOfRange {
        offset: usize::MAX - 1,
        len: 5,
        available: 3,
    };
    assert_eq!(
        err.to_string(),
        format!(
            "range {}..{} is out of bounds for a sequence of length 3",
            usize::MAX - 1,
            usize::MAX
        )
    );
}
