use std::fmt;
use std::ops::{Index, Range};
use std::slice;

use crate::error::{Error, Result};

/// A read-only view over a contiguous range of a sequence.
///
/// A window never copies the elements it covers.  It remembers where it
/// starts in the sequence it was originally created from so that positions
/// reported by a diff can be mapped back, and it can be narrowed further with
/// [`sub_window`](Self::sub_window) at no cost.
///
/// ```rust
/// use differences::Window;
///
/// let items = ["a", "b", "c", "d"];
/// let window = Window::new(&items, 1, 3).unwrap();
/// assert_eq!(window.as_slice(), &["b", "c", "d"]);
/// let inner = window.sub_window(1, 1).unwrap();
/// assert_eq!(inner[0], "c");
/// assert_eq!(inner.offset(), 2);
/// ```
pub struct Window<'a, T> {
    items: &'a [T],
    offset: usize,
}

impl<'a, T> Window<'a, T> {
    /// Creates a window over `source[offset..offset + len]`.
    pub fn new(source: &'a [T], offset: usize, len: usize) -> Result<Window<'a, T>> {
        let end = Error::check_range(offset, len, source.len())?;
        Ok(Window {
            items: &source[offset..end],
            offset,
        })
    }

    /// Creates a window over a range of `source`.
    pub fn from_range(source: &'a [T], range: Range<usize>) -> Result<Window<'a, T>> {
        if range.end < range.start {
            return Err(Error::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        Window::new(source, range.start, range.end - range.start)
    }

    /// Creates a window spanning all of `source`.
    pub fn full(source: &'a [T]) -> Window<'a, T> {
        Window {
            items: source,
            offset: 0,
        }
    }

    /// Position of the first element in the original sequence.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of elements in the window.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` if the window covers no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The covered range in the original sequence.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.items.len()
    }

    /// Returns the element at `index` relative to the window start.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index)
    }

    /// The covered elements as a slice borrowed from the original sequence.
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    /// Iterates over the covered elements.
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.items.iter()
    }

    /// Narrows the window to `len` elements starting at `start`.
    ///
    /// `start` is relative to this window, not to the original sequence.
    pub fn sub_window(&self, start: usize, len: usize) -> Result<Window<'a, T>> {
        let end = Error::check_range(start, len, self.items.len())?;
        Ok(Window {
            items: &self.items[start..end],
            offset: self.offset + start,
        })
    }

    /// Like [`sub_window`](Self::sub_window) for ranges the caller already
    /// proved to be in bounds.
    pub(crate) fn slice(&self, range: Range<usize>) -> Window<'a, T> {
        Window {
            offset: self.offset + range.start,
            items: &self.items[range],
        }
    }
}

impl<'a, T> Clone for Window<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Window<'a, T> {}

impl<'a, T> Index<usize> for Window<'a, T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for Window<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, 'w, T> IntoIterator for &'w Window<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, 'b, T, U> PartialEq<Window<'b, U>> for Window<'a, T>
where
    T: PartialEq<U>,
{
    /// Windows compare by their elements, not by their position.
    fn eq(&self, other: &Window<'b, U>) -> bool {
        self.items == other.items
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for Window<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("offset", &self.offset)
            .field("items", &self.items)
            .finish()
    }
}

#[test]
fn test_new() {
    let items = [1, 2, 3, 4, 5];
    let window = Window::new(&items, 1, 3).unwrap();
    assert_eq!(window.len(), 3);
    assert_eq!(window.offset(), 1);
    assert_eq!(window.range(), 1..4);
    assert_eq!(window.as_slice(), &[2, 3, 4]);
    assert_eq!(window[0], 2);
    assert_eq!(window.get(3), None);

    let empty = Window::new(&items, 5, 0).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.range(), 5..5);
}

#[test]
fn test_out_of_range() {
    let items = [1, 2, 3];
    assert_eq!(
        Window::new(&items, 2, 2).unwrap_err(),
        Error::OutOfRange {
            offset: 2,
            len: 2,
            available: 3
        }
    );
    assert!(Window::new(&items, 4, 0).is_err());
    assert!(Window::from_range(&items, 1..4).is_err());
    #[allow(clippy::reversed_empty_ranges)]
    let inverted = Window::from_range(&items, 2..1);
    assert_eq!(inverted.unwrap_err(), Error::Inverted { start: 2, end: 1 });
}

#[test]
fn test_sub_window() {
    let items = ['a', 'b', 'c', 'd', 'e'];
    let window = Window::new(&items, 1, 4).unwrap();
    let sub = window.sub_window(1, 2).unwrap();
    assert_eq!(sub.as_slice(), &['c', 'd']);
    assert_eq!(sub.offset(), 2);
    assert_eq!(sub.iter().collect::<String>(), "cd");
    assert!(window.sub_window(3, 2).is_err());
    assert!(window.sub_window(4, 0).unwrap().is_empty());
}

#[test]
fn test_eq_ignores_position() {
    let a = [1, 2, 1, 2];
    let left = Window::new(&a, 0, 2).unwrap();
    let right = Window::new(&a, 2, 2).unwrap();
    assert_eq!(left, right);
    assert_ne!(left, Window::new(&a, 1, 2).unwrap());
}
