//! Ordered insertion into sorted sequences.
//!
//! All operations in this module assume that the sequence is allready
//! sorted in non-decreasing order. A new value is placed in front of the
//! first element that is strictly greater than the value, so equal
//! elements keep their insertion order.
//!
//! ```
//! use cowlist::ord::insert_in_order;
//!
//! let mut list = Vec::new();
//! for v in ["3", "2", "1", "3"] {
//!     insert_in_order(&mut list, v);
//! }
//! assert_eq!(list, ["1", "2", "3", "3"]);
//! ```

use std::{cmp::Ordering, collections::VecDeque};

use crate::error::{Error, Result};


/// A growable sequence that supports positional insertion.
pub trait Sequence<T> {
    /// The number of elements in the sequence.
    fn len(&self) -> usize;

    /// The element at `index`, if any.
    fn get(&self, index: usize) -> Option<&T>;

    /// Inserts `value` at `index`, shifting all later elements.
    ///
    /// # Panics
    ///
    /// May panic if `index > len`.
    fn insert(&mut self, index: usize, value: T);

    /// Whether the sequence contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence<T> for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn insert(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value);
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        VecDeque::get(self, index)
    }

    fn insert(&mut self, index: usize, value: T) {
        VecDeque::insert(self, index, value);
    }
}

/// The strategy used to locate the insertion point of a new value.
///
/// All probes yield the same index on a sorted sequence. They only differ
/// in the number of comparisons they need for a given input pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Probe {
    /// Scans from the front until an element is strictly greater than the value.
    #[default]
    Forward,
    /// Scans from the back while the elements are strictly greater than the value.
    /// Cheap for mostly ascending inputs.
    Backward,
    /// Binary search for the first element that is strictly greater than the value.
    Bisect,
}

impl Probe {
    ///
    /// Finds the index at which `value` must be inserted, comparing the value
    /// with elements using `cmp`. `cmp` returns `None` if two values
    /// cannot be compared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `cmp` returned `None` for
    /// any element visited by this probe.
    ///
    pub fn locate<S, T, F>(self, seq: &S, value: &T, mut cmp: F) -> Result<usize>
    where
        S: Sequence<T> + ?Sized,
        F: FnMut(&T, &T) -> Option<Ordering>,
    {
        let len = seq.len();
        let mut compare = |index: usize| match seq.get(index) {
            Some(element) => cmp(value, element).ok_or(Error::TypeMismatch { index }),
            None => Err(Error::OutOfBounds { index, len }),
        };

        match self {
            Self::Forward => {
                for index in 0..len {
                    if compare(index)? == Ordering::Less {
                        return Ok(index);
                    }
                }
                Ok(len)
            }
            Self::Backward => {
                let mut index = len;
                while index > 0 && compare(index - 1)? == Ordering::Less {
                    index -= 1;
                }
                Ok(index)
            }
            Self::Bisect => {
                let (mut lo, mut hi) = (0, len);
                while lo < hi {
                    let mid = lo + (hi - lo) / 2;
                    if compare(mid)? == Ordering::Less {
                        hi = mid;
                    } else {
                        lo = mid + 1;
                    }
                }
                Ok(lo)
            }
        }
    }

    /// Like [`Probe::locate`], but with a total order that cannot fail.
    pub fn locate_by<S, T, F>(self, seq: &S, value: &T, mut cmp: F) -> usize
    where
        S: Sequence<T> + ?Sized,
        F: FnMut(&T, &T) -> Ordering,
    {
        match self.locate(seq, value, |a, b| Some(cmp(a, b))) {
            Ok(index) => index,
            Err(_) => unreachable!("a total order never yields incomparable elements"),
        }
    }
}

/// Returns the index at which `value` would be inserted by [`insert_in_order_with`].
pub fn insertion_point<S, T>(seq: &S, value: &T, probe: Probe) -> usize
where
    S: Sequence<T> + ?Sized,
    T: Ord,
{
    probe.locate_by(seq, value, Ord::cmp)
}

///
/// Inserts `value` into the sorted sequence `seq`, behind all
/// elements that are less than or equal to `value`.
/// Returns the index the value was inserted at.
///
/// # Complexity
///
/// O(n) comparisons and O(n) moves.
///
pub fn insert_in_order<S, T>(seq: &mut S, value: T) -> usize
where
    S: Sequence<T> + ?Sized,
    T: Ord,
{
    insert_in_order_with(seq, value, Probe::Forward)
}

/// Inserts `value` in order, locating the position with the given probe.
pub fn insert_in_order_with<S, T>(seq: &mut S, value: T, probe: Probe) -> usize
where
    S: Sequence<T> + ?Sized,
    T: Ord,
{
    let index = insertion_point(seq, &value, probe);
    seq.insert(index, value);
    index
}

/// Inserts `value` in order, using a custom comparison function.
pub fn insert_in_order_by<S, T, F>(seq: &mut S, value: T, cmp: F) -> usize
where
    S: Sequence<T> + ?Sized,
    F: FnMut(&T, &T) -> Ordering,
{
    let index = Probe::Forward.locate_by(seq, &value, cmp);
    seq.insert(index, value);
    index
}

/// Inserts `value` in order, comparing elements by the extracted key.
pub fn insert_in_order_by_key<S, T, K, F>(seq: &mut S, value: T, mut key: F) -> usize
where
    S: Sequence<T> + ?Sized,
    K: Ord,
    F: FnMut(&T) -> K,
{
    insert_in_order_by(seq, value, |a, b| key(a).cmp(&key(b)))
}

///
/// Inserts `value` in order into a sequence of partially ordered elements.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is incomparable with
/// an element that must be passed. The sequence is not modified in this case.
///
pub fn try_insert_in_order<S, T>(seq: &mut S, value: T) -> Result<usize>
where
    S: Sequence<T> + ?Sized,
    T: PartialOrd,
{
    let index = Probe::Forward.locate(seq, &value, PartialOrd::partial_cmp)?;
    seq.insert(index, value);
    Ok(index)
}

/// Whether the sequence is sorted in non-decreasing order.
///
/// Incomparable neighbours are considered unsorted.
pub fn is_sorted<S, T>(seq: &S) -> bool
where
    S: Sequence<T> + ?Sized,
    T: PartialOrd,
{
    (1..seq.len()).all(|i| match (seq.get(i - 1), seq.get(i)) {
        (Some(a), Some(b)) => a <= b,
        _ => false,
    })
}
