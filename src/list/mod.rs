//! A snapshot based copy-on-write list.
//!
//! A [`CowList`] stores its contents as immutable versions. Readers obtain
//! a [`Snapshot`] of the current version and may hold it as long as they
//! want, while writers copy the current version, apply their modification
//! and publish the result as the next version. Readers thus never observe
//! a partially applied modification.
//!
//! Writers are serialized among themselves. The lock that guards the current
//! version is only held to clone or swap a pointer, so reads are cheap while
//! every write costs a full copy of the list. This makes the list a good fit
//! for read-mostly data.
//!
//! ```
//! use cowlist::list::CowList;
//!
//! let list = CowList::new();
//! for v in ["3", "2", "1", "3"] {
//!     list.insert_in_order(v.to_string());
//! }
//! assert_eq!(list.snapshot().to_string(), "[1, 2, 3, 3]");
//! ```

use spin::{Mutex, RwLock};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    sync::Arc,
};
use tracing::{debug, trace, trace_span};

use crate::{
    error::{Error, Result},
    ord::Probe,
};

mod builder;
mod snapshot;

pub use self::builder::Builder;
pub use self::snapshot::{Iter, Snapshot};


/// A list that publishes a new immutable version on every modification.
pub struct CowList<T> {
    current: RwLock<Snapshot<T>>,
    writer: Mutex<()>,

    name: Option<Arc<str>>,
    probe: Probe,
}

/// The outcome of a modification.
enum Commit<T, R> {
    /// Publish the items as the next version.
    Publish(Vec<T>, R),
    /// The modification did not change anything.
    Keep(R),
}

impl<T> CowList<T> {
    /// Creates a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Builder::new().build()
    }

    /// Creates a builder to configure a new list.
    pub fn builder() -> Builder<T> {
        Builder::new()
    }

    pub(crate) fn from_parts(builder: Builder<T>, items: Vec<T>) -> Self {
        Self {
            current: RwLock::new(Snapshot::new(items, 0)),
            writer: Mutex::new(()),
            name: builder.name,
            probe: builder.probe,
        }
    }

    /// The name of the list, if one was configured.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The probe used for ordered insertion.
    #[must_use]
    pub fn probe(&self) -> Probe {
        self.probe
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    // # Reads

    /// Returns the current version of the list.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.current.read().clone()
    }

    /// Returns an iterator over the current version.
    ///
    /// The iterator is not affected by later modifications.
    #[must_use]
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.snapshot())
    }

    /// The version number of the current snapshot.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// The number of elements in the current version.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current version is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Clone,
    {
        self.current.read().get(index).cloned()
    }

    /// Returns a copy of the first element.
    #[must_use]
    pub fn first(&self) -> Option<T>
    where
        T: Clone,
    {
        self.current.read().first().cloned()
    }

    /// Returns a copy of the last element.
    #[must_use]
    pub fn last(&self) -> Option<T>
    where
        T: Clone,
    {
        self.current.read().last().cloned()
    }

    /// Whether the current version contains `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.current.read().contains(value)
    }

    /// The index of the first element equal to `value`.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.current.read().iter().position(|v| v == value)
    }

    /// The index of the last element equal to `value`.
    #[must_use]
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.current.read().iter().rposition(|v| v == value)
    }

    /// Copies the current version into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.snapshot().to_vec()
    }

    // # Writes

    ///
    /// Runs a modification against the current version and publishes
    /// its result. Errors and unchanged results do not publish a
    /// new version.
    ///
    /// The writer lock is held while `f` runs, so `f` must not write
    /// to this list. Reads only touch the version pointer and stay allowed.
    ///
    fn commit<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&Snapshot<T>) -> Result<Commit<T, R>>,
    ) -> Result<R> {
        let span = trace_span!("cowlist", list = self.label(), op);
        let _entered = span.enter();

        let _writer = self.writer.lock();
        let current = self.snapshot();

        match f(&current) {
            Ok(Commit::Publish(items, ret)) => {
                let version = current.version + 1;
                let len = items.len();
                *self.current.write() = Snapshot::new(items, version);
                trace!(version, len, "published");
                Ok(ret)
            }
            Ok(Commit::Keep(ret)) => {
                trace!(version = current.version, "unchanged");
                Ok(ret)
            }
            Err(e) => {
                debug!(version = current.version, "rejected: {e}");
                Err(e)
            }
        }
    }

    ///
    /// Replaces the contents of the list, returning the previous version.
    ///
    pub fn replace(&self, items: Vec<T>) -> Snapshot<T> {
        let span = trace_span!("cowlist", list = self.label(), op = "replace");
        let _entered = span.enter();

        let _writer = self.writer.lock();
        let mut current = self.current.write();
        let next = Snapshot::new(items, current.version + 1);
        trace!(version = next.version, len = next.len(), "published");
        std::mem::replace(&mut *current, next)
    }

    /// Removes all elements.
    pub fn clear(&self) {
        infallible(self.commit("clear", |current| {
            if current.is_empty() {
                return Ok(Commit::Keep(()));
            }
            Ok(Commit::Publish(Vec::new(), ()))
        }));
    }
}

/// Unwraps the result of a write that never constructs an [`Error`].
fn infallible<R>(result: Result<R>) -> R {
    match result {
        Ok(ret) => ret,
        Err(e) => unreachable!("infallible write failed: {e}"),
    }
}

impl<T: Clone> CowList<T> {
    fn copy_of(items: &[T], additional: usize) -> Vec<T> {
        let mut copy = Vec::with_capacity(items.len() + additional);
        copy.extend_from_slice(items);
        copy
    }

    ///
    /// Applies an arbitrary modification to a copy of the current
    /// version and publishes the result.
    ///
    /// # Deadlocks
    ///
    /// `f` runs while the writer lock is held. Writing to this list
    /// from within `f` spins forever.
    ///
    pub fn edit<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        infallible(self.commit("edit", |current| {
            let mut items = Self::copy_of(current, 0);
            let ret = f(&mut items);
            Ok(Commit::Publish(items, ret))
        }))
    }

    /// Appends `value`, returning its index.
    pub fn push(&self, value: T) -> usize {
        self.edit(|items| {
            items.push(value);
            items.len() - 1
        })
    }

    ///
    /// Inserts `value` at `index`, shifting all later elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index > len`.
    ///
    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        self.commit("insert", |current| {
            let len = current.len();
            if index > len {
                return Err(Error::OutOfBounds { index, len });
            }
            let mut items = Self::copy_of(current, 1);
            items.insert(index, value);
            Ok(Commit::Publish(items, ()))
        })
    }

    ///
    /// Replaces the element at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len`.
    ///
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        self.commit("set", |current| {
            let len = current.len();
            if index >= len {
                return Err(Error::OutOfBounds { index, len });
            }
            let mut items = Self::copy_of(current, 0);
            let prev = std::mem::replace(&mut items[index], value);
            Ok(Commit::Publish(items, prev))
        })
    }

    ///
    /// Removes the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index >= len`.
    ///
    pub fn remove(&self, index: usize) -> Result<T> {
        self.commit("remove", |current| {
            let len = current.len();
            if index >= len {
                return Err(Error::OutOfBounds { index, len });
            }
            let mut items = Self::copy_of(current, 0);
            let removed = items.remove(index);
            Ok(Commit::Publish(items, removed))
        })
    }

    /// Removes the first element equal to `value`, returning whether one was found.
    pub fn remove_item(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        infallible(self.commit("remove_item", |current| {
            let Some(index) = current.iter().position(|v| v == value) else {
                return Ok(Commit::Keep(false));
            };
            let mut items = Self::copy_of(current, 0);
            items.remove(index);
            Ok(Commit::Publish(items, true))
        }))
    }

    /// Appends `value` if it is not allready contained, returning whether it was added.
    pub fn add_if_absent(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        infallible(self.commit("add_if_absent", |current| {
            if current.contains(&value) {
                return Ok(Commit::Keep(false));
            }
            let mut items = Self::copy_of(current, 1);
            items.push(value);
            Ok(Commit::Publish(items, true))
        }))
    }

    ///
    /// Appends all values that are neither contained in the list nor
    /// yielded earlier by `iter`. Returns the number of added values.
    ///
    /// # Deadlocks
    ///
    /// `iter` is consumed while the writer lock is held. An iterator
    /// that writes to this list spins forever.
    ///
    pub fn add_all_absent(&self, iter: impl IntoIterator<Item = T>) -> usize
    where
        T: PartialEq,
    {
        infallible(self.commit("add_all_absent", |current| {
            let mut added: Vec<T> = Vec::new();
            for value in iter {
                if !current.contains(&value) && !added.contains(&value) {
                    added.push(value);
                }
            }
            if added.is_empty() {
                return Ok(Commit::Keep(0));
            }
            let n = added.len();
            let mut items = Self::copy_of(current, n);
            items.append(&mut added);
            Ok(Commit::Publish(items, n))
        }))
    }

    ///
    /// Appends all values, publishing them as a single version.
    ///
    /// # Deadlocks
    ///
    /// `iter` is consumed while the writer lock is held. An iterator
    /// that writes to this list spins forever.
    ///
    pub fn extend(&self, iter: impl IntoIterator<Item = T>) {
        infallible(self.commit("extend", |current| {
            let iter = iter.into_iter();
            let mut items = Self::copy_of(current, iter.size_hint().0);
            items.extend(iter);
            if items.len() == current.len() {
                return Ok(Commit::Keep(()));
            }
            Ok(Commit::Publish(items, ()))
        }));
    }

    ///
    /// Retains only the elements matching the predicate, returning the
    /// number of removed elements.
    ///
    /// # Deadlocks
    ///
    /// `f` runs while the writer lock is held. Writing to this list
    /// from within `f` spins forever.
    ///
    pub fn retain(&self, mut f: impl FnMut(&T) -> bool) -> usize {
        infallible(self.commit("retain", |current| {
            let items = current.iter().filter(|v| f(*v)).cloned().collect::<Vec<_>>();
            let removed = current.len() - items.len();
            if removed == 0 {
                return Ok(Commit::Keep(0));
            }
            Ok(Commit::Publish(items, removed))
        }))
    }

    /// Sorts the list stably by the natural order of its elements.
    pub fn sort(&self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    ///
    /// Sorts the list stably using the given comparison.
    ///
    /// # Deadlocks
    ///
    /// `cmp` runs while the writer lock is held. Writing to this list
    /// from within `cmp` spins forever.
    ///
    pub fn sort_by(&self, mut cmp: impl FnMut(&T, &T) -> Ordering) {
        infallible(self.commit("sort", |current| {
            if current
                .windows(2)
                .all(|w| cmp(&w[0], &w[1]) != Ordering::Greater)
            {
                return Ok(Commit::Keep(()));
            }
            let mut items = Self::copy_of(current, 0);
            items.sort_by(cmp);
            Ok(Commit::Publish(items, ()))
        }));
    }

    // # Ordered writes

    ///
    /// Inserts `value` behind all elements less than or equal to it,
    /// assuming the list is sorted. Returns the insertion index.
    ///
    pub fn insert_in_order(&self, value: T) -> usize
    where
        T: Ord,
    {
        self.insert_in_order_by(value, Ord::cmp)
    }

    ///
    /// Inserts `value` in order, comparing elements with `cmp`.
    ///
    /// # Deadlocks
    ///
    /// `cmp` runs while the writer lock is held. Writing to this list
    /// from within `cmp` spins forever.
    ///
    pub fn insert_in_order_by(&self, value: T, mut cmp: impl FnMut(&T, &T) -> Ordering) -> usize {
        let probe = self.probe;
        infallible(self.commit("insert_in_order", |current| {
            Self::place(current, value, |seq, value| {
                Ok(probe.locate_by(seq, value, &mut cmp))
            })
        }))
    }

    ///
    /// Inserts `value` in order, comparing elements by the extracted key.
    ///
    /// # Deadlocks
    ///
    /// `key` runs while the writer lock is held. Writing to this list
    /// from within `key` spins forever.
    ///
    pub fn insert_in_order_by_key<K: Ord>(&self, value: T, mut key: impl FnMut(&T) -> K) -> usize {
        self.insert_in_order_by(value, |a, b| key(a).cmp(&key(b)))
    }

    ///
    /// Inserts `value` in order into a list of partially ordered elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `value` is incomparable with
    /// an element that must be passed. No version is published in this case.
    ///
    pub fn try_insert_in_order(&self, value: T) -> Result<usize>
    where
        T: PartialOrd,
    {
        let probe = self.probe;
        self.commit("insert_in_order", |current| {
            Self::place(current, value, |seq, value| {
                probe.locate(seq, value, PartialOrd::partial_cmp)
            })
        })
    }

    fn place(
        current: &Snapshot<T>,
        value: T,
        locate: impl FnOnce(&Vec<T>, &T) -> Result<usize>,
    ) -> Result<Commit<T, usize>> {
        let index = locate(&*current.items, &value)?;
        trace!(index, "located insertion point");
        let mut items = Self::copy_of(current, 1);
        items.insert(index, value);
        Ok(Commit::Publish(items, index))
    }
}

impl<T> Default for CowList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CowList<T> {
    /// Creates a new list that starts out with the current version of `self`.
    fn clone(&self) -> Self {
        Self {
            current: RwLock::new(self.snapshot()),
            writer: Mutex::new(()),
            name: self.name.clone(),
            probe: self.probe,
        }
    }
}

impl<T> From<Vec<T>> for CowList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_parts(Builder::new(), items)
    }
}

impl<T> FromIterator<T> for CowList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Builder::new().build_from(iter)
    }
}

impl<T: Clone> IntoIterator for &CowList<T> {
    type Item = T;
    type IntoIter = Iter<T>;
    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Debug> Debug for CowList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("CowList")
            .field("name", &self.name)
            .field("version", &snapshot.version)
            .field("items", &snapshot)
            .finish()
    }
}

impl<T: Display> Display for CowList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.snapshot(), f)
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for CowList<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.snapshot().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for CowList<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(CowList::from)
    }
}
