use std::{
    fmt::{Debug, Display},
    ops::Deref,
    sync::Arc,
};

/// An immutable version of a [`CowList`](super::CowList).
///
/// A snapshot is never modified after it was published, so it may
/// be read while writers publish newer versions.
pub struct Snapshot<T> {
    pub(super) items: Arc<Vec<T>>,
    pub(super) version: u64,
}

impl<T> Snapshot<T> {
    pub(super) fn new(items: Vec<T>, version: u64) -> Self {
        Self {
            items: Arc::new(items),
            version,
        }
    }

    /// The version number of this snapshot.
    ///
    /// Each published modification increments the version by one.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The contents of the snapshot.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Whether both snapshots share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }

    /// Copies the contents into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            version: self.version,
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> AsRef<[T]> for Snapshot<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for Snapshot<T> {}

impl<T: Debug> Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: Display> Display for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Snapshot<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_slice().serialize(serializer)
    }
}

/// An owning iterator over a [`Snapshot`], yielding cloned elements.
#[derive(Debug)]
pub struct Iter<T> {
    snapshot: Snapshot<T>,
    front: usize,
    back: usize,
}

impl<T> Iter<T> {
    pub(super) fn new(snapshot: Snapshot<T>) -> Self {
        let back = snapshot.len();
        Self {
            snapshot,
            front: 0,
            back,
        }
    }

    /// The snapshot this iterator walks over.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot<T> {
        &self.snapshot
    }
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let item = self.snapshot.get(self.front).cloned();
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T: Clone> DoubleEndedIterator for Iter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.snapshot.get(self.back).cloned()
    }
}

impl<T: Clone> ExactSizeIterator for Iter<T> {}
