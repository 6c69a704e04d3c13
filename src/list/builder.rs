use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use super::CowList;
use crate::ord::Probe;

/// A builder for a [`CowList`] instance.
#[must_use]
pub struct Builder<T> {
    pub(super) name: Option<Arc<str>>,
    pub(super) capacity: usize,
    pub(super) probe: Probe,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Builder<T> {
    /// Creates a new unconfigured builder.
    pub fn new() -> Builder<T> {
        Builder {
            name: None,
            capacity: 0,
            probe: Probe::Forward,
            _phantom: PhantomData,
        }
    }

    ///
    /// Sets the name of the list, used as the `list` field
    /// of all emitted tracing events.
    ///
    pub fn name(mut self, name: impl AsRef<str>) -> Self {
        self.name = Some(Arc::from(name.as_ref()));
        self
    }

    ///
    /// Reserves capacity in the initial version.
    /// Later versions are sized to fit their contents.
    ///
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    ///
    /// Sets the probe used by [`CowList::insert_in_order`] to locate
    /// insertion points (default: [`Probe::Forward`]).
    ///
    pub fn probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    /// Builds an empty list.
    pub fn build(self) -> CowList<T> {
        let items = Vec::with_capacity(self.capacity);
        CowList::from_parts(self, items)
    }

    /// Builds a list containing the given items, in iteration order.
    pub fn build_from(self, iter: impl IntoIterator<Item = T>) -> CowList<T> {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend(iter);
        CowList::from_parts(self, items)
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Builder<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            capacity: self.capacity,
            probe: self.probe,
            _phantom: PhantomData,
        }
    }
}

impl<T> Debug for Builder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("probe", &self.probe)
            .finish()
    }
}
