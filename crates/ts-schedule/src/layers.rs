//! `Layers` — objects grouped by execution priority.
//!
//! # Why a `BTreeMap`
//!
//! The tick loop walks layers in ascending order every tick, while
//! registrations are rare (network build, agent spawn).  A `BTreeMap` keeps
//! the distinct layer numbers sorted and unique for free, gives O(log L)
//! registration where L = distinct layers, and its in-order iteration is the
//! execution order.  L is tiny in practice (one layer per object class).
//!
//! Within a layer, items are kept in a `Vec` in registration order.  A layer
//! is never removed once created, even when all its items have been removed.

use std::collections::BTreeMap;

use crate::{ScheduleError, ScheduleResult};

/// Registry mapping layer number → objects in registration order.
///
/// For a fixed sequence of `register` / `remove_where` calls, walking
/// [`layers`](Self::layers) then [`items`](Self::items) always yields the
/// same object order.
#[derive(Clone, Debug)]
pub struct Layers<T> {
    inner: BTreeMap<i32, Vec<T>>,
    /// Cached total item count for O(1) `len()`.
    total: usize,
}

impl<T> Layers<T> {
    pub fn new() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }

    /// Append `item` to `layer`, creating the layer if needed.
    pub fn register(&mut self, layer: i32, item: T) {
        self.inner.entry(layer).or_default().push(item);
        self.total += 1;
    }

    /// All registered layer numbers, ascending.
    pub fn layers(&self) -> impl Iterator<Item = i32> + '_ {
        self.inner.keys().copied()
    }

    /// Items of `layer` in registration order.
    ///
    /// A layer that was registered and later drained yields an empty slice.
    pub fn items(&self, layer: i32) -> ScheduleResult<&[T]> {
        self.inner
            .get(&layer)
            .map(Vec::as_slice)
            .ok_or(ScheduleError::UnknownLayer(layer))
    }

    /// Remove every item of `layer` matching `predicate`, keeping the order
    /// of the rest.  Returns the number removed; 0 if the layer is absent.
    pub fn remove_where<F>(&mut self, layer: i32, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let Some(items) = self.inner.get_mut(&layer) else {
            return 0;
        };
        let before = items.len();
        items.retain(|item| !predicate(item));
        let removed = before - items.len();
        self.total -= removed;
        removed
    }

    /// Every item with its layer, in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> + '_ {
        self.inner
            .iter()
            .flat_map(|(&layer, items)| items.iter().map(move |item| (layer, item)))
    }

    /// `true` if `layer` has ever been registered.
    pub fn contains_layer(&self, layer: i32) -> bool {
        self.inner.contains_key(&layer)
    }

    /// Total number of items across all layers.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct layers.
    pub fn layer_count(&self) -> usize {
        self.inner.len()
    }
}

impl<T> Default for Layers<T> {
    fn default() -> Self {
        Self::new()
    }
}
