use std::collections::HashMap;
use std::hash::Hash;

/// Bidirectional, non-owning association between item indexes and element handles.
///
/// Size observations arrive keyed by element; this maps them back to a logical index. Both
/// directions are always updated together so that a replaced or removed element can never
/// report a size for a stale index.
#[derive(Clone, Debug)]
pub struct MeasureRegistry<E> {
    by_index: HashMap<usize, E>,
    by_element: HashMap<E, usize>,
}

/// What [`MeasureRegistry::insert`] displaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Displaced<E> {
    /// The element previously registered for the same index.
    pub element: Option<E>,
    /// The index the new element was previously registered under.
    pub index: Option<usize>,
}

impl<E: Clone + Eq + Hash> MeasureRegistry<E> {
    pub fn new() -> Self {
        Self {
            by_index: HashMap::new(),
            by_element: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    pub fn index_of(&self, element: &E) -> Option<usize> {
        self.by_element.get(element).copied()
    }

    pub fn element_at(&self, index: usize) -> Option<&E> {
        self.by_index.get(&index)
    }

    /// Associates `element` with `index`.
    ///
    /// Any previous element at `index` and any previous index of `element` are unlinked first.
    /// Returns `None` when the exact pair is already registered.
    pub fn insert(&mut self, index: usize, element: E) -> Option<Displaced<E>> {
        if self.by_index.get(&index) == Some(&element) {
            return None;
        }

        let old_element = self.by_index.remove(&index);
        if let Some(old) = &old_element {
            self.by_element.remove(old);
        }
        let old_index = self.by_element.remove(&element);
        if let Some(i) = old_index {
            self.by_index.remove(&i);
        }

        self.by_index.insert(index, element.clone());
        self.by_element.insert(element, index);
        Some(Displaced {
            element: old_element,
            index: old_index,
        })
    }

    /// Removes the element registered for `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<E> {
        let element = self.by_index.remove(&index)?;
        self.by_element.remove(&element);
        Some(element)
    }

    /// Removes every association, yielding the released elements.
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.by_element.clear();
        self.by_index.drain().map(|(_, element)| element)
    }
}

impl<E: Clone + Eq + Hash> Default for MeasureRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
