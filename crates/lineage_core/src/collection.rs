//! Synchronized collection primitive.
//!
//! # Responsibility
//! - Hold one side of a relation as an ordered, duplicate-free set.
//! - Report real membership changes so the paired side can mirror them.
//!
//! # Invariants
//! - A value is stored at most once (id equality).
//! - A value is inserted before its addition callback runs, and removed
//!   before its removal callback runs.
//! - Re-adding a present value or removing an absent one is a no-op and
//!   fires no callback.

use std::slice::Iter;

/// Iteration contract for one relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOrder {
    /// Iteration follows insertion order, kept stable across removals.
    Insertion,
    /// Iteration order carries no meaning; removals may reorder members.
    Unordered,
}

/// Duplicate-free member list for one side of a relation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedSet<T> {
    values: Vec<T>,
    order: SetOrder,
}

impl<T> Default for LinkedSet<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            order: SetOrder::Insertion,
        }
    }
}

impl<T: Clone + PartialEq> LinkedSet<T> {
    pub fn new(order: SetOrder) -> Self {
        Self {
            values: Vec::new(),
            order,
        }
    }

    /// Set whose iteration follows insertion order.
    pub fn ordered() -> Self {
        Self::new(SetOrder::Insertion)
    }

    /// Set whose iteration order is irrelevant.
    pub fn unordered() -> Self {
        Self::new(SetOrder::Unordered)
    }

    pub fn order(&self) -> SetOrder {
        self.order
    }

    /// Adds every value not yet present, invoking `on_added` after each
    /// real insertion.
    pub fn add<I>(&mut self, values: I, mut on_added: impl FnMut(&T))
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            if self.insert(value.clone()) {
                on_added(&value);
            }
        }
    }

    /// Removes `value` when present, then invokes `on_removed`.
    pub fn remove(&mut self, value: &T, mut on_removed: impl FnMut(&T)) {
        if self.discard(value) {
            on_removed(value);
        }
    }

    /// Makes the content exactly the deduplicated `values`.
    ///
    /// Stale members are removed in current iteration order first, then new
    /// members are appended in the given order. Callbacks fire only for
    /// members whose presence actually changes.
    pub fn replace<I>(
        &mut self,
        values: I,
        mut on_added: impl FnMut(&T),
        mut on_removed: impl FnMut(&T),
    ) where
        I: IntoIterator<Item = T>,
    {
        let (stale, wanted) = self.replace_plan(values);
        for value in &stale {
            self.remove(value, &mut on_removed);
        }
        self.add(wanted, &mut on_added);
    }

    pub fn contains(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.values.iter()
    }

    /// Snapshot of the current members.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.clone()
    }

    /// Raw insertion used by the relation engine. Returns whether membership
    /// changed.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        if self.values.contains(&value) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Raw removal used by the relation engine. Returns whether membership
    /// changed.
    pub(crate) fn discard(&mut self, value: &T) -> bool {
        let Some(index) = self.values.iter().position(|current| current == value) else {
            return false;
        };
        match self.order {
            SetOrder::Insertion => {
                self.values.remove(index);
            }
            SetOrder::Unordered => {
                self.values.swap_remove(index);
            }
        }
        true
    }

    /// Splits a replacement into `(stale members, deduplicated wanted
    /// members)` against a snapshot of the current content.
    pub(crate) fn replace_plan<I>(&self, values: I) -> (Vec<T>, Vec<T>)
    where
        I: IntoIterator<Item = T>,
    {
        let mut wanted: Vec<T> = Vec::new();
        for value in values {
            if !wanted.contains(&value) {
                wanted.push(value);
            }
        }
        let stale = self
            .values
            .iter()
            .filter(|current| !wanted.contains(current))
            .cloned()
            .collect();
        (stale, wanted)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkedSet, SetOrder};

    #[test]
    fn add_fires_callback_once_per_new_value() {
        let mut set = LinkedSet::ordered();
        let mut added = Vec::new();
        set.add(["a", "b"], |value| added.push(*value));
        set.add(["b", "a", "c"], |value| added.push(*value));

        assert_eq!(set.to_vec(), vec!["a", "b", "c"]);
        assert_eq!(added, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_add_keeps_order_and_length() {
        let mut set = LinkedSet::ordered();
        set.add([1, 2, 3], |_| {});
        set.add([1], |_| panic!("present value must not fire"));
        assert_eq!(set.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn remove_absent_value_is_silent() {
        let mut set: LinkedSet<u8> = LinkedSet::ordered();
        set.remove(&7, |_| panic!("absent value must not fire"));
        assert!(set.is_empty());
    }

    #[test]
    fn remove_present_value_fires_after_removal() {
        let mut set = LinkedSet::ordered();
        set.add(["x"], |_| {});
        let mut removed = Vec::new();
        set.remove(&"x", |value| removed.push(*value));
        assert!(set.is_empty());
        assert_eq!(removed, vec!["x"]);
    }

    #[test]
    fn replace_only_touches_symmetric_difference() {
        let mut set = LinkedSet::ordered();
        set.add([1, 2, 3], |_| {});

        let mut added = Vec::new();
        let mut removed = Vec::new();
        set.replace(
            [3, 4, 4, 2],
            |value| added.push(*value),
            |value| removed.push(*value),
        );

        assert_eq!(set.to_vec(), vec![2, 3, 4]);
        assert_eq!(added, vec![4]);
        assert_eq!(removed, vec![1]);
    }

    #[test]
    fn insertion_order_survives_removal() {
        let mut set = LinkedSet::new(SetOrder::Insertion);
        set.add([1, 2, 3, 4], |_| {});
        set.remove(&2, |_| {});
        assert_eq!(set.to_vec(), vec![1, 3, 4]);
    }

    #[test]
    fn unordered_removal_keeps_membership() {
        let mut set = LinkedSet::unordered();
        set.add([1, 2, 3, 4], |_| {});
        set.remove(&1, |_| {});

        let mut members = set.to_vec();
        members.sort_unstable();
        assert_eq!(members, vec![2, 3, 4]);
        assert_eq!(set.order(), SetOrder::Unordered);
    }
}
