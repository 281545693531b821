//! List-valued fields: a bounded ordered list and a toggle set

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use thiserror::Error;
use uuid::Uuid;

/// Bounds violations on list fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("list is full ({max} entries)")]
    Full { max: usize },
    #[error("index {index} is out of bounds ({len} entries)")]
    OutOfBounds { index: usize, len: usize },
}

/// Fill level of a bounded list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Empty,
    Partial,
    Full,
}

/// List entry with a stable identity used as a rendering key
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T> {
    pub id: Uuid,
    pub item: T,
}

/// Ordered, index-addressable list with a fixed maximum length
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedList<T> {
    entries: Vec<Keyed<T>>,
    max: usize,
}

impl<T> BoundedList<T> {
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max,
        }
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> ListState {
        if self.entries.len() >= self.max {
            ListState::Full
        } else if self.entries.is_empty() {
            ListState::Empty
        } else {
            ListState::Partial
        }
    }

    /// Append at the end. A full list is left unchanged.
    pub fn append(&mut self, item: T) -> Result<Uuid, ListError> {
        if self.state() == ListState::Full {
            return Err(ListError::Full { max: self.max });
        }
        let id = Uuid::new_v4();
        self.entries.push(Keyed { id, item });
        Ok(id)
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn remove_at(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.entries.len() {
            return Err(ListError::OutOfBounds {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index).item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyed<T>> {
        self.entries.iter()
    }
}

/// Set-like selection that keeps insertion order.
/// Equality is membership only, so order never makes two sets differ.
#[derive(Debug, Clone)]
pub struct ToggleSet<T = String> {
    items: Vec<T>,
}

impl<T: PartialEq> PartialEq for ToggleSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|item| other.items.contains(item))
    }
}

impl<T: Eq> Eq for ToggleSet<T> {}

impl<T> Default for ToggleSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `value` if present, otherwise append it.
    /// Returns whether the value is a member afterwards.
    pub fn toggle(&mut self, value: impl Into<T>) -> bool {
        let value = value.into();
        if let Some(pos) = self.items.iter().position(|v| *v == value) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(value);
            true
        }
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.items.iter().any(|v| v.borrow() == value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// A chosen image, referenced by URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub uri: String,
}

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(list: &BoundedList<&'static str>) -> Vec<&'static str> {
        list.iter().map(|e| e.item).collect()
    }

    mod bounded_list {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_state_transitions() {
            let mut list = BoundedList::new(2);
            assert_eq!(list.state(), ListState::Empty);
            list.append("a").unwrap();
            assert_eq!(list.state(), ListState::Partial);
            list.append("b").unwrap();
            assert_eq!(list.state(), ListState::Full);
            list.remove_at(0).unwrap();
            assert_eq!(list.state(), ListState::Partial);
        }

        #[test]
        fn test_append_on_full_is_noop() {
            let mut list = BoundedList::new(5);
            for item in ["a", "b", "c", "d", "e"] {
                list.append(item).unwrap();
            }
            let before = list.clone();
            assert_eq!(list.append("f"), Err(ListError::Full { max: 5 }));
            assert_eq!(list.len(), 5);
            assert_eq!(list, before);
        }

        #[test]
        fn test_remove_at_preserves_order() {
            let mut list = BoundedList::new(5);
            for item in ["a", "b", "c"] {
                list.append(item).unwrap();
            }
            assert_eq!(list.remove_at(1), Ok("b"));
            assert_eq!(items(&list), vec!["a", "c"]);
        }

        #[test]
        fn test_remove_at_out_of_bounds() {
            let mut list: BoundedList<&str> = BoundedList::new(5);
            list.append("a").unwrap();
            assert_eq!(
                list.remove_at(1),
                Err(ListError::OutOfBounds { index: 1, len: 1 })
            );
            assert_eq!(list.len(), 1);
        }

        #[test]
        fn test_ids_are_unique_and_stable() {
            let mut list = BoundedList::new(3);
            let a = list.append("a").unwrap();
            let b = list.append("b").unwrap();
            let c = list.append("c").unwrap();
            assert_ne!(a, b);
            list.remove_at(0).unwrap();
            let ids: Vec<_> = list.iter().map(|e| e.id).collect();
            assert_eq!(ids, vec![b, c]);
        }

        #[test]
        fn test_zero_capacity_is_always_full() {
            let mut list = BoundedList::new(0);
            assert_eq!(list.append("a"), Err(ListError::Full { max: 0 }));
        }
    }

    mod toggle_set {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_toggle_adds_then_removes() {
            let mut set: ToggleSet = ToggleSet::new();
            assert!(set.toggle("Unisex"));
            assert!(set.contains("Unisex"));
            assert!(!set.toggle("Unisex"));
            assert!(!set.contains("Unisex"));
        }

        #[test]
        fn test_double_toggle_restores_any_state() {
            let states: [&[&str]; 3] = [&[], &["Mới về"], &["Bán chạy", "Unisex", "Giảm giá"]];
            for initial in states {
                for tag in ["Mới về", "Unisex", "Hàng hiệu"] {
                    let mut set: ToggleSet = ToggleSet::new();
                    for t in initial {
                        set.toggle(*t);
                    }
                    let original = set.clone();
                    set.toggle(tag);
                    set.toggle(tag);
                    assert_eq!(set, original, "{initial:?} / {tag}");
                }
            }
        }

        #[test]
        fn test_retoggling_earlier_member_still_equal() {
            let mut set: ToggleSet = ToggleSet::new();
            set.toggle("a");
            set.toggle("b");
            let original = set.clone();
            set.toggle("a");
            set.toggle("a");
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a"]);
            assert_eq!(set, original);
        }

        #[test]
        fn test_different_members_are_not_equal() {
            let mut left: ToggleSet = ToggleSet::new();
            left.toggle("a");
            let mut right: ToggleSet = ToggleSet::new();
            right.toggle("b");
            assert_ne!(left, right);
            right.toggle("a");
            assert_ne!(left, right);
        }

        #[test]
        fn test_keeps_insertion_order() {
            let mut set: ToggleSet = ToggleSet::new();
            set.toggle("b");
            set.toggle("a");
            set.toggle("c");
            set.toggle("a");
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "c"]);
        }
    }
}
