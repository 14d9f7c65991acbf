//! An owning singly-linked list.
//!
//! Every node exclusively owns the node after it, so a value is owned by
//! exactly one chain at a time. Values move in at splice points
//! ([`Chain::insert_sorted_by`], [`Chain::push_front`], ...) and move back
//! out when unlinked ([`Chain::remove_first`]), at which point the node that
//! carried them is freed.

use std::{cmp::Ordering, fmt, iter::FusedIterator};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A singly-linked list whose nodes are uniquely owned boxes.
pub struct Chain<T> {
    head: Link<T>,
    len: usize,
}

impl<T> Chain<T> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of elements in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the head element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Returns the head element mutably, if any.
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.head.as_deref_mut().map(|node| &mut node.value)
    }

    /// Returns the element at `position` (zero-based), walking from the head.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.iter().nth(position)
    }

    /// Returns the element at `position` mutably.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        self.iter_mut().nth(position)
    }

    /// Iterates over the elements in link order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Iterates mutably over the elements in link order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
            remaining: self.len,
        }
    }

    /// Makes `value` the new head.
    pub fn push_front(&mut self, value: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    /// Appends `value` at the tail.
    pub fn push_back(&mut self, value: T) {
        let tail = self.link_mut(self.len);
        *tail = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Detaches and returns the head element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let Node { value, next } = *node;
            self.head = next;
            self.len -= 1;
            value
        })
    }

    /// Splices `value` in front of the first element that compares greater
    /// than or equal to it, or at the tail if there is none.
    ///
    /// `compare` is called as `compare(&value, existing)`. Returns the
    /// position the value landed at.
    pub fn insert_sorted_by<F>(&mut self, value: T, mut compare: F) -> usize
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let position = self
            .iter()
            .take_while(|existing| compare(&value, *existing) == Ordering::Greater)
            .count();

        let link = self.link_mut(position);
        let next = link.take();
        *link = Some(Box::new(Node { value, next }));
        self.len += 1;
        position
    }

    /// Unlinks the first element matching `predicate` and hands it back.
    ///
    /// The predecessor is relinked to the successor (or the head is moved on)
    /// and the node that held the element is freed.
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let position = self.iter().position(predicate)?;
        let link = self.link_mut(position);
        let Node { value, next } = *link.take()?;
        *link = next;
        self.len -= 1;
        Some(value)
    }

    /// Returns the link slot at `position`; `position == len` is the tail slot.
    fn link_mut(&mut self, position: usize) -> &mut Link<T> {
        let mut link = &mut self.head;
        for _ in 0..position {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        // Unlink node by node; the default recursive drop can overflow the
        // stack on long chains.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<T: Clone> Clone for Chain<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Chain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Chain<T> {}

impl<T> Extend<T> for Chain<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut added = 0;
        let mut tail = self.link_mut(self.len);
        for value in iter {
            let node = tail.insert(Box::new(Node { value, next: None }));
            tail = &mut node.next;
            added += 1;
        }
        self.len += added;
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Self::new();
        chain.extend(iter);
        chain
    }
}

/// Borrowing iterator over a [`Chain`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Mutably borrowing iterator over a [`Chain`].
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`Chain`].
pub struct IntoIter<T>(Chain<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Chain<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    fn values<'a>(chain: &Chain<&'a str>) -> Vec<&'a str> {
        chain.iter().copied().collect()
    }

    #[test]
    fn new_chain_is_empty() {
        let chain: Chain<u8> = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.first().is_none());
    }

    #[test]
    fn push_front_and_back() {
        let mut chain = Chain::new();
        chain.push_back("b");
        chain.push_front("a");
        chain.push_back("c");
        assert_eq!(values(&chain), ["a", "b", "c"]);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.get(1), Some(&"b"));
        assert_eq!(chain.get(3), None);
    }

    #[test]
    fn insert_sorted_keeps_order() {
        let mut chain: Chain<&str> = ["Abc", "Bcd", "Zzz"].into_iter().collect();

        assert_eq!(chain.insert_sorted_by("Mno", |a, b| a.cmp(b)), 2);
        assert_eq!(values(&chain), ["Abc", "Bcd", "Mno", "Zzz"]);

        assert_eq!(chain.insert_sorted_by("Aaa", |a, b| a.cmp(b)), 0);
        assert_eq!(chain.insert_sorted_by("Zzzz", |a, b| a.cmp(b)), 5);
        assert_eq!(values(&chain), ["Aaa", "Abc", "Bcd", "Mno", "Zzz", "Zzzz"]);
    }

    #[test]
    fn insert_sorted_places_ties_before_equal_element() {
        let mut chain: Chain<(&str, u8)> = [("a", 1), ("b", 1)].into_iter().collect();
        chain.insert_sorted_by(("b", 2), |a, b| a.0.cmp(b.0));
        let order: Vec<_> = chain.iter().copied().collect();
        assert_eq!(order, [("a", 1), ("b", 2), ("b", 1)]);
    }

    #[test]
    fn insert_sorted_into_empty_chain() {
        let mut chain = Chain::new();
        assert_eq!(chain.insert_sorted_by("x", |a: &&str, b| a.cmp(b)), 0);
        assert_eq!(values(&chain), ["x"]);
    }

    #[test]
    fn remove_first_relinks_neighbours() {
        let mut chain: Chain<&str> = ["a", "b", "c"].into_iter().collect();

        assert_eq!(chain.remove_first(|v| *v == "b"), Some("b"));
        assert_eq!(values(&chain), ["a", "c"]);

        assert_eq!(chain.remove_first(|v| *v == "a"), Some("a"));
        assert_eq!(values(&chain), ["c"]);

        assert_eq!(chain.remove_first(|v| *v == "missing"), None);
        assert_eq!(chain.remove_first(|v| *v == "c"), Some("c"));
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn removed_value_is_released_once() {
        let drops = Rc::new(Cell::new(0));

        struct Counted(Rc<Cell<usize>>, u8);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let mut chain: Chain<Counted> = (0..3).map(|i| Counted(Rc::clone(&drops), i)).collect();
        let removed = chain.remove_first(|c| c.1 == 1);
        assert_eq!(drops.get(), 0);
        drop(removed);
        assert_eq!(drops.get(), 1);
        drop(chain);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn long_chain_drops_without_overflow() {
        let chain: Chain<u32> = (0..200_000).collect();
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }

    #[test]
    fn iter_mut_edits_in_place() {
        let mut chain: Chain<u32> = (1..=3).collect();
        for value in &mut chain {
            *value *= 10;
        }
        assert_eq!(chain.into_iter().collect::<Vec<_>>(), [10, 20, 30]);
    }

    #[test]
    fn extend_appends_at_tail() {
        let mut chain: Chain<u32> = (1..=2).collect();
        chain.extend([3, 4]);
        assert_eq!(chain.iter().len(), 4);
        assert_eq!(chain.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    }
}
