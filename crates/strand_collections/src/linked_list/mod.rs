use core::{
    fmt,
    hash::{Hash, Hasher},
    mem,
};

use crate::{
    Error, Result,
    identity::ContainerId,
    logging::log_links,
};

mod cursor;
mod iter;


pub use cursor::{Cursor, CursorMut};
pub use iter::{Iter, IterMut, IntoIter};

/// Slot of the guard node, the guard lives there for the whole lifetime of the list
const GUARD : usize = 0;
/// Stamp of the guard and of vacant slots, live nodes always have a stamp of at least 1
const UNSTAMPED : u64 = 0;

struct Node<T> {
    prev  : usize,
    next  : usize,
    stamp : u64,
    value : Option<T>,
}

impl<T> Node<T> {
    const fn guard() -> Self {
        Self { prev: GUARD, next: GUARD, stamp: UNSTAMPED, value: None }
    }
}

/// A doubly linked list, with its nodes stored in a slot arena owned by the list.
///
/// The nodes form a circular chain through a guard node, which holds no element and represents the end position.
/// Following `next` from the guard visits every element in order and returns to the guard.
///
/// # Examples
///
/// ```
/// use strand_collections::{linked_list, BidirectionalCursor};
///
/// let mut list = linked_list![10, 20, 30, 40, 50];
/// let first = (list.cbegin() + 1)?.position();
/// let last = (list.cbegin() + 3)?.position();
/// assert_eq!(list.erase_range(first, last)?, 2);
/// assert_eq!(list, [10, 40, 50]);
/// # Ok::<(), strand_collections::Error>(())
/// ```
///
/// # Positions
///
/// A [`Position`] stays valid until the node it refers to is removed, insertions and removals of other nodes never invalidate it.
/// Each node receives a unique stamp when it is linked, so a position can't accidentally refer to a newer node reusing the same slot.
pub struct LinkedList<T> {
    nodes      : Vec<Node<T>>,
    vacant     : Vec<usize>,
    len        : usize,
    id         : ContainerId,
    next_stamp : u64,
}

/// Detached location in a [`LinkedList`], either a node or the end position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    container : ContainerId,
    index     : usize,
    stamp     : u64,
}

impl Position {
    /// Check if the position is the end position of its list
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == GUARD
    }
}

impl<T> LinkedList<T> {
    /// Create a new empty list, only containing the guard node
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![Node::guard()], vacant: Vec::new(), len: 0, id: ContainerId::next(), next_stamp: UNSTAMPED + 1 }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.nodes[self.nodes[GUARD].next].value.as_ref()
    }

    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.nodes[GUARD].next;
        self.nodes[first].value.as_mut()
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.nodes[self.nodes[GUARD].prev].value.as_ref()
    }

    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.nodes[GUARD].prev;
        self.nodes[last].value.as_mut()
    }

    /// Get a reference to the element at `index`, walking from whichever end is closer
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len;
        let found = if index >= len {
            None
        } else if index <= len / 2 {
            self.iter().nth(index)
        } else {
            self.iter().rev().nth(len - 1 - index)
        };
        found.ok_or(Error::IndexOutOfRange{ index, len })
    }

    /// Get a mutable reference to the element at `index`, walking from whichever end is closer
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        let found = if index >= len {
            None
        } else if index <= len / 2 {
            self.iter_mut().nth(index)
        } else {
            self.iter_mut().rev().nth(len - 1 - index)
        };
        found.ok_or(Error::IndexOutOfRange{ index, len })
    }

    pub fn push_back(&mut self, item: T) {
        self.link_before(GUARD, item);
    }

    pub fn push_front(&mut self, item: T) {
        let first = self.nodes[GUARD].next;
        self.link_before(first, item);
    }

    /// Insert an element right before `pos`, `pos` may be the end position
    pub fn insert(&mut self, pos: Position, item: T) -> Result<()> {
        let index = self.resolve(pos)?;
        self.link_before(index, item);
        Ok(())
    }

    /// Remove and return the first element
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "pop_front" });
        }
        Ok(self.unlink(self.nodes[GUARD].next))
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "pop_back" });
        }
        Ok(self.unlink(self.nodes[GUARD].prev))
    }

    /// Remove and return the element at `pos`
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "erase" });
        }

        let index = self.resolve(pos)?;
        if index == GUARD {
            return Err(Error::InvalidIterator("cannot erase the end position"));
        }
        Ok(self.unlink(index))
    }

    /// Remove the elements in `[first, last)`, returning the number of removed elements.
    ///
    /// `last` has to be reachable from `first` by moving forward, an empty range is a no-op.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<usize> {
        let start = self.resolve(first)?;
        let end = self.resolve(last)?;
        if start == end {
            return Ok(0);
        }

        // Validate the whole range before touching any link
        let mut count = 0;
        let mut cur = start;
        while cur != end {
            if cur == GUARD {
                return Err(Error::InvalidIterator("range end is not reachable from the range start"));
            }
            cur = self.nodes[cur].next;
            count += 1;
        }

        log_links!("erasing {} of {} nodes", count, self.len);

        let before = self.nodes[start].prev;
        self.nodes[before].next = end;
        self.nodes[end].prev = before;
        self.len -= count;

        let mut cur = start;
        for _ in 0..count {
            let next = self.nodes[cur].next;
            let value = self.release(cur);
            drop(value);
            cur = next;
        }

        if self.len == 0 {
            self.reset_storage();
        }
        Ok(count)
    }

    /// Remove all elements, from front to back
    pub fn clear(&mut self) {
        let mut cur = self.nodes[GUARD].next;
        self.nodes[GUARD] = Node::guard();
        self.len = 0;

        while cur != GUARD {
            let next = self.nodes[cur].next;
            let value = self.release(cur);
            drop(value);
            cur = next;
        }
        self.reset_storage();
    }

    pub fn contains(&self, x: &T) -> bool
        where T : PartialEq
    {
        self.iter().any(|elem| elem == x)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Get a mutable cursor at the first element
    pub fn begin(&mut self) -> CursorMut<'_, T> {
        let first = self.nodes[GUARD].next;
        CursorMut::new(self, first)
    }

    /// Get a mutable cursor at the end position
    pub fn end(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, GUARD)
    }

    /// Get a cursor at the first element
    pub fn cbegin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.nodes[GUARD].next)
    }

    /// Get a cursor at the end position
    pub fn cend(&self) -> Cursor<'_, T> {
        Cursor::new(self, GUARD)
    }

    /// Move all nodes out of this list into a new list.
    ///
    /// Positions taken from this list stay valid for the returned list, this list is left empty.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Drop the current elements and move the nodes of `other` into this list, see [`LinkedList::take`]
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    pub(crate) fn position_at(&self, index: usize) -> Position {
        Position { container: self.id, index, stamp: self.nodes[index].stamp }
    }

    /// Resolve a position to the slot of a live node or the guard
    pub(crate) fn resolve(&self, pos: Position) -> Result<usize> {
        if pos.container != self.id {
            return Err(Error::InvalidIterator("position belongs to another container"));
        }
        match self.nodes.get(pos.index) {
            Some(node) if node.stamp == pos.stamp => Ok(pos.index),
            _ => Err(Error::InvalidIterator("position refers to a removed node")),
        }
    }

    pub(crate) fn next_of(&self, index: usize) -> usize {
        self.nodes[index].next
    }

    pub(crate) fn prev_of(&self, index: usize) -> usize {
        self.nodes[index].prev
    }

    pub(crate) fn value_at(&self, index: usize) -> Option<&T> {
        self.nodes[index].value.as_ref()
    }

    pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.nodes[index].value.as_mut()
    }

    /// Link a new node right before the node at `next`, returning the slot of the new node
    pub(crate) fn link_before(&mut self, next: usize, item: T) -> usize {
        let prev = self.nodes[next].prev;
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let node = Node { prev, next, stamp, value: Some(item) };
        let index = match self.vacant.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            },
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            },
        };

        self.nodes[prev].next = index;
        self.nodes[next].prev = index;
        self.len += 1;
        index
    }

    /// Unlink the live node at `index` and return its element
    pub(crate) fn unlink(&mut self, index: usize) -> T {
        debug_assert!(index != GUARD);

        let Node { prev, next, .. } = self.nodes[index];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.len -= 1;

        let value = self.release(index);
        if self.len == 0 {
            self.reset_storage();
        }
        match value {
            Some(value) => value,
            None => unreachable!("linked node without an element"),
        }
    }

    /// Mark an already unlinked slot as vacant, returning the element it held
    fn release(&mut self, index: usize) -> Option<T> {
        let node = &mut self.nodes[index];
        node.stamp = UNSTAMPED;
        self.vacant.push(index);
        node.value.take()
    }

    /// With no nodes left, every slot but the guard can be released
    fn reset_storage(&mut self) {
        self.nodes.truncate(1);
        self.vacant.clear();
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |elem| self.push_back(elem));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

macro_rules! impl_list_partial_eq {
    ([$($vars:tt)*] $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for LinkedList<T> where
            T : PartialEq<U>
        {
            fn eq(&self, other: &$rhs) -> bool {
                self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
            }
        }
    };
}

impl_list_partial_eq!{ [] LinkedList<U> }
impl_list_partial_eq!{ [] [U] }
impl_list_partial_eq!{ [] &[U] }
impl_list_partial_eq!{ [const N: usize] [U; N] }

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for elem in self {
            elem.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
