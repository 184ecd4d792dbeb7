use core::{fmt, iter::FusedIterator, marker::PhantomData};

use super::{LinkedList, Node, GUARD};

/// Iterator over references to the elements of a [`LinkedList`], in list order.
pub struct Iter<'a, T: 'a> {
    list : &'a LinkedList<T>,
    head : usize,
    tail : usize,
    len  : usize,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a LinkedList<T>) -> Self {
        Self { list, head: list.nodes[GUARD].next, tail: list.nodes[GUARD].prev, len: list.len }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let list = self.list;
        let node = &list.nodes[self.head];
        self.head = node.next;
        self.len -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let list = self.list;
        let node = &list.nodes[self.tail];
        self.tail = node.prev;
        self.len -= 1;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { list: self.list, head: self.head, tail: self.tail, len: self.len }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

/// Iterator over mutable references to the elements of a [`LinkedList`], in list order.
pub struct IterMut<'a, T: 'a> {
    // Every node is visited at most once, so handing out a mutable reference per node never aliases
    nodes   : *mut Node<T>,
    head    : usize,
    tail    : usize,
    len     : usize,
    phantom : PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(list: &'a mut LinkedList<T>) -> Self {
        let head = list.nodes[GUARD].next;
        let tail = list.nodes[GUARD].prev;
        let len = list.len;
        Self { nodes: list.nodes.as_mut_ptr(), head, tail, len, phantom: PhantomData }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { &mut *self.nodes.add(self.head) };
        self.head = node.next;
        self.len -= 1;
        node.value.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { &mut *self.nodes.add(self.tail) };
        self.tail = node.prev;
        self.len -= 1;
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.len).finish()
    }
}

/// Owning iterator over the elements of a [`LinkedList`].
///
/// Created by [`LinkedList::into_iter`].
pub struct IntoIter<T> {
    list : LinkedList<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(list: LinkedList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
