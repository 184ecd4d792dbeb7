use core::{fmt, ptr};

use crate::{Error, Result, BidirectionalCursor, cursor::impl_cursor_arith};
use super::{LinkedList, Position, GUARD};

/// A cursor over a [`LinkedList`], giving read access to the elements.
///
/// The cursor points at a node of the list, the guard node being the end position.
pub struct Cursor<'a, T: 'a> {
    list  : &'a LinkedList<T>,
    index : usize,
}

/// A cursor over a [`LinkedList`], giving read and write access to the elements.
///
/// Next to moving around, the cursor can link and unlink nodes at its location.
pub struct CursorMut<'a, T: 'a> {
    list  : &'a mut LinkedList<T>,
    index : usize,
}

/// Walk `n` nodes forward from `index`, only succeeding when no step passes the end
fn walk_forward<T>(list: &LinkedList<T>, mut index: usize, n: usize) -> Result<usize> {
    for _ in 0..n {
        if index == GUARD {
            return Err(Error::InvalidIterator("cannot advance past the end"));
        }
        index = list.next_of(index);
    }
    Ok(index)
}

/// Walk `n` nodes backward from `index`, only succeeding when no step passes the first node
fn walk_backward<T>(list: &LinkedList<T>, mut index: usize, n: usize) -> Result<usize> {
    for _ in 0..n {
        let prev = list.prev_of(index);
        if prev == GUARD {
            return Err(Error::InvalidIterator("cannot retreat before the beginning"));
        }
        index = prev;
    }
    Ok(index)
}

fn value_or_end<T>(value: Option<&T>) -> Result<&T> {
    value.ok_or(Error::InvalidIterator("cannot dereference the end position"))
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(list: &'a LinkedList<T>, index: usize) -> Self {
        Self { list, index }
    }

    /// Get a reference to the element at the cursor, which lives as long as the list
    pub fn get(&self) -> Result<&'a T> {
        value_or_end(self.list.value_at(self.index))
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("current", &self.get().ok()).finish()
    }
}

impl<'a, T> BidirectionalCursor for Cursor<'a, T> {
    type Item = T;
    type Position = Position;

    fn current(&self) -> Result<&T> {
        self.get()
    }

    fn move_next(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    fn move_prev(&mut self) -> Result<()> {
        self.retreat_by(1)
    }

    fn advance_by(&mut self, n: usize) -> Result<()> {
        self.index = walk_forward(self.list, self.index, n)?;
        Ok(())
    }

    fn retreat_by(&mut self, n: usize) -> Result<()> {
        self.index = walk_backward(self.list, self.index, n)?;
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.index == GUARD
    }

    fn is_begin(&self) -> bool {
        self.list.prev_of(self.index) == GUARD
    }

    fn position(&self) -> Position {
        self.list.position_at(self.index)
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(list: &'a mut LinkedList<T>, index: usize) -> Self {
        Self { list, index }
    }

    /// Get a mutable reference to the element at the cursor
    pub fn current_mut(&mut self) -> Result<&mut T> {
        self.list.value_at_mut(self.index).ok_or(Error::InvalidIterator("cannot dereference the end position"))
    }

    /// Get a read-only cursor at the same location
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.index)
    }

    /// Insert an element before the cursor, the cursor keeps pointing at the same node
    pub fn insert_before(&mut self, item: T) {
        self.list.link_before(self.index, item);
    }

    /// Insert an element after the cursor, the cursor keeps pointing at the same node.
    ///
    /// Fails at the end position, as nothing can follow the end.
    pub fn insert_after(&mut self, item: T) -> Result<()> {
        if self.index == GUARD {
            return Err(Error::InvalidIterator("cannot insert after the end position"));
        }
        let next = self.list.next_of(self.index);
        self.list.link_before(next, item);
        Ok(())
    }

    /// Remove the element at the cursor, the cursor moves to the node that followed it
    pub fn remove_current(&mut self) -> Result<T> {
        if self.index == GUARD {
            return Err(Error::InvalidIterator("cannot erase the end position"));
        }
        let next = self.list.next_of(self.index);
        let value = self.list.unlink(self.index);
        self.index = next;
        Ok(value)
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(&*self.list, &*other.list) && self.index == other.index
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("current", &self.as_cursor().get().ok()).finish()
    }
}

impl<'a, T> BidirectionalCursor for CursorMut<'a, T> {
    type Item = T;
    type Position = Position;

    fn current(&self) -> Result<&T> {
        value_or_end(self.list.value_at(self.index))
    }

    fn move_next(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    fn move_prev(&mut self) -> Result<()> {
        self.retreat_by(1)
    }

    fn advance_by(&mut self, n: usize) -> Result<()> {
        self.index = walk_forward(self.list, self.index, n)?;
        Ok(())
    }

    fn retreat_by(&mut self, n: usize) -> Result<()> {
        self.index = walk_backward(self.list, self.index, n)?;
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.index == GUARD
    }

    fn is_begin(&self) -> bool {
        self.list.prev_of(self.index) == GUARD
    }

    fn position(&self) -> Position {
        self.list.position_at(self.index)
    }
}

impl_cursor_arith!(Cursor, CursorMut);
