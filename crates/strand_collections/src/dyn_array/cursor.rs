use core::{fmt, ptr};

use crate::{Error, Result, BidirectionalCursor, cursor::impl_cursor_arith};
use super::{DynArray, Position};

/// A cursor over a [`DynArray`], giving read access to the elements.
///
/// The cursor is either at an index in `[0, len)`, or at the end position `len`.
pub struct Cursor<'a, T: 'a> {
    arr   : &'a DynArray<T>,
    index : usize,
}

/// A cursor over a [`DynArray`], giving read and write access to the elements.
///
/// Next to moving around, the cursor can insert and remove elements at its location.
pub struct CursorMut<'a, T: 'a> {
    arr   : &'a mut DynArray<T>,
    index : usize,
}

fn check_advance(index: usize, n: usize, len: usize) -> Result<usize> {
    match index.checked_add(n) {
        Some(new_index) if new_index <= len => Ok(new_index),
        _ => Err(Error::InvalidIterator("cannot advance past the end")),
    }
}

fn check_retreat(index: usize, n: usize) -> Result<usize> {
    index.checked_sub(n).ok_or(Error::InvalidIterator("cannot retreat before the beginning"))
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(arr: &'a DynArray<T>, index: usize) -> Self {
        Self { arr, index }
    }

    /// Get the index of the cursor, the end position has an index equal to the length of the array
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get a reference to the element at the cursor, which lives as long as the array
    pub fn get(&self) -> Result<&'a T> {
        self.arr.as_slice().get(self.index).ok_or(Error::InvalidIterator("cannot dereference the end position"))
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
        ptr::eq(self.arr, other.arr) && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).field("current", &self.get().ok()).finish()
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
        self.index = check_advance(self.index, n, self.arr.len())?;
        Ok(())
    }

    fn retreat_by(&mut self, n: usize) -> Result<()> {
        self.index = check_retreat(self.index, n)?;
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.index == self.arr.len()
    }

    fn is_begin(&self) -> bool {
        self.index == 0
    }

    fn position(&self) -> Position {
        self.arr.position_at(self.index)
    }
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(arr: &'a mut DynArray<T>, index: usize) -> Self {
        Self { arr, index }
    }

    /// Get the index of the cursor, the end position has an index equal to the length of the array
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get a mutable reference to the element at the cursor
    pub fn current_mut(&mut self) -> Result<&mut T> {
        self.arr.as_mut_slice().get_mut(self.index).ok_or(Error::InvalidIterator("cannot dereference the end position"))
    }

    /// Get a read-only cursor at the same location
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.arr, self.index)
    }

    /// Insert an element before the cursor, the cursor keeps pointing at the same element
    pub fn insert_before(&mut self, item: T) {
        self.arr.insert_at(self.index, item);
        self.index += 1;
    }

    /// Remove the element at the cursor, the cursor moves to the element that followed it
    pub fn remove_current(&mut self) -> Result<T> {
        if self.index == self.arr.len() {
            return Err(Error::InvalidIterator("cannot erase the end position"));
        }
        Ok(self.arr.remove_at(self.index))
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(&*self.arr, &*other.arr) && self.index == other.index
    }
}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("index", &self.index).field("current", &self.as_cursor().get().ok()).finish()
    }
}

impl<'a, T> BidirectionalCursor for CursorMut<'a, T> {
    type Item = T;
    type Position = Position;

    fn current(&self) -> Result<&T> {
        self.arr.as_slice().get(self.index).ok_or(Error::InvalidIterator("cannot dereference the end position"))
    }

    fn move_next(&mut self) -> Result<()> {
        self.advance_by(1)
    }

    fn move_prev(&mut self) -> Result<()> {
        self.retreat_by(1)
    }

    fn advance_by(&mut self, n: usize) -> Result<()> {
        self.index = check_advance(self.index, n, self.arr.len())?;
        Ok(())
    }

    fn retreat_by(&mut self, n: usize) -> Result<()> {
        self.index = check_retreat(self.index, n)?;
        Ok(())
    }

    fn is_end(&self) -> bool {
        self.index == self.arr.len()
    }

    fn is_begin(&self) -> bool {
        self.index == 0
    }

    fn position(&self) -> Position {
        self.arr.position_at(self.index)
    }
}

impl_cursor_arith!(Cursor, CursorMut);
