use core::{
    fmt,
    iter::FusedIterator,
    mem::{self, ManuallyDrop},
    ptr, slice,
};

use super::{buffer::RawBuffer, DynArray};

/// Owning iterator over the elements of a [`DynArray`].
///
/// Created by [`DynArray::into_iter`].
pub struct IntoIter<T> {
    buf  : RawBuffer<T>,
    head : usize,
    tail : usize,
}

impl<T> IntoIter<T> {
    pub(super) fn new(arr: DynArray<T>) -> Self {
        // The elements now belong to the iterator, so the array's destructor must not run
        let mut arr = ManuallyDrop::new(arr);
        let len = arr.len;
        let buf = mem::replace(&mut arr.buf, RawBuffer::new());
        Self { buf, head: 0, tail: len }
    }

    /// Get the elements that have not been yielded yet
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.head), self.tail - self.head) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        let item = unsafe { ptr::read(self.buf.as_ptr().add(self.head)) };
        self.head += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.tail)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(unsafe { self.buf.as_mut_ptr().add(self.head) }, self.tail - self.head);
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
