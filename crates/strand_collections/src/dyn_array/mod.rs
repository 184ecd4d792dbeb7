use core::{
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Deref, DerefMut, Index, IndexMut, Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
    ptr,
    slice,
};

use crate::{
    Error, Result,
    identity::ContainerId,
    logging::log_capacity,
    impl_slice_partial_eq,
};

mod buffer;
mod cursor;
mod into_iter;

#[cfg(test)]
mod tests;

use buffer::RawBuffer;
pub use cursor::{Cursor, CursorMut};
pub use into_iter::IntoIter;

/// A contiguous growable array, with a capacity that follows its length in both directions.
///
/// The capacity starts at 0 and the first insertion allocates room for 8 elements.
/// When the array is full, the capacity is doubled.
/// After a removal leaves the array less than a quarter full, the capacity is halved, but it never drops below 8 once allocated.
/// Doubling on growth and halving at a quarter means an array that just shrunk can't immediately grow again.
///
/// # Examples
///
/// ```
/// use strand_collections::{dyn_array, BidirectionalCursor};
///
/// let mut arr = dyn_array![1, 2, 4];
/// let pos = (arr.cbegin() + 2)?.position();
/// arr.insert(pos, 3)?;
/// arr.push_front(0);
/// assert_eq!(arr, [0, 1, 2, 3, 4]);
///
/// assert_eq!(arr.pop_back()?, 4);
/// assert_eq!(arr.pop_front()?, 0);
/// assert_eq!(arr[0], 1);
/// # Ok::<(), strand_collections::Error>(())
/// ```
///
/// # Positions
///
/// Mutating methods take a [`Position`], a detached location that doesn't borrow the array.
/// Positions are created from the array's cursors, see [`DynArray::cbegin`] and [`DynArray::cend`].
///
/// Any reallocation (growth or shrink) invalidates every position taken before it.
/// Using an invalidated position, or a position of another array, results in [`Error::InvalidIterator`].
///
/// # Moving
///
/// [`DynArray::take`] moves the storage out of an array, leaving it empty.
/// Indexing into a moved-from array results in [`Error::UseAfterMove`], until an element is inserted into it again.
pub struct DynArray<T> {
    buf        : RawBuffer<T>,
    len        : usize,
    id         : ContainerId,
    generation : u64,
    moved      : bool,
}

/// Detached location in a [`DynArray`], either an element or the end position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    container  : ContainerId,
    generation : u64,
    index      : usize,
}

impl Position {
    /// Get the index the position refers to
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> DynArray<T> {
    /// Capacity of the first allocation, and the floor the capacity is never shrunk below
    pub const MIN_CAPACITY : usize = 8;

    /// Create a new empty array, this does not allocate
    #[must_use]
    pub fn new() -> Self {
        Self { buf: RawBuffer::new(), len: 0, id: ContainerId::next(), generation: 0, moved: false }
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

    /// Get the number of elements the array can hold before it needs to grow
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Check if the storage of the array was moved away, see [`DynArray::take`]
    #[inline]
    #[must_use]
    pub fn is_moved_from(&self) -> bool {
        self.moved
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Get a reference to the element at `index`
    ///
    /// Fails with [`Error::UseAfterMove`] when the storage was moved away, and with [`Error::IndexOutOfRange`] when `index >= len`
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(unsafe { &*self.buf.as_ptr().add(index) })
    }

    /// Get a mutable reference to the element at `index`
    ///
    /// Fails with [`Error::UseAfterMove`] when the storage was moved away, and with [`Error::IndexOutOfRange`] when `index >= len`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_index(index)?;
        Ok(unsafe { &mut *self.buf.as_mut_ptr().add(index) })
    }

    /// Append an element to the back of the array
    pub fn push_back(&mut self, item: T) {
        self.insert_at(self.len, item);
    }

    /// Prepend an element to the front of the array, shifting every other element one slot back
    pub fn push_front(&mut self, item: T) {
        self.insert_at(0, item);
    }

    /// Insert an element right before `pos`, `pos` may be the end position
    pub fn insert(&mut self, pos: Position, item: T) -> Result<()> {
        let index = self.resolve(pos)?;
        self.insert_at(index, item);
        Ok(())
    }

    /// Remove and return the first element
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "pop_front" });
        }
        Ok(self.remove_at(0))
    }

    /// Remove and return the last element
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "pop_back" });
        }
        Ok(self.remove_at(self.len - 1))
    }

    /// Remove and return the element at `pos`
    pub fn erase(&mut self, pos: Position) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer{ op: "erase" });
        }

        let index = self.resolve(pos)?;
        if index == self.len {
            return Err(Error::InvalidIterator("cannot erase the end position"));
        }
        Ok(self.remove_at(index))
    }

    /// Remove the elements in `[first, last)`, returning the number of removed elements.
    ///
    /// An empty range is a no-op.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<usize> {
        let start = self.resolve(first)?;
        let end = self.resolve(last)?;
        if start > end {
            return Err(Error::InvalidIterator("range start is past the range end"));
        }

        let count = end - start;
        if count == 0 {
            return Ok(0);
        }

        {
            let base = self.buf.as_mut_ptr();
            let tail_len = self.len - end;

            // Elements are logically removed before their destructors run, the tail is moved into place even if a destructor panics
            self.len = start;
            let len_guard = scopeguard::guard(&mut self.len, move |len| unsafe {
                ptr::copy(base.add(end), base.add(start), tail_len);
                *len = start + tail_len;
            });
            unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base.add(start), count)) };
            drop(len_guard);
        }

        self.shrink_if_sparse();
        Ok(count)
    }

    /// Remove all elements, shrinking the capacity down to the minimum capacity
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), len)) };
        self.shrink_if_sparse();
    }

    #[inline]
    pub fn contains(&self, x: &T) -> bool
        where T : PartialEq
    {
        self.as_slice().contains(x)
    }

    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[inline]
    #[must_use]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    #[must_use]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Get a mutable cursor at the first element
    pub fn begin(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    /// Get a mutable cursor at the end position
    pub fn end(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// Get a cursor at the first element
    pub fn cbegin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Get a cursor at the end position
    pub fn cend(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len)
    }

    /// Move the storage out of this array into a new array.
    ///
    /// Positions taken from this array stay valid for the returned array.
    /// This array is left empty, with its storage marked as moved.
    pub fn take(&mut self) -> Self {
        Self {
            buf: mem::replace(&mut self.buf, RawBuffer::new()),
            len: mem::replace(&mut self.len, 0),
            id: mem::replace(&mut self.id, ContainerId::next()),
            generation: self.generation,
            moved: mem::replace(&mut self.moved, true),
        }
    }

    /// Drop the current elements and move the storage of `other` into this array, see [`DynArray::take`]
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    pub(crate) fn position_at(&self, index: usize) -> Position {
        Position { container: self.id, generation: self.generation, index }
    }

    /// Resolve a position to an index in `[0, len]`
    pub(crate) fn resolve(&self, pos: Position) -> Result<usize> {
        if pos.container != self.id {
            Err(Error::InvalidIterator("position belongs to another container"))
        } else if pos.generation != self.generation {
            Err(Error::InvalidIterator("position was invalidated by a reallocation"))
        } else if pos.index > self.len {
            Err(Error::InvalidIterator("position is past the end"))
        } else {
            Ok(pos.index)
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if self.moved {
            Err(Error::UseAfterMove)
        } else if index >= self.len {
            Err(Error::IndexOutOfRange{ index, len: self.len })
        } else {
            Ok(())
        }
    }

    fn insert_at(&mut self, index: usize, item: T) {
        debug_assert!(index <= self.len);

        self.moved = false;
        self.grow_if_full();
        unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            if index < self.len {
                ptr::copy(slot, slot.add(1), self.len - index);
            }
            ptr::write(slot, item);
        }
        self.len += 1;
    }

    fn remove_at(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);

        let item = unsafe {
            let slot = self.buf.as_mut_ptr().add(index);
            let item = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            item
        };
        self.len -= 1;
        self.shrink_if_sparse();
        item
    }

    fn grow_if_full(&mut self) {
        let cap = self.buf.capacity();
        if self.len == cap {
            let new_cap = if cap == 0 {
                Self::MIN_CAPACITY
            } else {
                match cap.checked_mul(2) {
                    Some(new_cap) => new_cap,
                    None => panic!("capacity overflow"),
                }
            };
            self.set_capacity(new_cap);
        }
    }

    fn shrink_if_sparse(&mut self) {
        let cap = self.buf.capacity();
        let mut new_cap = cap;
        while new_cap > Self::MIN_CAPACITY && self.len < new_cap / 4 {
            new_cap /= 2;
        }

        if new_cap != cap {
            self.set_capacity(new_cap);
        }
    }

    fn set_capacity(&mut self, new_cap: usize) {
        log_capacity!("reallocating {} -> {} slots for {} elements", self.buf.capacity(), new_cap, self.len);

        unsafe { self.buf.relocate(self.len, new_cap) };
        self.generation += 1;
    }
}

impl<T: Clone> DynArray<T> {
    /// Create an array containing `n` clones of `elem`
    pub fn from_elem(elem: T, n: usize) -> Self {
        let mut arr = Self::new();
        arr.extend(core::iter::repeat(elem).take(n));
        arr
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // `RawBuffer` releases the memory itself
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr(), self.len)) };
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        if let Err(err) = self.check_index(index) {
            panic!("{err}");
        }
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        if let Err(err) = self.check_index(index) {
            panic!("{err}");
        }
        &mut self.as_mut_slice()[index]
    }
}

macro_rules! impl_range_index {
    ($($range:ty),*) => {
        $(
            impl<T> Index<$range> for DynArray<T> {
                type Output = [T];

                fn index(&self, index: $range) -> &[T] {
                    if self.moved {
                        panic!("{}", Error::UseAfterMove);
                    }
                    Index::index(self.as_slice(), index)
                }
            }

            impl<T> IndexMut<$range> for DynArray<T> {
                fn index_mut(&mut self, index: $range) -> &mut [T] {
                    if self.moved {
                        panic!("{}", Error::UseAfterMove);
                    }
                    IndexMut::index_mut(self.as_mut_slice(), index)
                }
            }
        )*
    };
}
impl_range_index!(Range<usize>, RangeFrom<usize>, RangeTo<usize>, RangeFull, RangeInclusive<usize>, RangeToInclusive<usize>);

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |elem| self.push_back(elem));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl_slice_partial_eq!{ [] DynArray<T>, DynArray<U> }
impl_slice_partial_eq!{ [] DynArray<T>, [U] }
impl_slice_partial_eq!{ [] DynArray<T>, &[U] }
impl_slice_partial_eq!{ [const N: usize] DynArray<T>, [U; N] }

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}
