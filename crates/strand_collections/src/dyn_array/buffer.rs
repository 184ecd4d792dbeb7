use core::{
    alloc::Layout,
    marker::PhantomData,
    mem,
    ptr::{self, NonNull},
};
use std::alloc;

/// Owned, uninitialized storage for a `DynArray`.
///
/// The buffer only tracks its allocation, it never knows which slots hold live elements.
/// Dropping the buffer releases the allocation without dropping any elements.
pub(super) struct RawBuffer<T> {
    ptr     : NonNull<T>,
    cap     : usize,
    phantom : PhantomData<T>,
}

impl<T> RawBuffer<T> {
    const IS_ZST : bool = mem::size_of::<T>() == 0;

    /// Create a buffer without an allocation
    pub(super) const fn new() -> Self {
        Self { ptr: NonNull::dangling(), cap: 0, phantom: PhantomData }
    }

    fn allocate(capacity: usize) -> NonNull<T> {
        // Zero sized types never need memory, only the capacity is tracked for them
        if Self::IS_ZST || capacity == 0 {
            return NonNull::dangling();
        }

        let layout = Self::layout(capacity);
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        }
    }

    fn layout(capacity: usize) -> Layout {
        match Layout::array::<T>(capacity) {
            Ok(layout) => layout,
            Err(_) => panic!("capacity overflow"),
        }
    }

    #[inline]
    pub(super) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(super) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(super) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Move the first `len` elements into a new allocation of `new_cap` slots, then release the old allocation.
    ///
    /// The swap to the new allocation happens in one step, `ptr` and `cap` are never observable in a mixed state.
    ///
    /// # Safety
    ///
    /// - `len` must be <= both the current capacity and `new_cap`
    /// - the slots `[0, len)` must be initialized
    pub(super) unsafe fn relocate(&mut self, len: usize, new_cap: usize) {
        debug_assert!(len <= self.cap && len <= new_cap);

        let new_ptr = Self::allocate(new_cap);
        ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);

        // The elements were moved bitwise, so the old buffer only needs to release its memory
        let old = mem::replace(self, Self { ptr: new_ptr, cap: new_cap, phantom: PhantomData });
        drop(old);
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if !Self::IS_ZST && self.cap != 0 {
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.cap)) };
        }
    }
}

unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}
