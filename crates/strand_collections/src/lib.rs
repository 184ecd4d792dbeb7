//! Sequence containers with checked cursors.
//!
//! - [`DynArray`]: a contiguous array, growing by doubling and shrinking by halving once it is less than a quarter full.
//! - [`LinkedList`]: a circular doubly linked list anchored by a guard node.
//!
//! Both containers hand out const and mutable cursors implementing [`BidirectionalCursor`].
//! Every cursor movement and every use of a detached position is checked, misuse results in an [`Error`] instead of undefined behavior.

/// Implements `PartialEq` between a slice-like container and anything that can be viewed as a slice.
macro_rules! impl_slice_partial_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs where
            T : PartialEq<U>
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self.as_slice() == AsRef::<[U]>::as_ref(other) }
        }
    };
}
pub(crate) use impl_slice_partial_eq;

// Defined ahead of the modules, to be in textual scope for their tests
/// Create a [`DynArray`] containing the arguments, or `n` clones of an element.
///
/// ```
/// use strand_collections::dyn_array;
///
/// let arr = dyn_array![1, 2, 3];
/// assert_eq!(arr, [1, 2, 3]);
///
/// let arr = dyn_array![0u8; 4];
/// assert_eq!(arr, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from([$($x),+])
    };
}

/// Create a [`LinkedList`] containing the arguments.
///
/// ```
/// use strand_collections::linked_list;
///
/// let list = linked_list![1, 2, 3];
/// assert_eq!(list, [1, 2, 3]);
/// ```
#[macro_export]
macro_rules! linked_list {
    () => {
        $crate::LinkedList::new()
    };
    ($($x:expr),+ $(,)?) => {
        $crate::LinkedList::from([$($x),+])
    };
}

mod error;
mod identity;
mod logging;

pub mod cursor;
pub mod dyn_array;
pub mod linked_list;

pub use error::{Error, Result};
pub use cursor::BidirectionalCursor;
pub use dyn_array::DynArray;
pub use linked_list::LinkedList;

static_assertions::assert_impl_all!(dyn_array::Position: Copy, Send, Sync);
static_assertions::assert_impl_all!(linked_list::Position: Copy, Send, Sync);
static_assertions::assert_impl_all!(DynArray<u32>: Send, Sync);
static_assertions::assert_impl_all!(LinkedList<u32>: Send, Sync);
static_assertions::assert_not_impl_any!(DynArray<std::rc::Rc<u32>>: Send, Sync);
static_assertions::assert_not_impl_any!(LinkedList<std::rc::Rc<u32>>: Send, Sync);
static_assertions::assert_not_impl_any!(dyn_array::Cursor<'static, std::cell::Cell<u32>>: Send);
