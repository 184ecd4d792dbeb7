use crate::Result;

/// Behaviour shared by the const and mutable cursors of every container.
///
/// A cursor is either bound to an element, or to the end position, which sits one past the last element.
/// The end position can never be dereferenced, but it is a valid target to move to and from.
///
/// Every movement is checked: moving past the end or before the first element returns [`Error::InvalidIterator`] and leaves the cursor untouched.
///
/// [`Error::InvalidIterator`]: crate::Error::InvalidIterator
pub trait BidirectionalCursor: Sized {
    /// Element type of the container the cursor points into
    type Item;
    /// Detached position type, used to pass locations to a container's mutating methods
    type Position: Copy + Eq;

    /// Get a reference to the element at the cursor.
    ///
    /// Fails when the cursor is at the end position.
    fn current(&self) -> Result<&Self::Item>;

    /// Move the cursor one element forward, onto the end position when at the last element.
    fn move_next(&mut self) -> Result<()>;

    /// Move the cursor one element backward.
    fn move_prev(&mut self) -> Result<()>;

    /// Move the cursor `n` elements forward.
    ///
    /// The move is all-or-nothing: if any step would pass the end, the cursor stays where it was.
    fn advance_by(&mut self, n: usize) -> Result<()>;

    /// Move the cursor `n` elements backward.
    ///
    /// The move is all-or-nothing: if any step would pass the first element, the cursor stays where it was.
    fn retreat_by(&mut self, n: usize) -> Result<()>;

    /// Check if the cursor is at the end position
    fn is_end(&self) -> bool;

    /// Check if the cursor is at the first position (for an empty container, this is also the end position)
    fn is_begin(&self) -> bool;

    /// Get the detached position of the cursor
    fn position(&self) -> Self::Position;

    /// Move forward and return the position the cursor was at before moving
    fn post_next(&mut self) -> Result<Self::Position> {
        let before = self.position();
        self.move_next()?;
        Ok(before)
    }

    /// Move backward and return the position the cursor was at before moving
    fn post_prev(&mut self) -> Result<Self::Position> {
        let before = self.position();
        self.move_prev()?;
        Ok(before)
    }

    /// Consume the cursor and return it moved by `offset` elements, forward for positive offsets and backward for negative offsets.
    fn offset(mut self, offset: isize) -> Result<Self> {
        if offset >= 0 {
            self.advance_by(offset.unsigned_abs())?;
        } else {
            self.retreat_by(offset.unsigned_abs())?;
        }
        Ok(self)
    }
}

/// Implements `+`/`-` with a `usize` offset for a cursor type, returning a `Result` of the moved cursor.
macro_rules! impl_cursor_arith {
    ($($cursor:ident),*) => {
        $(
            impl<'a, T> core::ops::Add<usize> for $cursor<'a, T> {
                type Output = $crate::Result<Self>;

                fn add(mut self, rhs: usize) -> Self::Output {
                    $crate::BidirectionalCursor::advance_by(&mut self, rhs)?;
                    Ok(self)
                }
            }

            impl<'a, T> core::ops::Sub<usize> for $cursor<'a, T> {
                type Output = $crate::Result<Self>;

                fn sub(mut self, rhs: usize) -> Self::Output {
                    $crate::BidirectionalCursor::retreat_by(&mut self, rhs)?;
                    Ok(self)
                }
            }
        )*
    };
}
pub(crate) use impl_cursor_arith;
