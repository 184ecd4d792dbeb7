use core::fmt;

/// Collection error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// Tried to remove an element from a container without any elements
    EmptyContainer{ op: &'static str },
    /// Positional access outside of `[0, len)`
    IndexOutOfRange{ index: usize, len: usize },
    /// A cursor or position does not refer to a valid location for the operation
    InvalidIterator(&'static str),
    /// Access to a container whose storage was moved into another container
    UseAfterMove,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyContainer { op }        => f.write_fmt(format_args!("Cannot {op} on an empty container")),
            Error::IndexOutOfRange { index, len } => f.write_fmt(format_args!("Index out of range: the len is {len} but the index is {index}")),
            Error::InvalidIterator(reason)      => f.write_fmt(format_args!("Invalid iterator: {reason}")),
            Error::UseAfterMove                 => f.write_str("Tried to access a container after its storage was moved away"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
