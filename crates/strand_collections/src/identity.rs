use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTAINER_ID : AtomicU64 = AtomicU64::new(1);

/// Unique identity of a container's storage.
///
/// Positions remember the identity of the storage they were taken from, so a position can't be used on another container.
/// Moving a container's storage moves its identity with it, the moved-from container receives a fresh identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}
