//! Feature gated diagnostics.
//!
//! When the corresponding feature is disabled, the macros expand to nothing and their arguments are never evaluated.

cfg_if::cfg_if! {
    if #[cfg(feature = "capacity_logging")] {
        pub(crate) const CAPACITY_LOG_CAT : strand_logging::LogCategory = strand_logging::LogCategory::new_with_sub("Collections", "DynArray");

        macro_rules! log_capacity {
            ($format:expr, $($arg:expr),*) => {
                strand_logging::log_verbose!($crate::logging::CAPACITY_LOG_CAT, $format, $($arg),*);
            };
        }
    } else {
        macro_rules! log_capacity {
            ($format:expr, $($arg:expr),*) => {};
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "link_logging")] {
        pub(crate) const LINK_LOG_CAT : strand_logging::LogCategory = strand_logging::LogCategory::new_with_sub("Collections", "LinkedList");

        macro_rules! log_links {
            ($format:expr, $($arg:expr),*) => {
                strand_logging::log_verbose!($crate::logging::LINK_LOG_CAT, $format, $($arg),*);
            };
        }
    } else {
        macro_rules! log_links {
            ($format:expr, $($arg:expr),*) => {};
        }
    }
}

pub(crate) use log_capacity;
pub(crate) use log_links;
