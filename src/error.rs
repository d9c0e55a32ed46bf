/// Errors returned by [`SortedList`](crate::SortedList) and [`Editor`](crate::Editor) operations.
///
/// A missing item is never an error: removals and replacements of items that are not in the list
/// are silent no-ops.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// A single position was outside `0..len`.
    #[error("position {position} is out of bounds for a list of length {len}")]
    IndexOutOfBounds {
        /// The requested position.
        position: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },

    /// A positional range was not contained in `0..len`.
    #[error("range of {count} starting at {position} is out of bounds for a list of length {len}")]
    RangeOutOfBounds {
        /// First position of the requested range.
        position: usize,
        /// Number of elements in the requested range.
        count: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },

    /// The comparator placed an item where it is not ordered against its neighbours.
    ///
    /// This only happens with a comparator that is not a total order. The offending operation
    /// stores nothing.
    #[error("comparator is inconsistent: item does not fit at position {position}")]
    OrderViolation {
        /// The position the item would have been stored at.
        position: usize,
    },
}

/// A `Result` alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

impl Error {
    /// Checks that `count` elements starting at `position` exist in a list of length `len`.
    pub(crate) fn check_range(position: usize, count: usize, len: usize) -> Result<()> {
        match position.checked_add(count) {
            Some(end) if end <= len => Ok(()),
            _ => Err(Error::RangeOutOfBounds { position, count, len }),
        }
    }

    /// Checks that `position` addresses an existing element in a list of length `len`.
    pub(crate) fn check_index(position: usize, len: usize) -> Result<()> {
        if position < len { Ok(()) } else { Err(Error::IndexOutOfBounds { position, len }) }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Error: Copy, Send, Sync, core::error::Error);

    #[test]
    fn range_check_rejects_overflow() {
        assert_eq!(
            Error::check_range(usize::MAX, 2, 10),
            Err(Error::RangeOutOfBounds { position: usize::MAX, count: 2, len: 10 })
        );
    }

    #[test]
    fn range_check_accepts_empty_tail() {
        assert_eq!(Error::check_range(3, 0, 3), Ok(()));
        assert!(Error::check_range(4, 0, 3).is_err());
    }

    #[test]
    fn messages_name_the_bounds() {
        let message = Error::RangeOutOfBounds { position: 0, count: 5, len: 3 }.to_string();
        assert_eq!(message, "range of 5 starting at 0 is out of bounds for a list of length 3");
        let message = Error::IndexOutOfBounds { position: 7, len: 2 }.to_string();
        assert_eq!(message, "position 7 is out of bounds for a list of length 2");
    }
}
