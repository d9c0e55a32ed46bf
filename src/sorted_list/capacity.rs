use alloc::vec::Vec;

use super::SortedList;
use crate::raw::UpdateLog;

impl<T, R, O> SortedList<T, R, O> {
    /// Creates an empty list with room for at least `capacity` items.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, SortedList};
    ///
    /// let list: SortedList<i32, _> = SortedList::with_capacity(NaturalOrder, (), 16);
    /// assert!(list.is_empty());
    /// assert!(list.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(rules: R, observer: O, capacity: usize) -> Self {
        SortedList {
            items: Vec::with_capacity(capacity),
            rules,
            observer,
            log: UpdateLog::new(),
        }
    }

    /// Returns how many items the list can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserves room for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Shrinks the backing storage as close to the current length as possible.
    pub fn shrink_to_fit(&mut self) {
        self.items.shrink_to_fit();
    }
}
