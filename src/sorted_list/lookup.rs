use alloc::vec::Vec;
use core::cmp::Ordering::{Greater, Less};
use core::ops::Index;
use core::slice;

use super::SortedList;
use crate::{Error, ItemRules, Result};

impl<T, R, O> SortedList<T, R, O> {
    /// Returns the item at `position`, or `None` if it is out of bounds.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Returns the item at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `position >= len`.
    pub fn item_at(&self, position: usize) -> Result<&T> {
        self.items.get(position).ok_or(Error::IndexOutOfBounds {
            position,
            len: self.items.len(),
        })
    }

    /// Returns the first item in sorted order.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Returns the last item in sorted order.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns an iterator over the items in sorted order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the items in sorted order as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns a copy of the items in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Returns every item matching `predicate`, in sorted order.
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// Returns the first item, in sorted order, matching `predicate`.
    pub fn filter_one<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }
}

impl<T, R, O> SortedList<T, R, O>
where
    R: ItemRules<T>,
{
    /// Returns the position of the first item identical to `item`, scanning the whole list.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn position_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|e| self.rules.same_item(e, item))
    }

    /// Returns the position of an item identical to `item`.
    ///
    /// Items ordered equal to `item` are searched first, latest inserted first; the whole list is
    /// scanned only if none of them is identical, which happens when the ordering key of an item
    /// changed between versions.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{Rules, SortedList};
    ///
    /// let rules = Rules::new(
    ///     |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0),
    ///     |a: &(u32, char), b: &(u32, char)| a.1 == b.1,
    ///     |old: &(u32, char), new: &(u32, char)| old == new,
    /// );
    /// let mut list = SortedList::new(rules, ());
    /// list.add_all([(1, 'a'), (2, 'b'), (2, 'c')]).unwrap();
    ///
    /// assert_eq!(list.index_of(&(2, 'b')), Some(1));
    /// // Same identity, different key.
    /// assert_eq!(list.index_of(&(9, 'a')), Some(0));
    /// assert_eq!(list.index_of(&(2, 'z')), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n + k) for `k` equally ordered items, O(n) when falling back to a scan.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let start = self.items.partition_point(|e| self.rules.order(e, item) == Less);
        let end = start + self.items[start..].partition_point(|e| self.rules.order(e, item) != Greater);
        (start..end)
            .rev()
            .find(|&position| self.rules.same_item(&self.items[position], item))
            .or_else(|| self.position_of(item))
    }

    /// Returns `true` if the list holds an item identical to `item`.
    #[must_use]
    pub fn contains_item(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    /// Returns the stored item identical to `item`.
    #[must_use]
    pub fn find(&self, item: &T) -> Option<&T> {
        self.index_of(item).map(|position| &self.items[position])
    }
}

/// Indexes into the list by position.
///
/// # Panics
///
/// Panics if `position` is out of bounds.
///
/// # Examples
///
/// ```
/// use sorted_list_diff::{NaturalOrder, SortedList};
///
/// let mut list = SortedList::new(NaturalOrder, ());
/// list.add_all([30, 10, 20]).unwrap();
/// assert_eq!(list[1], 20);
/// ```
impl<T, R, O> Index<usize> for SortedList<T, R, O> {
    type Output = T;

    fn index(&self, position: usize) -> &Self::Output {
        self.items.get(position).expect("index out of bounds")
    }
}

impl<'a, T, R, O> IntoIterator for &'a SortedList<T, R, O> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{Error, Rules, SortedList};

    type Row = (u32, char);

    fn list_of(rows: &[Row]) -> SortedList<Row, impl crate::ItemRules<Row>> {
        let rules = Rules::new(|a: &Row, b: &Row| a.0.cmp(&b.0), |a: &Row, b: &Row| a.1 == b.1, |a: &Row, b: &Row| a == b);
        let mut list = SortedList::new(rules, ());
        list.add_all(rows.iter().copied()).unwrap();
        list
    }

    #[test]
    fn equal_run_prefers_latest_insert() {
        let mut list = list_of(&[(1, 'a'), (1, 'b')]);
        list.insert((1, 'a')).unwrap();
        assert_eq!(list.as_slice(), &[(1, 'a'), (1, 'b'), (1, 'a')]);
        assert_eq!(list.index_of(&(1, 'a')), Some(2));
        assert_eq!(list.position_of(&(1, 'a')), Some(0));
    }

    #[test]
    fn reads_report_bounds() {
        let list = list_of(&[(2, 'b'), (1, 'a')]);
        assert_eq!(list.item_at(1), Ok(&(2, 'b')));
        assert_eq!(list.item_at(2), Err(Error::IndexOutOfBounds { position: 2, len: 2 }));
        assert_eq!(list.get(2), None);
        assert_eq!(list.first(), Some(&(1, 'a')));
        assert_eq!(list.last(), Some(&(2, 'b')));
    }

    #[test]
    fn filters_keep_sorted_order() {
        let list = list_of(&[(3, 'c'), (1, 'a'), (2, 'b'), (4, 'd')]);
        assert_eq!(list.filter(|row| row.0 % 2 == 0), vec![&(2, 'b'), &(4, 'd')]);
        assert_eq!(list.filter_one(|row| row.0 > 1), Some(&(2, 'b')));
        assert_eq!(list.filter_one(|row| row.0 > 9), None);
        assert_eq!(list.find(&(0, 'c')), Some(&(3, 'c')));
        let collected: Vec<Row> = (&list).into_iter().copied().collect();
        assert_eq!(collected, list.snapshot());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_out_of_bounds_panics() {
        let list = list_of(&[(1, 'a')]);
        let _ = list[1];
    }
}
