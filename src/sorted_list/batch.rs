use core::fmt;
use core::ops::{Deref, DerefMut};

use super::SortedList;
use crate::{ItemRules, ListObserver};

/// A batch scope over a [`SortedList`], created by [`SortedList::batch`].
///
/// Dereferences to the list. Dropping the guard closes the batch and delivers the coalesced
/// notifications, unless the batch was already open when the guard was created.
#[must_use = "the batch closes as soon as the guard is dropped"]
pub struct Batch<'a, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    list: &'a mut SortedList<T, R, O>,
    opened: bool,
}

impl<'a, T, R, O> Batch<'a, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    pub(super) fn new(list: &'a mut SortedList<T, R, O>) -> Self {
        let opened = !list.is_batching();
        list.begin_batch();
        Batch { list, opened }
    }

    /// Returns `true` if dropping this guard closes the batch.
    #[must_use]
    pub const fn owns_batch(&self) -> bool {
        self.opened
    }
}

impl<T, R, O> Deref for Batch<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    type Target = SortedList<T, R, O>;

    fn deref(&self) -> &Self::Target {
        self.list
    }
}

impl<T, R, O> DerefMut for Batch<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.list
    }
}

impl<T, R, O> Drop for Batch<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    fn drop(&mut self) {
        if self.opened {
            self.list.end_batch();
        }
    }
}

impl<T: fmt::Debug, R, O> fmt::Debug for Batch<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch").field("list", &self.list).field("opened", &self.opened).finish()
    }
}
