use alloc::vec::Vec;
use core::cmp::Ordering::{Equal, Greater};
use core::fmt;
use core::mem;

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::raw::UpdateLog;
use crate::{Error, ItemRules, ListObserver, Notification, Result};

mod batch;
mod capacity;
mod journal;
mod lookup;

pub use batch::Batch;
pub(crate) use journal::{Journal, Undo};

/// A list kept sorted by caller-supplied [`ItemRules`], reporting every structural change to a
/// [`ListObserver`] as positional notifications.
///
/// Mutations performed between [`begin_batch`](SortedList::begin_batch) and
/// [`end_batch`](SortedList::end_batch) are coalesced: adjacent ranges merge, and an item that is
/// inserted and removed within the same batch is never reported at all. Outside a batch each
/// mutation is reported as soon as it happens. Either way, applying the notifications one after
/// the other to a copy of the list as it was before the mutation yields the list's current shape.
///
/// It is a logic error for the [`ItemRules::order`] of an item to change while it is in the list,
/// for example through interior mutability. The list never stores an item where it detects that
/// the order is broken; such operations fail with [`Error::OrderViolation`].
///
/// # Examples
///
/// ```
/// use sorted_list_diff::{Notification, Rules, SortedList};
///
/// let rules = Rules::new(
///     |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0),
///     |a: &(u32, char), b: &(u32, char)| a.0 == b.0,
///     |old: &(u32, char), new: &(u32, char)| old.1 == new.1,
/// );
/// let mut list = SortedList::new(rules, Vec::<Notification>::new());
///
/// list.begin_batch();
/// list.insert((3, 'c')).unwrap();
/// list.insert((1, 'a')).unwrap();
/// list.insert((2, 'b')).unwrap();
/// list.end_batch();
///
/// assert_eq!(list.as_slice(), &[(1, 'a'), (2, 'b'), (3, 'c')]);
/// assert_eq!(list.observer(), &[Notification::Inserted { position: 0, count: 3 }]);
/// ```
pub struct SortedList<T, R, O = ()> {
    items: Vec<T>,
    rules: R,
    observer: O,
    log: UpdateLog,
}

/// Contiguous runs of freshly merged items, as `(position, count)`.
pub(crate) type Runs = SmallVec<[(usize, usize); 4]>;

impl<T, R, O> SortedList<T, R, O> {
    /// Creates an empty list ordered by `rules` and reporting to `observer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, SortedList};
    ///
    /// let list: SortedList<i32, _> = SortedList::new(NaturalOrder, ());
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub fn new(rules: R, observer: O) -> Self {
        SortedList {
            items: Vec::new(),
            rules,
            observer,
            log: UpdateLog::new(),
        }
    }

    /// Returns the number of items in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` while a batch is open.
    #[must_use]
    pub const fn is_batching(&self) -> bool {
        self.log.is_batching()
    }

    /// Returns the rules ordering this list.
    #[must_use]
    pub const fn rules(&self) -> &R {
        &self.rules
    }

    /// Returns the observer notified by this list.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Returns the observer notified by this list, mutably.
    ///
    /// Notifications held back by an open batch have not reached the observer yet.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the list, returning its items in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Consumes the list, returning its items, rules and observer.
    ///
    /// Notifications still held back by an open batch are dropped.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, R, O) {
        (self.items, self.rules, self.observer)
    }
}

impl<T, R, O> SortedList<T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    // ─── Batching ────────────────────────────────────────────────────────────

    /// Starts holding back notifications until [`end_batch`](SortedList::end_batch).
    ///
    /// Batches do not nest: calling this while a batch is open does nothing, and the first
    /// `end_batch` closes the batch.
    pub fn begin_batch(&mut self) {
        if self.log.begin() {
            debug!(len = self.items.len(), "batch opened");
        }
    }

    /// Closes the open batch and delivers its coalesced notifications to the observer.
    ///
    /// Does nothing if no batch is open.
    pub fn end_batch(&mut self) {
        let Some(pending) = self.log.end() else {
            return;
        };
        debug!(notifications = pending.len(), len = self.items.len(), "batch closed");
        for notification in pending {
            trace!(?notification, "flushing");
            notification.dispatch(&mut self.observer);
        }
    }

    /// Opens a batch that closes when the returned guard is dropped.
    ///
    /// If a batch is already open, the guard leaves it open on drop.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, Notification, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, Vec::<Notification>::new());
    /// {
    ///     let mut batch = list.batch();
    ///     batch.insert(1).unwrap();
    ///     batch.insert(2).unwrap();
    ///     assert!(batch.observer().is_empty());
    /// }
    /// assert_eq!(list.observer(), &[Notification::Inserted { position: 0, count: 2 }]);
    /// ```
    pub fn batch(&mut self) -> Batch<'_, T, R, O> {
        Batch::new(self)
    }

    fn notify(&mut self, notification: Notification) {
        if self.log.is_batching() {
            self.log.push(notification);
        } else {
            trace!(?notification, "dispatching");
            notification.dispatch(&mut self.observer);
        }
    }

    // ─── Mutation ────────────────────────────────────────────────────────────

    /// Inserts `item` after every item that does not order after it, returning its position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderViolation`] if the rules' order is inconsistent and the item would
    /// not be sorted against its neighbours. Nothing is stored in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, ());
    /// assert_eq!(list.insert(20), Ok(0));
    /// assert_eq!(list.insert(10), Ok(0));
    /// assert_eq!(list.insert(20), Ok(2));
    /// assert_eq!(list.as_slice(), &[10, 20, 20]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) comparisons, O(n) moves.
    pub fn insert(&mut self, item: T) -> Result<usize> {
        let position = self.insertion_point(&item);
        self.check_fits(position, &item)?;
        self.items.insert(position, item);
        self.notify(Notification::Inserted { position, count: 1 });
        Ok(position)
    }

    /// Sorts `items` and merges them into the list in a single pass.
    ///
    /// Every contiguous block of new items is reported as one insertion. The work runs inside a
    /// batch, so blocks that end up adjacent are reported together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OrderViolation`] if the rules' order is inconsistent. The list is left as
    /// it was and none of `items` is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, Notification, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, Vec::<Notification>::new());
    /// list.add_all([10, 30]).unwrap();
    /// list.add_all([40, 5, 35]).unwrap();
    ///
    /// assert_eq!(list.as_slice(), &[5, 10, 30, 35, 40]);
    /// assert_eq!(
    ///     list.observer(),
    ///     &[
    ///         Notification::Inserted { position: 0, count: 2 },
    ///         Notification::Inserted { position: 0, count: 1 },
    ///         Notification::Inserted { position: 3, count: 2 },
    ///     ]
    /// );
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + m log m) for `m` new items.
    pub fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.merge_all(items).map(drop)
    }

    /// [`add_all`](SortedList::add_all), also handing back where the new items landed.
    pub(crate) fn merge_all<I>(&mut self, items: I) -> Result<Runs>
    where
        I: IntoIterator<Item = T>,
    {
        let mut incoming: Vec<T> = items.into_iter().collect();
        if incoming.is_empty() {
            return Ok(Runs::new());
        }
        incoming.sort_by(|a, b| self.rules.order(a, b));

        let opened = self.log.begin();
        let result = self.merge(incoming);
        if opened {
            self.end_batch();
        }
        result
    }

    fn merge(&mut self, incoming: Vec<T>) -> Result<Runs> {
        let existing = mem::take(&mut self.items);
        let mut merged = Vec::with_capacity(existing.len() + incoming.len());
        let mut runs = Runs::new();
        let mut existing = existing.into_iter().peekable();
        let mut violation = None;

        for item in incoming {
            while let Some(next) = existing.next_if(|e| self.rules.order(e, &item) != Greater) {
                merged.push(next);
            }
            let position = merged.len();
            let after_previous = merged.last().is_none_or(|prev| self.rules.order(prev, &item) != Greater);
            let before_next = existing.peek().is_none_or(|next| self.rules.order(&item, next) != Greater);
            if !(after_previous && before_next) {
                violation = Some(position);
                break;
            }
            match runs.last_mut() {
                Some((start, count)) if *start + *count == position => *count += 1,
                _ => runs.push((position, 1)),
            }
            merged.push(item);
        }

        if let Some(position) = violation {
            warn!(position, "order violation while merging, list left unchanged");
            // Put back only the items that were already in the list.
            let mut fresh = runs.iter().flat_map(|&(start, count)| start..start + count).peekable();
            self.items = merged
                .into_iter()
                .enumerate()
                .filter_map(|(index, item)| if fresh.next_if_eq(&index).is_some() { None } else { Some(item) })
                .chain(existing)
                .collect();
            return Err(Error::OrderViolation { position });
        }

        merged.extend(existing);
        self.items = merged;
        for &(position, count) in &runs {
            self.notify(Notification::Inserted { position, count });
        }
        Ok(runs)
    }

    /// Removes the item identical to `item` and returns it, or returns `None` if there is none.
    ///
    /// The item is located with [`index_of`](SortedList::index_of).
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, ());
    /// list.add_all([1, 2, 3]).unwrap();
    /// assert_eq!(list.remove(&2), Some(2));
    /// assert_eq!(list.remove(&2), None);
    /// ```
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let position = self.index_of(item)?;
        let removed = self.items.remove(position);
        self.notify(Notification::Removed { position, count: 1 });
        Some(removed)
    }

    /// Removes and returns the item at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `position >= len`.
    pub fn remove_item_at(&mut self, position: usize) -> Result<T> {
        Error::check_index(position, self.items.len())?;
        let removed = self.items.remove(position);
        self.notify(Notification::Removed { position, count: 1 });
        Ok(removed)
    }

    /// Removes `count` items starting at `position`, reported as a single removal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RangeOutOfBounds`] if `position + count > len`. Nothing is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{Error, NaturalOrder, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, ());
    /// list.add_all([1, 2, 3]).unwrap();
    /// assert_eq!(list.remove_at(0, 2), Ok(vec![1, 2]));
    /// assert_eq!(
    ///     list.remove_at(0, 5),
    ///     Err(Error::RangeOutOfBounds { position: 0, count: 5, len: 1 })
    /// );
    /// ```
    pub fn remove_at(&mut self, position: usize, count: usize) -> Result<Vec<T>> {
        Error::check_range(position, count, self.items.len())?;
        if count == 0 {
            return Ok(Vec::new());
        }
        let removed = self.items.drain(position..position + count).collect();
        self.notify(Notification::Removed { position, count });
        Ok(removed)
    }

    /// Replaces the item at `position` with `item`, returning where `item` ended up.
    ///
    /// If `item` still sorts between the neighbours of `position` it takes that slot, and a
    /// change is reported only when it differs from the item it replaces, either as a different
    /// item or by its content. Otherwise it is moved to where it sorts: a change is reported at
    /// `position` first if it differs, followed by a move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `position >= len`, and
    /// [`Error::OrderViolation`] if the rules' order is inconsistent. The list is unchanged in
    /// both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{Notification, Rules, SortedList};
    ///
    /// let rules = Rules::new(
    ///     |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0),
    ///     |a: &(u32, char), b: &(u32, char)| a.1 == b.1,
    ///     |old: &(u32, char), new: &(u32, char)| old == new,
    /// );
    /// let mut list = SortedList::new(rules, Vec::<Notification>::new());
    /// list.add_all([(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();
    /// list.observer_mut().clear();
    ///
    /// assert_eq!(list.update_at(0, (5, 'a')), Ok(2));
    /// assert_eq!(list.as_slice(), &[(2, 'b'), (3, 'c'), (5, 'a')]);
    /// assert_eq!(
    ///     list.observer(),
    ///     &[Notification::Changed { position: 0, count: 1 }, Notification::Moved { from: 0, to: 2 }]
    /// );
    /// ```
    pub fn update_at(&mut self, position: usize, item: T) -> Result<usize> {
        self.replace_at(position, item).map(|(target, _)| target)
    }

    /// [`update_at`](SortedList::update_at), also handing back the item that was replaced.
    pub(crate) fn replace_at(&mut self, position: usize, item: T) -> Result<(usize, T)> {
        Error::check_index(position, self.items.len())?;
        let existing = &self.items[position];
        let changed = !self.rules.same_item(existing, &item) || !self.rules.same_content(existing, &item);

        if self.rules.order(existing, &item) == Equal || self.fits_in_place(position, &item) {
            let previous = mem::replace(&mut self.items[position], item);
            if changed {
                self.notify(Notification::Changed { position, count: 1 });
            }
            return Ok((position, previous));
        }

        let previous = self.items.remove(position);
        let target = self.insertion_point(&item);
        if let Err(error) = self.check_fits(target, &item) {
            self.items.insert(position, previous);
            return Err(error);
        }
        self.items.insert(target, item);

        if changed {
            self.notify(Notification::Changed { position, count: 1 });
        }
        if target != position {
            self.notify(Notification::Moved { from: position, to: target });
        }
        Ok((target, previous))
    }

    /// Removes every item, reported as a single removal.
    pub fn clear(&mut self) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.items.clear();
        self.notify(Notification::Removed { position: 0, count });
    }

    // ─── Ordering helpers ────────────────────────────────────────────────────

    /// First position whose item orders strictly after `item`.
    fn insertion_point(&self, item: &T) -> usize {
        self.items.partition_point(|e| self.rules.order(e, item) != Greater)
    }

    /// Would `item` be sorted if it took the slot at `position`, replacing what is there?
    fn fits_in_place(&self, position: usize, item: &T) -> bool {
        let after_previous = position
            .checked_sub(1)
            .is_none_or(|prev| self.rules.order(&self.items[prev], item) != Greater);
        let before_next = self.items.get(position + 1).is_none_or(|next| self.rules.order(item, next) != Greater);
        after_previous && before_next
    }

    /// Checks that `item` is sorted if inserted at `position`, shifting what is there.
    fn check_fits(&self, position: usize, item: &T) -> Result<()> {
        let after_previous = position
            .checked_sub(1)
            .is_none_or(|prev| self.rules.order(&self.items[prev], item) != Greater);
        let before_next = self.items.get(position).is_none_or(|next| self.rules.order(item, next) != Greater);
        if after_previous && before_next {
            Ok(())
        } else {
            warn!(position, "order violation, item rejected");
            Err(Error::OrderViolation { position })
        }
    }
}

impl<T: fmt::Debug, R, O> fmt::Debug for SortedList<T, R, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
