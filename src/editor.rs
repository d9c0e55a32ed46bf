use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use tracing::{debug, trace, warn};

use crate::sorted_list::{Journal, Undo};
use crate::{ItemRules, ListObserver, Result, SortedList};

/// A mutation queued on an [`Editor`], applied when the editor commits.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action<T> {
    /// Insert one item.
    Add(T),
    /// Merge items, already sorted, into the list.
    AddAll(Vec<T>),
    /// Remove the item identical to this one, if any.
    Remove(T),
    /// Remove the items identical to each of these, if any.
    RemoveEach(Vec<T>),
    /// Update the identical item in place, or insert if there is none.
    Replace(T),
    /// Update every identical item in place and insert the rest. Items not mentioned stay.
    ReplaceAll(Vec<T>),
    /// Remove `count` items starting at `position`.
    RemoveRange { position: usize, count: usize },
    /// Remove every item.
    Clear,
}

impl<T> Action<T> {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Add(_) => "add",
            Action::AddAll(_) => "add_all",
            Action::Remove(_) => "remove",
            Action::RemoveEach(_) => "remove_each",
            Action::Replace(_) => "replace",
            Action::ReplaceAll(_) => "replace_all",
            Action::RemoveRange { .. } => "remove_range",
            Action::Clear => "clear",
        }
    }

    /// Applies the action, recording in `journal` how to take back each change it makes.
    fn apply<R, O>(self, list: &mut SortedList<T, R, O>, journal: &mut Journal<T>) -> Result<()>
    where
        R: ItemRules<T>,
        O: ListObserver,
    {
        match self {
            Action::Add(item) => {
                let position = list.insert(item)?;
                journal.record(Undo::Inserted { position, count: 1 });
            }
            Action::AddAll(items) => merge(list, journal, items)?,
            Action::Remove(item) => remove(list, journal, &item)?,
            Action::RemoveEach(items) => {
                for item in &items {
                    remove(list, journal, item)?;
                }
            }
            Action::Replace(item) => match list.index_of(&item) {
                Some(position) => update(list, journal, position, item)?,
                None => {
                    let position = list.insert(item)?;
                    journal.record(Undo::Inserted { position, count: 1 });
                }
            },
            Action::ReplaceAll(items) => {
                let mut fresh = Vec::new();
                for item in items {
                    // Looked up one at a time: an earlier update may have moved things.
                    match list.index_of(&item) {
                        Some(position) => update(list, journal, position, item)?,
                        None => fresh.push(item),
                    }
                }
                merge(list, journal, fresh)?;
            }
            Action::RemoveRange { position, count } => {
                let items = list.remove_at(position, count)?;
                journal.record(Undo::Removed { position, items });
            }
            Action::Clear => {
                let len = list.len();
                let items = list.remove_at(0, len)?;
                journal.record(Undo::Removed { position: 0, items });
            }
        }
        Ok(())
    }
}

fn merge<T, R, O>(list: &mut SortedList<T, R, O>, journal: &mut Journal<T>, items: Vec<T>) -> Result<()>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    for (position, count) in list.merge_all(items)? {
        journal.record(Undo::Inserted { position, count });
    }
    Ok(())
}

fn remove<T, R, O>(list: &mut SortedList<T, R, O>, journal: &mut Journal<T>, item: &T) -> Result<()>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    if let Some(position) = list.index_of(item) {
        let removed = list.remove_item_at(position)?;
        journal.record(Undo::Removed { position, items: vec![removed] });
    }
    Ok(())
}

fn update<T, R, O>(list: &mut SortedList<T, R, O>, journal: &mut Journal<T>, position: usize, item: T) -> Result<()>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    let (to, previous) = list.replace_at(position, item)?;
    journal.record(Undo::Replaced { from: position, to, previous });
    Ok(())
}

impl<T, R, O> SortedList<T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    /// Starts an edit session. Nothing queued on the editor touches the list before
    /// [`Editor::commit`].
    #[must_use = "queued actions are discarded unless the editor commits"]
    pub fn edit(&mut self) -> Editor<'_, T, R, O> {
        Editor {
            list: self,
            actions: Vec::new(),
        }
    }
}

/// Queues mutations against a [`SortedList`] and applies them as one batch.
///
/// Every queueing method returns the editor so calls can be chained. Filters read the list as it
/// is now, not as it will be after the queued actions run.
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
/// list.edit().add_all([(1, 'a'), (3, 'c'), (2, 'b')]).commit().unwrap();
/// assert_eq!(list.observer(), &[Notification::Inserted { position: 0, count: 3 }]);
///
/// list.observer_mut().clear();
/// list.edit().replace((2, 'B')).commit().unwrap();
/// assert_eq!(list[1], (2, 'B'));
/// assert_eq!(list.observer(), &[Notification::Changed { position: 1, count: 1 }]);
/// ```
pub struct Editor<'a, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    list: &'a mut SortedList<T, R, O>,
    actions: Vec<Action<T>>,
}

impl<T, R, O> Editor<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    // ─── Queueing ────────────────────────────────────────────────────────────

    /// Queues the insertion of `item`.
    pub fn add(&mut self, item: T) -> &mut Self {
        self.actions.push(Action::Add(item));
        self
    }

    /// Queues the insertion of `items`. They are sorted now so they merge as contiguous blocks.
    pub fn add_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();
        let rules = self.list.rules();
        items.sort_by(|a, b| rules.order(a, b));
        self.actions.push(Action::AddAll(items));
        self
    }

    /// Queues the removal of the item identical to `item`. Missing items are ignored.
    pub fn remove(&mut self, item: T) -> &mut Self {
        self.actions.push(Action::Remove(item));
        self
    }

    /// Queues the removal of the items identical to each of `items`. Missing items are ignored.
    pub fn remove_each<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.actions.push(Action::RemoveEach(items.into_iter().collect()));
        self
    }

    /// Queues an upsert: the identical item is updated where it is, or `item` is inserted.
    pub fn replace(&mut self, item: T) -> &mut Self {
        self.actions.push(Action::Replace(item));
        self
    }

    /// Queues an upsert of every item in `items`.
    ///
    /// Items already present are updated in place, so the ones whose order does not change never
    /// move and the ones whose content does not change are not reported. The others are inserted.
    /// Items in the list that `items` does not mention are kept.
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
    /// list.add_all([(1, 'a'), (2, 'b')]).unwrap();
    /// list.observer_mut().clear();
    ///
    /// list.edit().replace_all([(2, 'B'), (3, 'c')]).commit().unwrap();
    ///
    /// assert_eq!(list.as_slice(), &[(1, 'a'), (2, 'B'), (3, 'c')]);
    /// assert_eq!(
    ///     list.observer(),
    ///     &[Notification::Changed { position: 1, count: 1 }, Notification::Inserted { position: 2, count: 1 }]
    /// );
    /// ```
    pub fn replace_all<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
    {
        self.actions.push(Action::ReplaceAll(items.into_iter().collect()));
        self
    }

    /// Queues the removal of every item.
    pub fn remove_all(&mut self) -> &mut Self {
        self.actions.push(Action::Clear);
        self
    }

    /// Queues the removal of `count` items starting at `position`.
    ///
    /// The range is checked against the list as it is when the action runs; an out-of-bounds
    /// range makes [`commit`](Editor::commit) fail.
    pub fn remove_by_index(&mut self, position: usize, count: usize) -> &mut Self {
        self.actions.push(Action::RemoveRange { position, count });
        self
    }

    // ─── Committing ──────────────────────────────────────────────────────────

    /// Applies every queued action in order inside one batch, then empties the queue.
    ///
    /// Committing an empty queue does nothing.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing action. The commit is then taken back as a whole:
    /// the list holds what it held before, the observer hears nothing of it, and the queue is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{Error, NaturalOrder, Notification, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, Vec::<Notification>::new());
    /// let result = list.edit().add(1).remove_by_index(5, 1).commit();
    ///
    /// assert_eq!(result, Err(Error::RangeOutOfBounds { position: 5, count: 1, len: 1 }));
    /// assert!(list.is_empty());
    /// assert!(list.observer().is_empty());
    /// ```
    pub fn commit(&mut self) -> Result<()> {
        if self.actions.is_empty() {
            return Ok(());
        }
        debug!(actions = self.actions.len(), "committing edit");
        let actions = mem::take(&mut self.actions);
        let mut batch = self.list.batch();
        let mut journal = batch.journal();
        for action in actions {
            let name = action.name();
            trace!(action = name, "applying");
            if let Err(error) = action.apply(&mut *batch, &mut journal) {
                warn!(action = name, %error, "edit failed, rolling back");
                batch.roll_back(journal);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Returns the queued actions in the order they will run.
    #[must_use]
    pub fn pending(&self) -> &[Action<T>] {
        &self.actions
    }

    /// Returns the number of queued actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Drops every queued action without applying it.
    pub fn discard(&mut self) {
        self.actions.clear();
    }

    // ─── Reconciliation ──────────────────────────────────────────────────────

    /// Keeps the items of `items` that have an identical item in the list, and returns them.
    ///
    /// `items` is consumed: the returned vector is the input with the unmatched items pruned.
    /// Clone it first to keep the original.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_list_diff::{NaturalOrder, SortedList};
    ///
    /// let mut list = SortedList::new(NaturalOrder, ());
    /// list.add_all([1, 2, 3]).unwrap();
    /// let editor = list.edit();
    ///
    /// assert_eq!(editor.filter_contains(vec![4, 3, 1]), [3, 1]);
    /// assert_eq!(editor.filter_first(vec![4, 3, 1]), [4]);
    /// ```
    #[must_use]
    pub fn filter_contains(&self, mut items: Vec<T>) -> Vec<T> {
        items.retain(|item| self.list.contains_item(item));
        items
    }

    /// Keeps the items of `items` that have no identical item in the list, and returns them.
    #[must_use]
    pub fn filter_first(&self, mut items: Vec<T>) -> Vec<T> {
        items.retain(|item| !self.list.contains_item(item));
        items
    }

    /// Keeps the items of `items` that have an identical item in the list with different
    /// content, i.e. the items an upsert would report as changed.
    #[must_use]
    pub fn filter_contains_and_new(&self, items: Vec<T>) -> Vec<T> {
        let mut items = self.filter_contains(items);
        let rules = self.list.rules();
        items.retain(|item| self.list.find(item).is_some_and(|existing| !rules.same_content(existing, item)));
        items
    }
}

impl<T: fmt::Debug, R, O> fmt::Debug for Editor<'_, T, R, O>
where
    R: ItemRules<T>,
    O: ListObserver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor").field("actions", &self.actions).finish_non_exhaustive()
    }
}
