use alloc::vec::Vec;

use super::SortedList;
use crate::raw::Pending;

/// How to take back one change made to the items of a list.
pub(crate) enum Undo<T> {
    /// `count` items were inserted at `position`.
    Inserted { position: usize, count: usize },
    /// `items` were removed from `position`.
    Removed { position: usize, items: Vec<T> },
    /// The item at `from` was replaced by one that ended up at `to`.
    Replaced { from: usize, to: usize, previous: T },
}

/// The state a list can be rolled back to: its pending notifications, and the changes made to its
/// items since, in the order they were made.
pub(crate) struct Journal<T> {
    checkpoint: Pending,
    entries: Vec<Undo<T>>,
}

impl<T> Journal<T> {
    pub(crate) fn record(&mut self, undo: Undo<T>) {
        self.entries.push(undo);
    }
}

impl<T, R, O> SortedList<T, R, O> {
    /// Starts a journal at the current state. The changes made afterwards must be recorded in it,
    /// in order, for [`roll_back`](SortedList::roll_back) to restore that state.
    pub(crate) fn journal(&self) -> Journal<T> {
        Journal {
            checkpoint: self.log.checkpoint(),
            entries: Vec::new(),
        }
    }

    /// Takes back every change in `journal`, newest first, and puts the pending notifications back
    /// as they were when it started. The observer is not told about any of it.
    pub(crate) fn roll_back(&mut self, journal: Journal<T>) {
        for undo in journal.entries.into_iter().rev() {
            match undo {
                Undo::Inserted { position, count } => {
                    self.items.drain(position..position + count);
                }
                Undo::Removed { position, items } => {
                    self.items.splice(position..position, items);
                }
                Undo::Replaced { from, to, previous } => {
                    self.items.remove(to);
                    self.items.insert(from, previous);
                }
            }
        }
        self.log.restore(journal.checkpoint);
    }
}
