#![allow(dead_code)]

use std::cmp::Ordering;
use std::fmt;

use proptest::prelude::*;
use sorted_list_diff::{ItemRules, Notification};

/// A row keyed by `id`, sorted by `rank`, displaying `label`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Row {
    pub id: u8,
    pub rank: i8,
    pub label: char,
}

impl Row {
    pub const fn new(id: u8, rank: i8, label: char) -> Self {
        Row { id, rank, label }
    }
}

/// Orders by rank only, so rows with equal rank are kept in insertion order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByRank;

impl ItemRules<Row> for ByRank {
    fn order(&self, a: &Row, b: &Row) -> Ordering {
        a.rank.cmp(&b.rank)
    }

    fn same_item(&self, a: &Row, b: &Row) -> bool {
        a.id == b.id
    }

    fn same_content(&self, old: &Row, new: &Row) -> bool {
        old.label == new.label
    }
}

// ─── Strategies ──────────────────────────────────────────────────────────────

/// Few ids and ranks so identity matches and order ties are common.
pub fn row_strategy() -> impl Strategy<Value = Row> {
    (0u8..24, -8i8..8, prop::sample::select(vec!['a', 'b', 'c'])).prop_map(|(id, rank, label)| Row::new(id, rank, label))
}

pub fn rows_strategy(max: usize) -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(row_strategy(), 0..max)
}

// ─── Checks ──────────────────────────────────────────────────────────────────

pub fn is_sorted(rows: &[Row]) -> bool {
    rows.windows(2).all(|pair| ByRank.order(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Where a notification could not be applied or left the replayed list out of step.
#[derive(Debug)]
pub struct ReplayMismatch(String);

impl fmt::Display for ReplayMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies `notifications` to `before` the way a view would: inserted and changed slots must be
/// rebound, removed slots disappear, moved slots keep their item. Every slot that was not
/// rebound must then show the same item as `after` at the same position.
pub fn replay(before: &[Row], notifications: &[Notification], after: &[Row]) -> Result<(), ReplayMismatch> {
    let mut slots: Vec<Option<Row>> = before.iter().copied().map(Some).collect();
    for (step, notification) in notifications.iter().enumerate() {
        let len = slots.len();
        let fail = |what: &str| Err(ReplayMismatch(format!("step {step}: {notification:?} {what} (len {len})")));
        match *notification {
            Notification::Inserted { position, count } => {
                if position > len || count == 0 {
                    return fail("is out of bounds");
                }
                slots.splice(position..position, std::iter::repeat_n(None, count));
            }
            Notification::Removed { position, count } => {
                if position + count > len || count == 0 {
                    return fail("is out of bounds");
                }
                slots.drain(position..position + count);
            }
            Notification::Moved { from, to } => {
                if from >= len || to >= len {
                    return fail("is out of bounds");
                }
                let slot = slots.remove(from);
                slots.insert(to, slot);
            }
            Notification::Changed { position, count } => {
                if position + count > len || count == 0 {
                    return fail("is out of bounds");
                }
                slots[position..position + count].fill(None);
            }
        }
    }

    if slots.len() != after.len() {
        return Err(ReplayMismatch(format!("replayed length {} but list has {}", slots.len(), after.len())));
    }
    for (position, (slot, row)) in slots.iter().zip(after).enumerate() {
        match slot {
            Some(shown) if shown.id != row.id || shown.label != row.label => {
                return Err(ReplayMismatch(format!("position {position} shows {shown:?} but list has {row:?}")));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Stable sort by rank: the order `SortedList` produces for rows inserted in this order.
pub fn stable_sorted(rows: impl IntoIterator<Item = Row>) -> Vec<Row> {
    let mut rows: Vec<Row> = rows.into_iter().collect();
    rows.sort_by(|a, b| ByRank.order(a, b));
    rows
}
