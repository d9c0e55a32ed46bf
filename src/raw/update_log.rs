use core::mem;

use smallvec::SmallVec;

use crate::Notification;
use crate::Notification::{Changed, Inserted, Moved, Removed};

/// Notifications held back while a batch is open.
pub(crate) type Pending = SmallVec<[Notification; 8]>;

/// Batch state and the coalesced notifications recorded while a batch is open.
///
/// Every notification is coalesced against the most recent pending one. A removal of items that
/// were inserted earlier in the batch also cancels against that insertion, with the entries
/// recorded in between shifted to the slots they describe once those items never existed.
/// Either way the pending notifications stay valid for sequential replay.
#[derive(Debug, Default)]
pub(crate) struct UpdateLog {
    pending: Pending,
    batching: bool,
}

/// Outcome of folding a new notification into the last pending one.
enum Coalesced {
    /// The last entry now also covers the new notification.
    Merged,
    /// The new notification cancelled the last entry completely.
    Emptied,
    /// The new notification makes the last entry redundant; keep folding against the one before.
    Superseded,
    /// Nothing to fold.
    Separate,
}

impl UpdateLog {
    pub(crate) fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            batching: false,
        }
    }

    #[inline]
    pub(crate) const fn is_batching(&self) -> bool {
        self.batching
    }

    /// Opens a batch. Returns `false` if one was already open.
    pub(crate) fn begin(&mut self) -> bool {
        !mem::replace(&mut self.batching, true)
    }

    /// Closes the batch and hands back what it recorded, or `None` if no batch was open.
    pub(crate) fn end(&mut self) -> Option<Pending> {
        if mem::replace(&mut self.batching, false) { Some(mem::take(&mut self.pending)) } else { None }
    }

    /// Copies the pending notifications so a failed edit can put them back.
    pub(crate) fn checkpoint(&self) -> Pending {
        self.pending.clone()
    }

    /// Replaces the pending notifications with a [`checkpoint`](UpdateLog::checkpoint).
    pub(crate) fn restore(&mut self, checkpoint: Pending) {
        self.pending = checkpoint;
    }

    /// Records `next`, folding it into the pending notifications where possible.
    pub(crate) fn push(&mut self, next: Notification) {
        debug_assert!(self.batching, "`UpdateLog::push()` - no batch is open!");
        while let Some(last) = self.pending.last_mut() {
            match coalesce(last, next) {
                Coalesced::Merged => return,
                Coalesced::Emptied => {
                    self.pending.pop();
                    return;
                }
                Coalesced::Superseded => {
                    self.pending.pop();
                }
                Coalesced::Separate => break,
            }
        }
        let cancelled = match next {
            Removed { position, count } => self.cancel_insertion(position, count),
            _ => false,
        };
        if !cancelled {
            self.pending.push(next);
        }
    }

    /// Looks back for an insertion run holding every slot of `Removed { position, count }` and
    /// shrinks it. Gives up, changing nothing, at the first entry the removal cannot be carried
    /// past.
    fn cancel_insertion(&mut self, position: usize, count: usize) -> bool {
        let mut position = position;
        // Entries after the run, rewritten for a batch in which the removed items never existed.
        let mut shifted = Pending::new();
        for index in (0..self.pending.len()).rev() {
            match self.pending[index] {
                Inserted { position: p, count: c } if p <= position && position + count <= p + c => {
                    for (offset, entry) in shifted.iter().rev().enumerate() {
                        self.pending[index + 1 + offset] = *entry;
                    }
                    if c == count {
                        self.pending.remove(index);
                    } else {
                        self.pending[index] = Inserted { position: p, count: c - count };
                    }
                    return true;
                }
                entry => match carry_back(entry, position, count) {
                    Some((earlier, rewritten)) => {
                        shifted.push(rewritten);
                        position = earlier;
                    }
                    None => return false,
                },
            }
        }
        false
    }
}

/// Carries a removal of `count` slots at `position` back past `entry`, the notification recorded
/// just before it. Returns where those slots were before `entry`, and `entry` rewritten for a list
/// without them. `None` if `entry` touches the removed slots or would have them split apart.
fn carry_back(entry: Notification, position: usize, count: usize) -> Option<(usize, Notification)> {
    let end = position + count;
    match entry {
        Inserted { position: p, count: c } if end <= p => Some((position, Inserted { position: p - count, count: c })),
        Inserted { position: p, count: c } if position >= p + c => Some((position - c, entry)),
        Removed { position: p, count: c } if end <= p => Some((position, Removed { position: p - count, count: c })),
        Removed { position: p, count: c } if position >= p => Some((position + c, entry)),
        Changed { position: p, count: c } if end <= p => Some((position, Changed { position: p - count, count: c })),
        Changed { position: p, count: c } if position >= p + c => Some((position, entry)),
        _ => None,
    }
}

fn coalesce(last: &mut Notification, next: Notification) -> Coalesced {
    match (*last, next) {
        // Inserting anywhere inside or at either edge of a fresh run extends it.
        (Inserted { position: p, count: c }, Inserted { position: q, count: d }) if p <= q && q <= p + c => {
            *last = Inserted { position: p, count: c + d };
            Coalesced::Merged
        }
        // Removing only freshly inserted items shrinks the run.
        (Inserted { position: p, count: c }, Removed { position: q, count: d }) if p <= q && q + d <= p + c => {
            if c == d {
                Coalesced::Emptied
            } else {
                *last = Inserted { position: p, count: c - d };
                Coalesced::Merged
            }
        }
        // Fresh items are bound from scratch anyway.
        (Inserted { position: p, count: c }, Changed { position: q, count: d }) if p <= q && q + d <= p + c => {
            Coalesced::Merged
        }
        (Removed { position: p, count: c }, Removed { position: q, count: d }) if q == p => {
            *last = Removed { position: p, count: c + d };
            Coalesced::Merged
        }
        (Removed { position: p, count: c }, Removed { position: q, count: d }) if q + d == p => {
            *last = Removed { position: q, count: c + d };
            Coalesced::Merged
        }
        (Changed { position: p, count: c }, Changed { position: q, count: d }) if q <= p + c && p <= q + d => {
            let start = p.min(q);
            let end = (p + c).max(q + d);
            *last = Changed { position: start, count: end - start };
            Coalesced::Merged
        }
        (Changed { position: p, count: c }, Removed { position: q, count: d }) if q <= p && p + c <= q + d => {
            Coalesced::Superseded
        }
        _ => Coalesced::Separate,
    }
}
