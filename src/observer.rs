use alloc::boxed::Box;
use alloc::vec::Vec;

/// Receives positional notifications from a [`SortedList`](crate::SortedList).
///
/// Positions are expressed against the list as it looks when the notification is delivered, so a
/// presentation layer can apply them one after the other to its own copy of the sequence. Inside
/// a batch the notifications are coalesced and delivered together when the batch ends.
pub trait ListObserver {
    /// `count` items were inserted starting at `position`.
    fn on_inserted(&mut self, position: usize, count: usize);

    /// `count` items were removed starting at `position`.
    fn on_removed(&mut self, position: usize, count: usize);

    /// The item at `from` now lives at `to`.
    fn on_moved(&mut self, from: usize, to: usize);

    /// The content of `count` items starting at `position` changed.
    fn on_changed(&mut self, position: usize, count: usize);
}

/// Ignores every notification.
impl ListObserver for () {
    fn on_inserted(&mut self, _position: usize, _count: usize) {}

    fn on_removed(&mut self, _position: usize, _count: usize) {}

    fn on_moved(&mut self, _from: usize, _to: usize) {}

    fn on_changed(&mut self, _position: usize, _count: usize) {}
}

/// Records every notification in delivery order.
///
/// # Examples
///
/// ```
/// use sorted_list_diff::{NaturalOrder, Notification, SortedList};
///
/// let mut list = SortedList::new(NaturalOrder, Vec::<Notification>::new());
/// list.insert(3).unwrap();
/// list.insert(1).unwrap();
///
/// assert_eq!(
///     list.observer(),
///     &[Notification::Inserted { position: 0, count: 1 }, Notification::Inserted { position: 0, count: 1 }]
/// );
/// ```
impl ListObserver for Vec<Notification> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        self.push(Notification::Inserted { position, count });
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        self.push(Notification::Removed { position, count });
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.push(Notification::Moved { from, to });
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        self.push(Notification::Changed { position, count });
    }
}

impl<O: ListObserver + ?Sized> ListObserver for &mut O {
    fn on_inserted(&mut self, position: usize, count: usize) {
        (**self).on_inserted(position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        (**self).on_removed(position, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        (**self).on_moved(from, to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        (**self).on_changed(position, count);
    }
}

impl<O: ListObserver + ?Sized> ListObserver for Box<O> {
    fn on_inserted(&mut self, position: usize, count: usize) {
        (**self).on_inserted(position, count);
    }

    fn on_removed(&mut self, position: usize, count: usize) {
        (**self).on_removed(position, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        (**self).on_moved(from, to);
    }

    fn on_changed(&mut self, position: usize, count: usize) {
        (**self).on_changed(position, count);
    }
}

/// One positional notification, as delivered to a [`ListObserver`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Notification {
    /// `count` items inserted at `position`.
    Inserted { position: usize, count: usize },
    /// `count` items removed at `position`.
    Removed { position: usize, count: usize },
    /// One item moved from `from` to `to`.
    Moved { from: usize, to: usize },
    /// `count` items starting at `position` changed content.
    Changed { position: usize, count: usize },
}

impl Notification {
    /// Forwards this notification to the matching [`ListObserver`] method.
    pub fn dispatch<O: ListObserver + ?Sized>(self, observer: &mut O) {
        match self {
            Notification::Inserted { position, count } => observer.on_inserted(position, count),
            Notification::Removed { position, count } => observer.on_removed(position, count),
            Notification::Moved { from, to } => observer.on_moved(from, to),
            Notification::Changed { position, count } => observer.on_changed(position, count),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Notification: Copy, Send, Sync);

    #[derive(Default)]
    struct Counter {
        calls: usize,
    }

    impl ListObserver for Counter {
        fn on_inserted(&mut self, _: usize, _: usize) {
            self.calls += 1;
        }

        fn on_removed(&mut self, _: usize, _: usize) {
            self.calls += 1;
        }

        fn on_moved(&mut self, _: usize, _: usize) {
            self.calls += 1;
        }

        fn on_changed(&mut self, _: usize, _: usize) {
            self.calls += 1;
        }
    }

    #[test]
    fn dispatch_round_trips_through_recorder() {
        let sent = [
            Notification::Inserted { position: 0, count: 3 },
            Notification::Removed { position: 1, count: 1 },
            Notification::Moved { from: 0, to: 1 },
            Notification::Changed { position: 1, count: 2 },
        ];
        let mut recorded: Vec<Notification> = Vec::new();
        for notification in sent {
            notification.dispatch(&mut recorded);
        }
        assert_eq!(recorded, sent);
    }

    #[test]
    fn forwarding_impls_reach_the_target() {
        let mut counter = Counter::default();
        {
            let mut by_ref: &mut Counter = &mut counter;
            Notification::Moved { from: 2, to: 0 }.dispatch(&mut by_ref);
        }
        assert_eq!(counter.calls, 1);

        let mut boxed: Box<dyn ListObserver> = Box::new(Vec::<Notification>::new());
        boxed.on_removed(0, 1);
        boxed.on_changed(0, 1);
    }
}
