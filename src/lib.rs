//! A sorted list that tells its observer exactly what changed.
//!
//! This crate provides [`SortedList`], a list kept in the order defined by caller-supplied
//! [`ItemRules`], and [`Editor`], which queues a set of mutations and applies them as a single
//! batch. Every structural change is reported to a [`ListObserver`] as one of four positional
//! notifications:
//!
//! - `on_inserted(position, count)`
//! - `on_removed(position, count)`
//! - `on_moved(from, to)`
//! - `on_changed(position, count)`
//!
//! A presentation layer that mirrors the list only has to apply those notifications, one after
//! the other, to stay in sync. It never needs to rebuild its view from scratch.
//!
//! # Example
//!
//! ```
//! use sorted_list_diff::{Notification, Rules, SortedList};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Task {
//!     id: u32,
//!     priority: u8,
//!     title: &'static str,
//! }
//!
//! let rules = Rules::new(
//!     |a: &Task, b: &Task| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)),
//!     |a: &Task, b: &Task| a.id == b.id,
//!     |old: &Task, new: &Task| old.title == new.title,
//! );
//! let mut tasks = SortedList::new(rules, Vec::<Notification>::new());
//!
//! tasks
//!     .edit()
//!     .add_all([
//!         Task { id: 1, priority: 1, title: "write docs" },
//!         Task { id: 2, priority: 5, title: "fix crash" },
//!         Task { id: 3, priority: 3, title: "review" },
//!     ])
//!     .commit()
//!     .unwrap();
//! assert_eq!(tasks.observer(), &[Notification::Inserted { position: 0, count: 3 }]);
//!
//! // The crash is fixed: same task, lower priority, new title.
//! tasks.observer_mut().clear();
//! tasks.edit().replace(Task { id: 2, priority: 0, title: "fixed crash" }).commit().unwrap();
//!
//! assert_eq!(tasks[2].title, "fixed crash");
//! assert_eq!(
//!     tasks.observer(),
//!     &[Notification::Changed { position: 0, count: 1 }, Notification::Moved { from: 0, to: 2 }]
//! );
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Coalesced batches** - Adjacent ranges merge, and an item added and removed within one
//!   batch is never reported
//! - **Upserts without flicker** - [`Editor::replace_all`] updates matching items in place
//!   instead of removing and reinserting them
//! - **Pluggable rules** - Order, identity and content are three separate functions, never tied
//!   to the item type
//!
//! # Logging
//!
//! Batches, commits and flushed notifications are reported through [`tracing`] at `debug` and
//! `trace` level. Order violations are reported at `warn` level.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod observer;
mod raw;
mod rules;

pub mod editor;
pub mod sorted_list;

pub use editor::{Action, Editor};
pub use error::{Error, Result};
pub use observer::{ListObserver, Notification};
pub use rules::{ItemRules, NaturalOrder, Rules};
pub use sorted_list::{Batch, SortedList};
