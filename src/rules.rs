use core::cmp::Ordering;
use core::fmt;

/// The three caller-supplied capabilities a [`SortedList`](crate::SortedList) needs from its
/// items: a total order, an identity test and a content test.
///
/// The three are independent. Two items can be identical (the same logical entity) while sorting
/// differently, which is what makes an update turn into a move, and two identical items can
/// carry different content, which is what makes an update emit a change.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use sorted_list_diff::ItemRules;
///
/// struct Contact {
///     id: u32,
///     name: &'static str,
///     online: bool,
/// }
///
/// struct ByName;
///
/// impl ItemRules<Contact> for ByName {
///     fn order(&self, a: &Contact, b: &Contact) -> Ordering {
///         a.name.cmp(b.name)
///     }
///
///     fn same_item(&self, a: &Contact, b: &Contact) -> bool {
///         a.id == b.id
///     }
///
///     fn same_content(&self, old: &Contact, new: &Contact) -> bool {
///         old.name == new.name && old.online == new.online
///     }
/// }
/// ```
pub trait ItemRules<T: ?Sized> {
    /// Total order defining the position of an item in the list.
    fn order(&self, a: &T, b: &T) -> Ordering;

    /// Returns `true` if `a` and `b` represent the same logical entity.
    fn same_item(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if `old` and `new`, already known to be the same item, look the same.
    fn same_content(&self, old: &T, new: &T) -> bool;
}

impl<T: ?Sized, R: ItemRules<T> + ?Sized> ItemRules<T> for &R {
    #[inline]
    fn order(&self, a: &T, b: &T) -> Ordering {
        (**self).order(a, b)
    }

    #[inline]
    fn same_item(&self, a: &T, b: &T) -> bool {
        (**self).same_item(a, b)
    }

    #[inline]
    fn same_content(&self, old: &T, new: &T) -> bool {
        (**self).same_content(old, new)
    }
}

/// [`ItemRules`] assembled from three closures.
///
/// # Examples
///
/// ```
/// use sorted_list_diff::{ItemRules, Rules};
///
/// let rules = Rules::new(
///     |a: &(u32, char), b: &(u32, char)| a.0.cmp(&b.0),
///     |a: &(u32, char), b: &(u32, char)| a.0 == b.0,
///     |old: &(u32, char), new: &(u32, char)| old.1 == new.1,
/// );
///
/// assert!(rules.same_item(&(1, 'a'), &(1, 'b')));
/// assert!(!rules.same_content(&(1, 'a'), &(1, 'b')));
/// ```
#[derive(Clone, Copy)]
pub struct Rules<F, I, C> {
    order: F,
    same_item: I,
    same_content: C,
}

impl<F, I, C> Rules<F, I, C> {
    /// Bundles an order, an identity test and a content test.
    pub const fn new(order: F, same_item: I, same_content: C) -> Self {
        Rules {
            order,
            same_item,
            same_content,
        }
    }
}

impl<T, F, I, C> ItemRules<T> for Rules<F, I, C>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
    I: Fn(&T, &T) -> bool,
    C: Fn(&T, &T) -> bool,
{
    #[inline]
    fn order(&self, a: &T, b: &T) -> Ordering {
        (self.order)(a, b)
    }

    #[inline]
    fn same_item(&self, a: &T, b: &T) -> bool {
        (self.same_item)(a, b)
    }

    #[inline]
    fn same_content(&self, old: &T, new: &T) -> bool {
        (self.same_content)(old, new)
    }
}

impl<F, I, C> fmt::Debug for Rules<F, I, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules").finish_non_exhaustive()
    }
}

/// [`ItemRules`] for types whose [`Ord`] and [`PartialEq`] already say everything.
///
/// Items are ordered with [`Ord::cmp`]; identity and content both use `==`, so an update never
/// produces a change notification and an item is only ever replaced by an equal one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> ItemRules<T> for NaturalOrder {
    #[inline]
    fn order(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }

    #[inline]
    fn same_item(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn same_content(&self, old: &T, new: &T) -> bool {
        old == new
    }
}
