use crate::error::InsertError;
use crate::list::{List, NodeRef};
use std::fmt;
use std::fmt::Formatter;
use tracing::trace;

/// A cursor over a `List`.
///
/// A `Cursor` is like an iterator, except that it can freely seek back-and-forth.
///
/// In a list with length *n*, there are *n* + 1 valid locations for the cursor,
/// indexed by 0, 1, ..., *n*, where *n* is the ghost node of the list.
///
/// # Examples
///
/// Here is a simple example showing how the cursors work. (The ghost node of the
/// list is denoted by `#`).
/// ```
/// use dlist::List;
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C D #]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D #] (index = 0)
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D #] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|#] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert_eq!(cursor.current(), None);
///
/// // Move cursor backward: [ A B C|D #] (index = 3)
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // The ghost node is a boundary for `move_next`: [ A B C D|#] (index = 4)
/// let mut cursor = list.cursor_end();
/// assert!(cursor.move_next().is_err());
/// assert_eq!(cursor.current(), None);
/// ```
#[derive(Clone)]
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: usize,
    pub(crate) list: &'a List<T>,
}

/// A cursor over a `List` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek back-and-forth,
/// and can safely mutate the list during iteration. The references it yields
/// borrow the cursor, so it cannot yield multiple elements at once.
///
/// For convenience, [`CursorMut::view`] temporarily borrows the list
/// immutably.
///
/// # Examples
///
/// ```compile_fail
/// use dlist::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut cursor = list.cursor_start_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: usize,
    pub(crate) list: &'a mut List<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            pub(crate) fn is_ghost_node(&self) -> bool {
                self.current == self.list.ghost_node()
            }
            pub(crate) fn is_front_node(&self) -> bool {
                self.prev_node() == self.list.ghost_node()
            }
            pub(crate) fn next_node(&self) -> usize {
                self.list.arena.next(self.current)
            }
            pub(crate) fn prev_node(&self) -> usize {
                self.list.arena.prev(self.current)
            }

            /// Move forward the cursor by given steps, without checking whether
            /// it will pass through the ghost node.
            fn seek_forward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_add(steps);
                (0..steps).for_each(|_| self.current = self.next_node());
            }

            /// Move backward the cursor by given steps, without checking whether
            /// it will pass through the ghost node.
            fn seek_backward_fast(&mut self, steps: usize) {
                self.index = self.index.saturating_sub(steps);
                (0..steps).for_each(|_| self.current = self.prev_node());
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the index of the cursor
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `List` is empty. See [`List::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.list.is_empty()
            }

            /// Returns a handle to the node under the cursor, or `None` at the
            /// ghost node.
            pub fn node(&self) -> Option<NodeRef> {
                if self.is_ghost_node() {
                    return None;
                }
                Some(self.list.node_ref(self.current))
            }

            /// Move the cursor to the next position, or return an error
            /// if the cursor is already at the ghost node. The cursor stays
            /// put on error; it never wraps around to the first node.
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_next(&mut self) -> Result<(), &'static str> {
                if self.is_ghost_node() {
                    return Err("`move_next` past the end of the list");
                }
                self.index += 1;
                self.current = self.next_node();
                Ok(())
            }

            /// Move the cursor to the previous position, or return an error
            /// if the cursor is already at the first node (or at the ghost
            /// node of an empty list).
            ///
            /// This operation should compute in *O*(*1*) time.
            pub fn move_prev(&mut self) -> Result<(), &'static str> {
                if self.is_front_node() {
                    return Err("`move_prev` before the start of the list");
                }
                self.index -= 1;
                self.current = self.prev_node();
                Ok(())
            }

            /// Move the cursor to the given position `target`, or return the
            /// overshoot `target - len` when `target > len`.
            ///
            /// If an error occurs, the cursor will stay put.
            ///
            /// The walk starts from the cursor, the first node, or the ghost
            /// node, whichever is nearest to `target`, so it computes in
            /// *O*(min(|*t* - *i*|, *t*, *n* - *t*)) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use dlist::List;
            /// use std::iter::FromIterator;
            ///
            /// let list = List::from_iter([1, 2, 3]);
            /// let mut cursor = list.cursor_start();
            ///
            /// // Move cursor to a valid place (at the third node)
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// // Forbid to move to a invalid place
            /// assert_eq!(cursor.seek_to(5), Err(2));
            ///
            /// // The cursor is still at the third node
            /// assert_eq!(cursor.current(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<(), usize> {
                if target == self.index {
                    return Ok(());
                }
                let len = self.list.len();
                match target {
                    target if target > len => return Err(target - len),
                    0 => self.move_to_start(),
                    target if target == len => self.move_to_end(),
                    // current=c, target=t, ghost=#
                    target if target > self.index => {
                        // target is at the right side of current: [   c----->t   #]
                        if target - self.index <= len - target {
                            // target is near the right side of current: [    c-->t     #]
                            self.seek_forward_fast(target - self.index);
                        } else {
                            // target is far from the right side of current: [ c     t<--#]
                            self.move_to_end();
                            self.seek_backward_fast(len - target);
                        }
                    }
                    _ => {
                        // target is at the left side of current: [   t<-----c   #]
                        if self.index - target <= target {
                            // target is near the left side of current: [    t<--c     #]
                            self.seek_backward_fast(self.index - target);
                        } else {
                            // target is far from the left side of current: [-->t      c #]
                            self.move_to_start();
                            self.seek_forward_fast(target);
                        }
                    }
                }
                Ok(())
            }

            /// Set the cursor to the start of the list (i.e. the first node).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.list.front_node();
            }

            /// Set the cursor to the end of the list (i.e. the ghost node).
            ///
            /// This operation should compute in *O*(*1*) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.list.len();
                self.current = self.list.ghost_node();
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("list", &self.list)
                    .field("current", &self.list.arena.element(self.current))
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(list: &'a List<T>, current: usize, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(0).unwrap().current(), Some(&1));
    /// assert_eq!(list.cursor(2).unwrap().current(), Some(&3));
    /// assert_eq!(list.cursor(3).unwrap().current(), None);
    /// ```
    pub fn current(&self) -> Option<&'a T> {
        let list: &'a List<T> = self.list;
        list.arena.element(self.current)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(0).unwrap().previous(), None);
    /// assert_eq!(list.cursor(1).unwrap().previous(), Some(&1));
    /// assert_eq!(list.cursor(3).unwrap().previous(), Some(&3));
    /// ```
    pub fn previous(&self) -> Option<&'a T> {
        let list: &'a List<T> = self.list;
        list.arena.element(self.prev_node())
    }
}

impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>, current: usize, index: usize) -> Self {
        Self {
            index,
            current,
            list,
        }
    }

    /// Return an immutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    pub fn current(&self) -> Option<&T> {
        self.list.arena.element(self.current)
    }

    /// Return an immutable reference of previous node of the cursor,
    /// or return `None` if it is located at the first node.
    pub fn previous(&self) -> Option<&T> {
        self.list.arena.element(self.prev_node())
    }

    /// Return a mutable reference of current node of the cursor,
    /// or return `None` if it is located at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let mut cursor = list.cursor_mut(0).unwrap();
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate the ghost node.
    /// assert!(list.cursor_end_mut().current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.list.arena.element_mut(self.current)
    }

    /// Temporarily view the list via an immutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start_mut();
    ///
    /// // Temporarily view the list
    /// assert_eq!(cursor.view().back(), Some(&3));
    ///
    /// cursor.insert(4).unwrap();
    /// assert_eq!(Vec::from_iter(list), vec![4, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &List<T> {
        self.list
    }

    /// Add an element before the cursor position and return a handle to its
    /// node.
    ///
    /// After insertion, the cursor stays put but its `index` becomes
    /// `index + 1`. If no node can be allocated the element is handed back
    /// and nothing changes.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_mut(1).unwrap();
    ///
    /// cursor.insert(4).unwrap(); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.index(), 2);
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(5).unwrap(); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, item: T) -> Result<NodeRef, InsertError<T>> {
        let node = self.list.try_attach_before(self.current, item)?;
        self.index += 1;
        Ok(self.list.node_ref(node))
    }

    /// Remove the element at the cursor and return it, or return `None`
    /// if the cursor is at the ghost node. After removal, the cursor
    /// is moved to the next node unless no removing is happened.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5).unwrap();
    ///
    /// assert_eq!(cursor.remove(), Some(5)); // becomes [0, 1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// assert_eq!(cursor.index(), 9);
    ///
    /// assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        if self.is_ghost_node() {
            return None;
        }
        let next = self.next_node();
        let item = self.list.detach_node(self.current);
        self.current = next;
        trace!(index = self.index, len = self.list.len(), "removed element");
        Some(item)
    }

    /// Remove the element before the cursor and return it, or return `None` if
    /// the cursor is at the first node. After removal, the cursor is not moved,
    /// but its `index` becomes `index - 1`.
    ///
    /// This operation should compute in *O*(*1*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter(0..10);
    /// let mut cursor = list.cursor_mut(5).unwrap();
    ///
    /// assert_eq!(cursor.backspace(), Some(4)); // becomes [0, 1, 2, 3, 5, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 4);
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.backspace(), None);
    /// assert_eq!(cursor.index(), 0);
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }
}
