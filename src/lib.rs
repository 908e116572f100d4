//! This crate provides a doubly-linked list whose nodes are owned by an arena,
//! addressed by checked handles.
//!
//! The [`List`] allows inserting and removing elements at either end, or at a
//! node you hold a handle to, in constant time. Reaching a position by index
//! walks from whichever end is nearer, so it takes *O*(min(*i*, *n* - *i*)) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use dlist::List;
//!
//! let mut list = List::new();
//! list.insert_last(10).unwrap();
//! list.insert_last(20).unwrap();
//! list.insert_first(5).unwrap(); // [5, 10, 20]
//!
//! assert_eq!(list.remove(1), Some(10)); // [5, 20]
//! assert_eq!(list.index_of(&20, |a, b| a.cmp(b)), Some(1));
//!
//! list.sort_by(|a, b| b.cmp(a)); // [20, 5]
//! assert_eq!(list.front(), Some(&20));
//! assert!(list.traverse(|x| *x == 5));
//! ```
//!
//! # Memory Layout
//!
//! Every list owns a vector of node slots. Links are slot indices:
//! ```text
//!          ┌───────────────────────────────────────────────────────────────────┐
//!          ↓                                                                   │
//!    ╔═══════════╗           ╔═══════════╗                        ┌──────────┐ │
//!    ║   next    ║ ────────→ ║   next    ║ ────────→ ┄┄ ────────→ │   next   │ ┘
//!    ╟───────────╢           ╟───────────╢                        ├──────────┤
//! ┌─ ║   prev    ║ ←──────── ║   prev    ║ ←──────── ┄┄ ←──────── │   prev   │
//! │  ╟───────────╢           ╟───────────╢                        ├──────────┤
//! │  ║ payload T ║           ║ payload T ║                        ┊No payload┊
//! │  ╚═══════════╝           ╚═══════════╝                        └╌╌╌╌╌╌╌╌╌╌┘
//! │    first node               2nd node                        slot 0 (ghost)
//! └────────────────────────────────────────────────────────────────────↑
//! ```
//! - Slot `0` holds the ghost node, which carries no payload. `ghost.next` is
//!   the first node and `ghost.prev` is the last one; in an empty list both
//!   point back at the ghost.
//! - A removed node's slot goes on a free list and is reused by the next
//!   insertion. The order of the slots says nothing about the order of the
//!   list.
//! - The list keeps its length, so [`List::len`] is *O*(1).
//!
//! In convention, in a list with length *n*, the nodes are indexed by 0, 1, ...,
//! *n* - 1, and the ghost node is always indexed by *n*.
//!
//! # Node Handles
//!
//! [`List::get`], [`List::find`] and the insertion methods return a
//! [`NodeRef`]. A handle does not borrow the list; it can be kept across
//! mutations and used later with [`List::element`] or [`List::delete`].
//! Each slot carries a generation that changes whenever its node is removed,
//! so a handle to a removed node, or a handle from another list, is rejected
//! with `None`.
//!
//! ```
//! use dlist::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter(['a', 'b', 'c']);
//! let b = list.get(1).unwrap();
//!
//! list.sort_by(|x, y| y.cmp(x)); // nodes are relinked, `b` still resolves
//! assert_eq!(list.element(b), Some(&'b'));
//!
//! assert_eq!(list.delete(b), Some('b'));
//! assert_eq!(list.delete(b), None); // stale
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and non-cyclic).
//! [`IterMut`] provides mutability of the elements (but not the linked structure of
//! the list).
//!
//! ```
//! use dlist::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused and non-cyclic
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(list), vec![2, 4, 6]);
//! ```
//!
//! # Cursors
//!
//! The cursors [`Cursor`] and [`CursorMut`] can move forward or backward over
//! the list. In a list with length *n*, there are *n* + 1 valid locations for
//! the cursor, indexed by 0, 1, ..., *n*, where *n* is the ghost node of the
//! list. [`CursorMut`] can also edit the list where it stands:
//! - [`insert`]: insert a new item before the cursor;
//! - [`remove`]: remove the item at the cursor;
//! - [`backspace`]: remove the item before the cursor.
//!
//! ```
//! use dlist::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(5).unwrap(); // becomes [5, 1, 2, 3, 4], points to 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert!(cursor.seek_to(3).is_ok());
//! assert_eq!(cursor.remove(), Some(3)); // becomes [5, 1, 2, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(cursor.backspace(), Some(2)); // becomes [5, 1, 4], points to 4
//! assert_eq!(cursor.current(), Some(&4));
//!
//! assert_eq!(Vec::from_iter(list), vec![5, 1, 4]);
//! ```
//!
//! # Logging
//!
//! Structural changes are reported as `tracing` events at `TRACE` level, and
//! rejected requests (bad index, stale handle, failed copy or allocation) at
//! `DEBUG` level. The crate never installs a subscriber.
//!
//! [`insert`]: crate::list::cursor::CursorMut::insert
//! [`remove`]: crate::list::cursor::CursorMut::remove
//! [`backspace`]: crate::list::cursor::CursorMut::backspace

#[doc(inline)]
pub use error::{InsertError, ListError};
#[doc(inline)]
pub use list::cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::{List, NodeRef};

pub mod list;

mod error;
