use std::fmt::{Debug, Formatter};
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::error::{InsertError, ListError};
use crate::list::arena::{Arena, GHOST};
use crate::list::cursor::{Cursor, CursorMut};
use crate::{IntoIter, Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod arena;

/// The `List` is a doubly-linked list whose nodes live in a per-list arena.
/// It allows inserting, removing elements at a known node or at either end
/// in constant time. Reaching an index takes *O*(min(*i*, *n* - *i*)) time.
///
/// The `List` contains:
/// - an arena of nodes, where slot `0` is the ghost node closing the cycle
///   (`ghost.next` is the first node and `ghost.prev` the last one);
/// - the length `len` of the list;
/// - the `element_size` hint given at construction.
///
/// Nodes are addressed from the outside by [`NodeRef`] handles. A handle
/// stops resolving once its node is removed, and never resolves against
/// another list.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive (probably the ghost node).
pub struct List<T> {
    arena: Arena<T>,
    /// the length of the list
    len: usize,
    element_size: usize,
    id: ListId,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct ListId(u64);

impl ListId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to a node of a [`List`].
///
/// Handles are obtained from [`List::get`], [`List::find`], the insertion
/// methods and the node navigation methods. They are plain values: holding
/// one does not borrow the list. A handle is only honoured by the list that
/// issued it, and only while its node is still in that list.
///
/// # Examples
///
/// ```
/// use dlist::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let node = list.get(1).unwrap();
/// assert_eq!(list.element(node), Some(&2));
///
/// assert_eq!(list.delete(node), Some(2));
/// // The node is gone, so the handle is rejected from now on.
/// assert_eq!(list.element(node), None);
/// assert_eq!(list.delete(node), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeRef {
    list: ListId,
    index: usize,
    generation: u32,
}

// private methods
impl<T> List<T> {
    pub(crate) fn ghost_node(&self) -> usize {
        GHOST
    }
    pub(crate) fn front_node(&self) -> usize {
        self.arena.next(GHOST)
    }
    pub(crate) fn back_node(&self) -> usize {
        self.arena.prev(GHOST)
    }

    fn from_arena(arena: Arena<T>, element_size: usize) -> Self {
        Self {
            arena,
            len: 0,
            element_size,
            id: ListId::next(),
        }
    }

    /// Build a handle for a node that is linked into the list.
    pub(crate) fn node_ref(&self, index: usize) -> NodeRef {
        let generation = self.arena.live_generation(index).unwrap_or_default();
        NodeRef {
            list: self.id,
            index,
            generation,
        }
    }

    /// Map a handle back to its slot, or `None` if the handle was issued
    /// by another list or its node has been removed.
    fn resolve(&self, node: NodeRef) -> Option<usize> {
        if node.list != self.id {
            return None;
        }
        match self.arena.live_generation(node.index) {
            Some(generation) if generation == node.generation => Some(node.index),
            _ => None,
        }
    }

    /// Detach a single node `node` from the list, and return its element.
    ///
    /// `node` must be a non-ghost node linked into this list.
    pub(crate) fn detach_node(&mut self, node: usize) -> T {
        debug_assert_ne!(node, GHOST, "Cannot detach the ghost node");
        self.arena
            .connect(self.arena.prev(node), self.arena.next(node));
        self.len -= 1;
        self.arena.release(node)
    }

    /// Detach the first node without logging, for bulk teardown.
    pub(crate) fn detach_front(&mut self) -> Option<T> {
        match self.front_node() {
            GHOST => None,
            front => Some(self.detach_node(front)),
        }
    }

    /// Detach the last node without logging, for bulk teardown.
    pub(crate) fn detach_back(&mut self) -> Option<T> {
        match self.back_node() {
            GHOST => None,
            back => Some(self.detach_node(back)),
        }
    }

    /// Attach a single detached node `node` to the list, between `prev` and
    /// `next`, which must be adjacent.
    fn attach_node(&mut self, prev: usize, next: usize, node: usize) {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        self.arena.connect(prev, node);
        self.arena.connect(node, next);
        self.len += 1;
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(prev, node);
            self.assert_adjacent(node, next);
        }
    }

    /// Store `element` in a new node right before `next`, or hand it back
    /// if no node can be allocated.
    pub(crate) fn try_attach_before(
        &mut self,
        next: usize,
        element: T,
    ) -> Result<usize, InsertError<T>> {
        let node = self.arena.try_alloc(element).map_err(|(element, err)| {
            debug!(len = self.len, error = %err, "cannot allocate list node");
            InsertError::new(element, ListError::from(err))
        })?;
        self.attach_node(self.arena.prev(next), next, node);
        trace!(node, len = self.len, "inserted element");
        Ok(node)
    }

    /// Appends an element, aborting on allocation failure like `Vec::push`.
    pub(crate) fn push_back(&mut self, element: T) {
        let node = self.arena.alloc(element);
        self.attach_node(self.back_node(), GHOST, node);
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: usize, next: usize) {
        assert_eq!(self.arena.next(prev), next);
        assert_eq!(self.arena.prev(next), prev);
    }
}

impl<T> List<T> {
    /// Create an empty `List`, with the size of `T` as its element size.
    ///
    /// # Examples
    /// ```
    /// use dlist::List;
    /// let list: List<u32> = List::new();
    /// assert_eq!(list.element_size(), 4);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_element_size(mem::size_of::<T>())
    }

    /// Create an empty `List` with an explicit element size hint.
    ///
    /// The hint is never interpreted by the list. It is carried along for
    /// callers that store raw buffers and want to know their size, and it is
    /// passed to the copy callback of [`List::try_duplicate_with`].
    ///
    /// # Examples
    /// ```
    /// use dlist::List;
    /// let list: List<Box<[u8]>> = List::with_element_size(64);
    /// assert_eq!(list.element_size(), 64);
    /// ```
    pub fn with_element_size(element_size: usize) -> Self {
        Self::from_arena(Arena::new(), element_size)
    }

    /// Create an empty `List` with room for `capacity` elements, or fail if
    /// that much memory cannot be reserved.
    ///
    /// # Examples
    /// ```
    /// use dlist::List;
    /// let list = List::<u64>::try_with_capacity(16).unwrap();
    /// assert!(list.is_empty());
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ListError> {
        Self::try_with_capacity_and_size(capacity, mem::size_of::<T>())
    }

    fn try_with_capacity_and_size(capacity: usize, element_size: usize) -> Result<Self, ListError> {
        let arena = Arena::try_with_capacity(capacity).map_err(|err| {
            debug!(capacity, error = %err, "cannot allocate list");
            ListError::from(err)
        })?;
        Ok(Self::from_arena(arena, element_size))
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.insert_first("foo").unwrap();
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.front_node() == self.ghost_node()
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the element size hint the list was created with.
    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Removes all elements from the `List`, dropping them front to back.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        let len = self.len;
        while self.detach_front().is_some() {}
        if len > 0 {
            trace!(len, "cleared list");
        }
    }

    /// Destroys the list, handing every element to `free` in forward order.
    ///
    /// This is the explicit counterpart of dropping the list: the elements
    /// are released by the callback instead of by their `Drop` impls, and
    /// the list cannot be used afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(["a", "b", "c"]);
    /// let mut freed = Vec::new();
    /// list.destroy_with(|elt| freed.push(elt));
    /// assert_eq!(freed, vec!["a", "b", "c"]);
    /// ```
    pub fn destroy_with<F>(mut self, mut free: F)
    where
        F: FnMut(T),
    {
        let len = self.len;
        while let Some(element) = self.detach_front() {
            free(element);
        }
        trace!(len, "destroyed list");
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.arena.element(self.front_node())
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let front = self.front_node();
        self.arena.element_mut(front)
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.arena.element(self.back_node())
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let back = self.back_node();
        self.arena.element_mut(back)
    }

    /// Returns a handle to the first node, or `None` if the list is empty.
    pub fn first(&self) -> Option<NodeRef> {
        self.cursor_start().node()
    }

    /// Returns a handle to the last node, or `None` if the list is empty.
    pub fn last(&self) -> Option<NodeRef> {
        let back = self.back_node();
        if back == GHOST {
            return None;
        }
        Some(self.node_ref(back))
    }

    /// Returns a handle to the node following `node`, or `None` if `node` is
    /// the last node or is not a live node of this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let first = list.first().unwrap();
    /// let second = list.next_node(first).unwrap();
    /// assert_eq!(list.element(second), Some(&2));
    /// assert_eq!(list.next_node(second), None);
    /// assert_eq!(list.prev_node(second), Some(first));
    /// ```
    pub fn next_node(&self, node: NodeRef) -> Option<NodeRef> {
        let next = self.arena.next(self.resolve(node)?);
        if next == GHOST {
            return None;
        }
        Some(self.node_ref(next))
    }

    /// Returns a handle to the node preceding `node`, or `None` if `node` is
    /// the first node or is not a live node of this list.
    pub fn prev_node(&self, node: NodeRef) -> Option<NodeRef> {
        let prev = self.arena.prev(self.resolve(node)?);
        if prev == GHOST {
            return None;
        }
        Some(self.node_ref(prev))
    }

    /// Returns the element held by `node`, or `None` if the handle is stale
    /// or belongs to another list.
    pub fn element(&self, node: NodeRef) -> Option<&T> {
        self.arena.element(self.resolve(node)?)
    }

    /// Returns the element held by `node` mutably, or `None` if the handle is
    /// stale or belongs to another list.
    pub fn element_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        let index = self.resolve(node)?;
        self.arena.element_mut(index)
    }

    /// Inserts `element` so that it ends up at position `index`, shifting the
    /// elements after it. `index == len` appends.
    ///
    /// On failure (`index > len`, or no memory for the node) the list is
    /// left as it was and the element is returned inside the error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(min(*i*, *n* - *i*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(6, 6).is_err());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<NodeRef, InsertError<T>> {
        let len = self.len;
        match self.cursor_mut(index) {
            Some(mut cursor) => cursor.insert(element),
            None => {
                debug!(index, len, "insert index out of range");
                Err(InsertError::new(
                    element,
                    ListError::IndexOutOfRange { index, len },
                ))
            }
        }
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.insert_first(2).unwrap();
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// list.insert_first(1).unwrap();
    /// assert_eq!(list.front(), Some(&1));
    /// ```
    pub fn insert_first(&mut self, element: T) -> Result<NodeRef, InsertError<T>> {
        self.cursor_start_mut().insert(element)
    }

    /// Appends an element to the back of the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    ///
    /// let mut list = List::new();
    /// list.insert_last(1).unwrap();
    /// list.insert_last(3).unwrap();
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn insert_last(&mut self, element: T) -> Result<NodeRef, InsertError<T>> {
        self.cursor_end_mut().insert(element)
    }

    /// Removes the element at `index` and returns it, or `None` if
    /// `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(min(*i*, *n* - *i*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([3, 2, 1]);
    ///
    /// assert_eq!(list.remove(1), Some(2));
    /// assert_eq!(list.remove(2), None);
    /// assert_eq!(list.remove(0), Some(3));
    /// assert_eq!(list.remove(0), Some(1));
    /// assert_eq!(list.remove(0), None);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len;
        let removed = self.cursor_mut(index).and_then(|mut cursor| cursor.remove());
        if removed.is_none() {
            debug!(index, len, "remove index out of range");
        }
        removed
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn remove_first(&mut self) -> Option<T> {
        self.cursor_start_mut().remove()
    }

    /// Removes the last element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.remove_last(), None);
    /// list.insert_last(1).unwrap();
    /// list.insert_last(3).unwrap();
    /// assert_eq!(list.remove_last(), Some(3));
    /// ```
    pub fn remove_last(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.cursor_end_mut().backspace()
    }

    /// Returns a handle to the node at `index`, or `None` if `index >= len`.
    ///
    /// The walk starts from whichever end of the list is closer.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'c']);
    /// let node = list.get(2).unwrap();
    /// assert_eq!(list.element(node), Some(&'c'));
    /// assert_eq!(list.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<NodeRef> {
        self.cursor(index)?.node()
    }

    /// Unlinks `node` from the list and returns its element.
    ///
    /// Returns `None`, leaving the list untouched, if `node` was already
    /// removed or was issued by another list.
    ///
    /// # Complexity
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
    /// let other = List::from_iter([1, 2, 3]);
    ///
    /// let node = list.find(&2, |a, b| a.cmp(b)).unwrap();
    /// assert_eq!(other.element(node), None);
    /// assert_eq!(list.delete(node), Some(2));
    /// assert_eq!(Vec::from_iter(list), vec![1, 3]);
    /// ```
    pub fn delete(&mut self, node: NodeRef) -> Option<T> {
        match self.resolve(node) {
            Some(index) => {
                let element = self.detach_node(index);
                trace!(?node, len = self.len, "deleted node");
                Some(element)
            }
            None => {
                debug!(?node, "delete with a stale or foreign node handle");
                None
            }
        }
    }

    /// Copies the list node by node, producing each new element with `copy`.
    ///
    /// `copy` receives the source element and the element size hint. If it
    /// returns `None` for any element, everything copied so far is dropped
    /// and [`ListError::CopyFailed`] is returned. The source list is never
    /// modified.
    ///
    /// For `T: Clone`, [`Clone::clone`] does the same without a callback;
    /// cloning a list of `Rc`s shares the payloads between both lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    ///
    /// let doubled = list.try_duplicate_with(|x, _| Some(x * 2)).unwrap();
    /// assert_eq!(Vec::from_iter(doubled), vec![2, 4, 6]);
    ///
    /// let err = list
    ///     .try_duplicate_with(|x, _| if *x < 3 { Some(*x) } else { None })
    ///     .unwrap_err();
    /// assert_eq!(err, ListError::CopyFailed { index: 2 });
    /// ```
    pub fn try_duplicate_with<F>(&self, mut copy: F) -> Result<Self, ListError>
    where
        F: FnMut(&T, usize) -> Option<T>,
    {
        let mut duplicate = Self::try_with_capacity_and_size(self.len, self.element_size)?;
        for (index, element) in self.iter().enumerate() {
            let copied = copy(element, self.element_size).ok_or_else(|| {
                debug!(index, len = self.len, "element copy failed, dropping partial copy");
                ListError::CopyFailed { index }
            })?;
            duplicate
                .insert_last(copied)
                .map_err(|err| err.kind().clone())?;
        }
        trace!(len = duplicate.len, "duplicated list");
        Ok(duplicate)
    }

    /// Provides a cursor at the node with given index, or `None` if
    /// `at > len`.
    ///
    /// By convention, the cursor is pointing to the "ghost" node if `at == len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.cursor(1).unwrap().current(), Some(&2));
    /// assert_eq!(list.cursor(3).unwrap().current(), None);
    /// assert!(list.cursor(4).is_none());
    /// ```
    pub fn cursor(&self, at: usize) -> Option<Cursor<'_, T>> {
        let mut cursor = self.cursor_start();
        cursor.seek_to(at).ok()?;
        Some(cursor)
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is pointing to the "ghost" node if the list is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.front_node(), 0)
    }

    /// Provides a cursor at the ghost node.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let cursor = list.cursor_end();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.previous(), Some(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.ghost_node(), self.len)
    }

    /// Provides a cursor with editing operations at the node with given
    /// index, or `None` if `at > len`.
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
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// assert!(list.cursor_mut(4).is_none());
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> Option<CursorMut<'_, T>> {
        let mut cursor = self.cursor_start_mut();
        cursor.seek_to(at).ok()?;
        Some(cursor)
    }

    /// Provides a cursor with editing operations at the first node.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let front = self.front_node();
        CursorMut::new(self, front, 0)
    }

    /// Provides a cursor with editing operations at the ghost node.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, GHOST, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([0, 1, 2]);
    ///
    /// for element in list.iter_mut() {
    ///     *element += 10;
    /// }
    /// assert_eq!(Vec::from_iter(list), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Asserts every structural invariant of the list.
    ///
    /// Walking forward from the first node and backward from the last node
    /// must each visit exactly `len` linked nodes, every link must be
    /// mirrored by its neighbour, and the walks must end at the ghost node.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first broken invariant.
    pub fn assert_valid(&self) {
        let mut count = 0;
        let mut prev = GHOST;
        let mut node = self.front_node();
        while node != GHOST {
            assert!(
                count < self.len,
                "forward walk passed the length {} without reaching the ghost node",
                self.len
            );
            assert_eq!(
                self.arena.prev(node),
                prev,
                "node {} does not link back to its predecessor",
                node
            );
            assert!(
                self.arena.element(node).is_some(),
                "node {} is linked but holds no element",
                node
            );
            count += 1;
            prev = node;
            node = self.arena.next(node);
        }
        assert_eq!(self.back_node(), prev, "ghost node does not link back to the last node");
        assert_eq!(count, self.len, "forward walk disagrees with the length");

        let mut count = 0;
        let mut node = self.back_node();
        while node != GHOST {
            assert!(
                count < self.len,
                "backward walk passed the length {} without reaching the ghost node",
                self.len
            );
            count += 1;
            node = self.arena.prev(node);
        }
        assert_eq!(count, self.len, "backward walk disagrees with the length");
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

// Ensure that `List` and its read-only iterators are covariant in their type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: List<&'static str>) -> List<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: IntoIter<&'static str>) -> IntoIter<&'a str> {
        x
    }
}
