//! Slot storage for list nodes.
//!
//! Links between nodes are slot indices instead of pointers. Slot `0` is the
//! ghost node: it holds no element, its `next` is the first node and its `prev`
//! is the last node. Released slots are chained into a free list and reused;
//! each release bumps the slot's generation so that handles to the old node
//! can be told apart from handles to whatever reuses the slot.

use std::collections::TryReserveError;
use std::mem;

/// Index of the ghost node in every arena.
pub(crate) const GHOST: usize = 0;

pub(crate) struct Node<T> {
    pub(crate) next: usize,
    pub(crate) prev: usize,
    generation: u32,
    slot: Slot<T>,
}

enum Slot<T> {
    Ghost,
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

pub(crate) struct Arena<T> {
    nodes: Vec<Node<T>>,
    free: Option<usize>,
}

impl<T> Node<T> {
    fn ghost() -> Self {
        Node {
            next: GHOST,
            prev: GHOST,
            generation: 0,
            slot: Slot::Ghost,
        }
    }

    fn detached(element: T) -> Self {
        Node {
            next: GHOST,
            prev: GHOST,
            generation: 0,
            slot: Slot::Occupied(element),
        }
    }

    pub(crate) fn element(&self) -> Option<&T> {
        match &self.slot {
            Slot::Occupied(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self) -> Option<&mut T> {
        match &mut self.slot {
            Slot::Occupied(element) => Some(element),
            _ => None,
        }
    }
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            nodes: vec![Node::ghost()],
            free: None,
        }
    }

    /// Creates an arena with room for `capacity` nodes besides the ghost.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity.saturating_add(1))?;
        nodes.push(Node::ghost());
        Ok(Arena { nodes, free: None })
    }

    #[inline]
    pub(crate) fn next(&self, index: usize) -> usize {
        self.nodes[index].next
    }

    #[inline]
    pub(crate) fn prev(&self, index: usize) -> usize {
        self.nodes[index].prev
    }

    /// Links `prev` and `next` to each other.
    #[inline]
    pub(crate) fn connect(&mut self, prev: usize, next: usize) {
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Returns the element at `index`, or `None` for the ghost node, a
    /// vacant slot, or an index past the end of the arena.
    pub(crate) fn element(&self, index: usize) -> Option<&T> {
        self.nodes.get(index)?.element()
    }

    pub(crate) fn element_mut(&mut self, index: usize) -> Option<&mut T> {
        self.nodes.get_mut(index)?.element_mut()
    }

    /// Returns the element of a node that is linked into the list.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not hold an element, which means the links
    /// are corrupted.
    pub(crate) fn occupied(&self, index: usize) -> &T {
        match self.element(index) {
            Some(element) => element,
            None => panic!("node {} is linked into the list but holds no element", index),
        }
    }

    /// Returns the generation of an occupied slot.
    pub(crate) fn live_generation(&self, index: usize) -> Option<u32> {
        let node = self.nodes.get(index)?;
        node.element().map(|_| node.generation)
    }

    /// Stores `element` in a detached node and returns its index, handing the
    /// element back if the arena cannot grow.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<usize, (T, TryReserveError)> {
        if self.free.is_none() {
            if let Err(err) = self.nodes.try_reserve(1) {
                return Err((element, err));
            }
        }
        Ok(self.alloc(element))
    }

    /// Like [`Arena::try_alloc`], but aborts on allocation failure as
    /// `Vec::push` does.
    pub(crate) fn alloc(&mut self, element: T) -> usize {
        match self.free {
            Some(index) => {
                let node = &mut self.nodes[index];
                self.free = match node.slot {
                    Slot::Vacant { next_free } => next_free,
                    _ => unreachable!("free list points at slot {} which is in use", index),
                };
                node.slot = Slot::Occupied(element);
                node.next = GHOST;
                node.prev = GHOST;
                index
            }
            None => {
                self.nodes.push(Node::detached(element));
                self.nodes.len() - 1
            }
        }
    }

    /// Takes the element out of an occupied slot and puts the slot on the
    /// free list. The links of the slot are left as they were.
    pub(crate) fn release(&mut self, index: usize) -> T {
        let node = &mut self.nodes[index];
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        match mem::replace(&mut node.slot, vacant) {
            Slot::Occupied(element) => {
                node.generation = node.generation.wrapping_add(1);
                self.free = Some(index);
                element
            }
            other => {
                node.slot = other;
                panic!("released node {} which holds no element", index)
            }
        }
    }

    /// Base pointer of the node storage, for iterators that hand out
    /// disjoint mutable borrows of elements.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut Node<T> {
        self.nodes.as_mut_ptr()
    }
}
