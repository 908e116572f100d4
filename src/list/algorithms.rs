use crate::list::arena::GHOST;
use crate::list::{List, NodeRef};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use tracing::trace;

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let mut list = List::with_element_size(self.element_size());
        list.extend(self.iter().cloned());
        list
    }

    fn clone_from(&mut self, other: &Self) {
        self.element_size = other.element_size;
        let mut node = self.front_node();
        for element in other {
            if node == GHOST {
                self.push_back(element.clone());
                continue;
            }
            if let Some(current) = self.arena.element_mut(node) {
                current.clone_from(element);
            }
            node = self.arena.next(node);
        }
        while node != GHOST {
            let next = self.arena.next(node);
            self.detach_node(node);
            node = next;
        }
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.insert_last(0).unwrap();
    /// list.insert_last(1).unwrap();
    /// list.insert_last(2).unwrap();
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns a handle to the first node, in forward order, whose element
    /// compares equal to `x` under `compare`.
    ///
    /// `compare` is called with the element of the node first and `x`
    /// second, so `x` may be of a different type, such as a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([("a", 1), ("b", 2), ("c", 2)]);
    ///
    /// let node = list.find(&2, |(_, v), x| v.cmp(x)).unwrap();
    /// assert_eq!(list.element(node), Some(&("b", 2)));
    /// assert!(list.find(&7, |(_, v), x| v.cmp(x)).is_none());
    /// ```
    pub fn find<U, F>(&self, x: &U, mut compare: F) -> Option<NodeRef>
    where
        U: ?Sized,
        F: FnMut(&T, &U) -> Ordering,
    {
        self.find_by(|element| compare(element, x) == Ordering::Equal)
    }

    /// Returns a handle to the first node, in forward order, whose element
    /// satisfies `pred`.
    pub fn find_by<P>(&self, mut pred: P) -> Option<NodeRef>
    where
        P: FnMut(&T) -> bool,
    {
        let mut node = self.front_node();
        while node != GHOST {
            if pred(self.arena.occupied(node)) {
                return Some(self.node_ref(node));
            }
            node = self.arena.next(node);
        }
        None
    }

    /// Returns the index of the first element, in forward order, that
    /// compares equal to `x` under `compare`, or `None` if there is no such
    /// element.
    ///
    /// It agrees with [`List::find`]: `list.get(i)` is the node `find`
    /// returns whenever this returns `Some(i)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([5, 20, 20]);
    /// assert_eq!(list.index_of(&20, |a, b| a.cmp(b)), Some(1));
    /// assert_eq!(list.index_of(&6, |a, b| a.cmp(b)), None);
    /// ```
    pub fn index_of<U, F>(&self, x: &U, mut compare: F) -> Option<usize>
    where
        U: ?Sized,
        F: FnMut(&T, &U) -> Ordering,
    {
        self.iter()
            .position(|element| compare(element, x) == Ordering::Equal)
    }

    /// Calls `visit` on each element in forward order, stopping at the
    /// first one for which it returns `true`.
    ///
    /// Returns `true` if the walk stopped early, `false` if every element
    /// was visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([20, 5, 7]);
    ///
    /// let mut visited = Vec::new();
    /// let found = list.traverse(|x| {
    ///     visited.push(*x);
    ///     *x == 5
    /// });
    /// assert!(found);
    /// assert_eq!(visited, vec![20, 5]);
    ///
    /// let mut sum = 0;
    /// assert!(!list.traverse(|x| {
    ///     sum += x;
    ///     false
    /// }));
    /// assert_eq!(sum, 32);
    /// ```
    pub fn traverse<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().any(|element| visit(element))
    }

    /// Like [`List::traverse`], but hands out mutable references.
    pub fn traverse_mut<F>(&mut self, mut visit: F) -> bool
    where
        F: FnMut(&mut T) -> bool,
    {
        self.iter_mut().any(|element| visit(element))
    }

    /// Sort the list.
    ///
    /// This sort is stable (i.e., does not reorder equal elements). Nodes are
    /// relinked, never moved, so every [`NodeRef`] stays valid.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is done by a naive merge sort. There is no extra
    /// temporary storage during merging.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    /// let mut list = List::from_iter([5, 2, 4, 3, 1]);
    ///
    /// list.sort();
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        trace!(len = self.len(), "sorting list");
        sort::merge_sort(self, |a, b| a.lt(b));
    }

    /// Sort the list with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the list. If the ordering is not total, the order
    /// of the elements is unspecified, but the list stays well formed.
    ///
    /// For example, while [`f64`] doesn’t implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function
    /// when we know the list doesn’t contain a `NaN`.
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    /// let mut floats = List::from_iter([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(Vec::from_iter(floats), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* * log(*n*)) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(Vec::from_iter(v.iter().copied()), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(Vec::from_iter(v), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        trace!(len = self.len(), "sorting list by comparator");
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }

    /// Sorts the list with a key extraction function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements)
    /// and *O*(*m* \* *n* \* log(*n*)) worst-case, where the
    /// key function is *O*(*m*).
    ///
    /// # Examples
    ///
    /// ```
    /// use dlist::List;
    /// use std::iter::FromIterator;
    /// let mut v = List::from_iter([-5i32, 4, 1, -3, 2]);
    ///
    /// v.sort_by_key(|k| k.abs());
    /// assert_eq!(Vec::from_iter(v), vec![1, 2, -3, 4, -5]);
    /// ```
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        trace!(len = self.len(), "sorting list by key");
        sort::merge_sort(self, |a, b| f(a).lt(&f(b)));
    }
}
