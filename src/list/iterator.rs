use crate::list::arena::{Node, GHOST};
use crate::list::List;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

/// An iterator over the elements of a `List`.
///
/// It uses a pair of nodes `start..end` to represent a half-open subrange
/// of the list, where `start` is inclusive and `end` is not, together with
/// the number of elements left in it.
///
/// # Examples
///
/// ```compile_fail
/// use dlist::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.insert_last(4).unwrap();
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    start: usize,
    end: usize,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            list,
            start: list.front_node(),
            end: list.ghost_node(),
            len: list.len(),
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        for element in self.clone() {
            f.field(element);
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let list: &'a List<T> = self.list;
        let current = self.start;
        self.start = list.arena.next(current);
        self.len -= 1;
        Some(list.arena.occupied(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let list: &'a List<T> = self.list;
        self.end = list.arena.prev(self.end);
        self.len -= 1;
        Some(list.arena.occupied(self.end))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// `start..end` denotes a subrange of the list.
///
/// Though the `IterMut` only keeps a pointer into the node storage,
/// it actually *borrows* (mutably) from the list, so a phantom
/// marker of `&'a mut List<T>` is added to protect the list from
/// being read.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use dlist::List;
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    nodes: *mut Node<T>,
    start: usize,
    end: usize,
    len: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let start = list.front_node();
        let len = list.len();
        Self {
            nodes: list.arena.as_mut_ptr(),
            start,
            end: GHOST,
            len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut index = self.start;
        for _ in 0..self.len {
            // SAFETY: the `len` nodes from `start` are linked nodes of the
            // borrowed list that have not been yielded yet, so no mutable
            // reference to them exists.
            let current = unsafe { &*self.nodes.add(index) };
            if let Some(element) = current.element() {
                f.field(element);
            }
            index = current.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    /// Return `*start` and reset the iterating range to `(start.next)..end`,
    /// or return `None` if `start..end` is already empty.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `start..end` is always a valid range of the borrowed list,
        // and it is not empty here. Every node of it is yielded at most once,
        // so the returned reference is unique.
        let current: &'a mut Node<T> = unsafe { &mut *self.nodes.add(self.start) };
        self.start = current.next;
        self.len -= 1;
        current.element_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    /// Reset the iterating range to `start..(end.prev)` and return `*end`,
    /// or return `None` if `start..end` is already empty.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: `end` is either the ghost node or a node already yielded
        // from the back; only its `prev` link is read, never its element.
        self.end = unsafe { (*self.nodes.add(self.end)).prev };
        // SAFETY: same as `next`, the node at `end` has not been yielded yet.
        let current: &'a mut Node<T> = unsafe { &mut *self.nodes.add(self.end) };
        self.len -= 1;
        current.element_mut()
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.detach_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.detach_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;
    use std::iter::FromIterator;

    #[test]
    fn iter_both_ends() {
        macro_rules! check_iter {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                fn $FN<T, I>(input: I, mid: usize)
                where
                    T: Eq + Debug + Clone,
                    I: IntoIterator<Item = T>,
                {
                    #[allow(unused_mut)]
                    let mut vec = Vec::from_iter(input);
                    #[allow(unused_mut)]
                    let mut list = List::from_iter(vec.clone());
                    let len = vec.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);

                    let mut iter = list.$ITER() $( .$REV() )?;
                    for (i, item) in vec.$ITER() $( .$REV() )? .take(mid).enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    let mut iter = iter.rev();
                    for (i, item) in vec.$ITER() $( .$REV() )? .skip(mid).rev().enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - mid - i - 1);
                    }
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next(), None);
                    assert_eq!(iter.next_back(), None);
                    assert_eq!(iter.len(), 0);
                }
            };
        }
        check_iter!(check_forward, iter);
        check_iter!(check_forward_mut, iter_mut);
        check_iter!(check_backward, iter, rev);
        check_iter!(check_backward_mut, iter_mut, rev);

        fn check<T, I>(input: I, mid: usize)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T> + Clone,
        {
            check_forward(input.clone(), mid);
            check_forward_mut(input.clone(), mid);
            check_backward(input.clone(), mid);
            check_backward_mut(input, mid);
        }
        check(0..10, 10);
        check(0..10, 8);
        check(0..10, 5);
        check(0..10, 2);
        check(0..10, 0);
        check(0..2, 2);
        check(0..2, 1);
        check(0..2, 0);
        check(0..1, 1);
        check(0..1, 0);
        check(0..0, 0);
    }

    #[test]
    fn iter_after_removals() {
        let mut list = List::from_iter(0..6);
        list.remove(2);
        list.remove_first();
        list.insert_first(7).unwrap();
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![7, 1, 3, 4, 5]);
        assert_eq!(Vec::from_iter(list.iter().rev().copied()), vec![5, 4, 3, 1, 7]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut list = List::from_iter(1..=4);
        for element in &mut list {
            *element *= 10;
        }
        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() += 1;
        assert_eq!(format!("{:?}", iter), "IterMut(10, 20, 30)");
        drop(iter);
        assert_eq!(Vec::from_iter(list), vec![10, 20, 30, 41]);
    }

    #[test]
    fn into_iter_from_both_ends() {
        let list = List::from_iter(['a', 'b', 'c', 'd']);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.next_back(), Some('d'));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec!['b', 'c']);
    }

    #[test]
    fn extend_by_reference() {
        let mut list = List::from_iter([1, 2]);
        list.extend(&[3, 4]);
        assert_eq!(format!("{:?}", list.iter()), "Iter(1, 2, 3, 4)");
        assert_eq!(list.len(), 4);
        list.assert_valid();
    }
}
