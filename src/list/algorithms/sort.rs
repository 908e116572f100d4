//! Stable merge sort over the arena links.
//!
//! A range is a pair of slot indices `start..end`: `start` is the first slot
//! in it and `end` is the slot right after it, often the ghost. Sorting only
//! rewrites `next`/`prev` of the slots; every element stays in the slot it
//! was allocated in, which is what keeps node handles valid. Because the
//! first slot of a range may change, each pass returns the slot that now
//! heads its range, while `end` never moves.

use crate::list::arena::Arena;
use crate::List;

const INSERTION_SORT_THRESHOLD: usize = 8;

pub(super) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (start, end) = (list.front_node(), list.ghost_node());
    let arena = &mut list.arena;
    match list.len {
        0 | 1 => {}
        len if len <= INSERTION_SORT_THRESHOLD => {
            insertion_sort_range(arena, start, end, &mut less);
        }
        _ => {
            merge_sort_range(arena, start, end, &mut less);
        }
    }
}

/// Returns the slot halfway through `start..end` and the range length.
fn mid_of_range<T>(arena: &Arena<T>, mut start: usize, end: usize) -> (usize, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = arena.next(start);
        if start != end {
            len += 1;
            start = arena.next(start);
            mid = arena.next(mid);
        }
    }
    (mid, len)
}

fn is_less<T, F>(arena: &Arena<T>, a: usize, b: usize, less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    less(arena.occupied(a), arena.occupied(b))
}

/// Sorts `start..end` and returns the node that is now first in the range.
fn merge_sort_range<T, F>(arena: &mut Arena<T>, mut start: usize, end: usize, less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut mid, len) = mid_of_range(arena, start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(arena, start, end, less);
    }

    if start != mid && arena.next(start) != mid {
        start = merge_sort_range(arena, start, mid, less);
    }
    if mid != end && arena.next(mid) != end {
        mid = merge_sort_range(arena, mid, end, less);
    }

    if start != mid && mid != end {
        start = merge_range(arena, start, mid, end, less);
    }
    start
}

fn merge_range<T, F>(
    arena: &mut Arena<T>,
    mut start: usize,
    mid: usize,
    end: usize,
    less: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    // `start..mid` and `mid..end` are each sorted. Slots of the right half
    // are spliced into the left half in runs; the cursor `merged` only
    // moves forward, so the whole merge is a single pass over the links.
    let (mut merged, merged_back, mut to_merge) = (start, arena.prev(mid), mid);
    // `merged_back` is the largest slot of the left half. A right-half slot
    // that is not below it, and everything after it, is already in place.
    while to_merge != end && is_less(arena, to_merge, merged_back, less) {
        // Advance to the first left slot strictly greater than `to_merge`.
        // Equal left slots are passed over, so they stay first.
        while merged != to_merge && !is_less(arena, to_merge, merged, less) {
            merged = arena.next(merged);
        }
        if merged == to_merge {
            break;
        }

        // Every right slot that is still below `merged` joins the run, so
        // a run of any length costs three `connect` calls.
        let mut next_to_merge = arena.next(to_merge);
        while next_to_merge != end && is_less(arena, next_to_merge, merged, less) {
            next_to_merge = arena.next(next_to_merge);
        }
        // A run spliced in front of `start` becomes the new head.
        if merged == start {
            start = to_merge;
        }
        let run_back = arena.prev(next_to_merge);
        move_nodes(arena, to_merge, run_back, merged);
        to_merge = next_to_merge;
    }
    start
}

/// Sorts `start..end` and returns the node that is now first in the range.
fn insertion_sort_range<T, F>(arena: &mut Arena<T>, mut start: usize, end: usize, less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    if start == end {
        return start;
    }
    let (mut sorted_back, mut to_sort) = (start, arena.next(start));
    loop {
        // Grow the sorted prefix while slots arrive in order.
        while to_sort != end && !is_less(arena, to_sort, sorted_back, less) {
            sorted_back = to_sort;
            to_sort = arena.next(to_sort);
        }
        if to_sort == end {
            break;
        }
        // `to_sort` is out of order: relink it in front of the first slot of
        // the prefix that is strictly greater, which keeps equal slots stable.
        let mut sorted = start;
        while sorted != to_sort && !is_less(arena, to_sort, sorted, less) {
            sorted = arena.next(sorted);
        }
        if sorted == start {
            start = to_sort;
        }
        let next = arena.next(to_sort);
        move_node(arena, std::mem::replace(&mut to_sort, next), sorted);
    }
    start
}

fn move_node<T>(arena: &mut Arena<T>, from: usize, to: usize) {
    move_nodes(arena, from, from, to);
}

/// Cuts the slots `from_front..=from_back` out of the chain by joining their
/// neighbours, then splices them in between `to` and its predecessor.
fn move_nodes<T>(arena: &mut Arena<T>, from_front: usize, from_back: usize, to: usize) {
    arena.connect(arena.prev(from_front), arena.next(from_back));
    arena.connect(arena.prev(to), from_front);
    arena.connect(from_back, to);
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::iter::FromIterator;

    #[test]
    fn sort_small_and_large() {
        for len in [0usize, 1, 2, 7, 8, 9, 16, 17, 100] {
            let mut list = List::from_iter((0..len).map(|i| (i * 7919) % 101));
            let mut expected = Vec::from_iter(list.iter().copied());
            expected.sort_unstable();
            list.sort();
            list.assert_valid();
            assert_eq!(Vec::from_iter(list), expected);
        }
    }

    #[test]
    fn sort_is_stable() {
        let input = Vec::from_iter((0..40).map(|i| ((i * 13) % 5, i)));
        let mut list = List::from_iter(input.iter().copied());
        list.sort_by_key(|&(key, _)| key);
        list.assert_valid();

        let mut expected = input;
        expected.sort_by_key(|&(key, _)| key);
        assert_eq!(Vec::from_iter(list), expected);
    }

    #[test]
    fn sort_duplicates_and_sorted_input() {
        let mut list = List::from_iter([3, 3, 3, 1, 1, 2, 2, 2, 2, 3, 1]);
        list.sort();
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
        list.sort();
        list.assert_valid();
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(Vec::from_iter(list), vec![3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn sort_after_slot_reuse() {
        let mut list = List::from_iter(0..12);
        for index in [9, 4, 0] {
            list.remove(index);
        }
        list.insert(2, 50).unwrap();
        list.insert_first(-1).unwrap();
        list.sort_by(|a, b| b.cmp(a));
        list.assert_valid();
        assert_eq!(
            Vec::from_iter(list),
            vec![50, 11, 10, 8, 7, 6, 5, 3, 2, 1, -1]
        );
    }
}
