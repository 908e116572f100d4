use dlist::{List, ListError, NodeRef};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::io;
use std::iter::FromIterator;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

fn trace_init() -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::prelude::*;
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .with_timer(())
        .set_default()
}

fn by_value(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

fn contents<T: Clone>(list: &List<T>) -> Vec<T> {
    list.assert_valid();
    list.iter().cloned().collect()
}

#[test]
fn insert_remove_index_sort_traverse() {
    let _trace = trace_init();

    let mut list = List::new();
    list.insert_last(10).unwrap();
    list.insert_last(20).unwrap();
    list.insert_first(5).unwrap();
    assert_eq!(contents(&list), vec![5, 10, 20]);
    assert_eq!(list.len(), 3);

    assert_eq!(list.remove(1), Some(10));
    assert_eq!(contents(&list), vec![5, 20]);

    assert_eq!(list.index_of(&20, by_value), Some(1));

    list.sort_by(|a, b| b.cmp(a));
    assert_eq!(contents(&list), vec![20, 5]);

    let mut visited = Vec::new();
    let found = list.traverse(|x| {
        visited.push(*x);
        *x == 5
    });
    assert!(found);
    assert_eq!(visited, vec![20, 5]);
}

#[test]
fn boundary_indices() {
    let _trace = trace_init();

    let mut list = List::new();
    assert_eq!(list.get(0), None);
    assert_eq!(list.remove(0), None);
    assert_eq!(list.remove_first(), None);
    assert_eq!(list.remove_last(), None);
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);

    let err = list.insert(1, 'x').unwrap_err();
    assert_eq!(err.kind(), &ListError::IndexOutOfRange { index: 1, len: 0 });
    assert_eq!(err.into_element(), 'x');
    assert!(list.is_empty());

    list.insert(0, 'b').unwrap();
    list.insert(0, 'a').unwrap();
    list.insert(2, 'c').unwrap();
    assert_eq!(contents(&list), vec!['a', 'b', 'c']);

    assert_eq!(list.get(3), None);
    assert_eq!(list.remove(3), None);
    assert!(list.insert(4, 'z').is_err());
    assert_eq!(contents(&list), vec!['a', 'b', 'c']);

    assert_eq!(list.first(), list.get(0));
    assert_eq!(list.last(), list.get(2));
}

#[test]
fn insert_then_remove_restores_the_list() {
    let original = Vec::from_iter(0..6);
    for index in 0..=original.len() {
        let mut list = List::from_iter(original.iter().copied());
        let node = list.insert(index, 99).unwrap();
        assert_eq!(list.get(index), Some(node));
        assert_eq!(list.len(), original.len() + 1);
        assert_eq!(list.remove(index), Some(99));
        assert_eq!(contents(&list), original);
    }
}

#[test]
fn find_and_index_agree() {
    let list = List::from_iter([4, 8, 15, 16, 23, 42, 15]);
    for x in 0..50 {
        match list.index_of(&x, by_value) {
            Some(index) => {
                let node = list.find(&x, by_value);
                assert_eq!(node, list.get(index));
                assert_eq!(list.element(node.unwrap()), Some(&x));
                assert!(list.iter().take(index).all(|e| *e != x));
            }
            None => assert_eq!(list.find(&x, by_value), None),
        }
    }
    assert_eq!(list.index_of(&15, by_value), Some(2));
}

#[test]
fn duplicates_are_independent() {
    let _trace = trace_init();

    let mut list = List::from_iter(vec![String::from("a"), String::from("b")]);
    let mut copy = list
        .try_duplicate_with(|s, _| Some(s.clone()))
        .unwrap();
    copy.insert_last(String::from("c")).unwrap();
    list.front_mut().unwrap().push('!');

    assert_eq!(contents(&list), vec!["a!", "b"]);
    assert_eq!(contents(&copy), vec!["a", "b", "c"]);

    let mut clone = copy.clone();
    clone.remove_first();
    assert_eq!(copy.len(), 3);
    assert_eq!(clone.len(), 2);
}

#[test]
fn clone_shares_rc_payloads() {
    let list = List::from_iter((0..3).map(Rc::new));
    let copy = list.clone();
    for (a, b) in list.iter().zip(&copy) {
        assert!(Rc::ptr_eq(a, b));
        assert_eq!(Rc::strong_count(a), 2);
    }
    drop(copy);
    assert!(list.iter().all(|rc| Rc::strong_count(rc) == 1));
}

#[test]
fn failed_duplicate_leaves_source_alone() {
    let _trace = trace_init();

    let list = List::from_iter(0..5);
    let err = list
        .try_duplicate_with(|x, size| {
            assert_eq!(size, std::mem::size_of::<i32>());
            if *x == 3 {
                None
            } else {
                Some(*x)
            }
        })
        .unwrap_err();
    assert_eq!(err, ListError::CopyFailed { index: 3 });
    assert_eq!(contents(&list), vec![0, 1, 2, 3, 4]);
}

#[test]
fn stale_and_foreign_handles_are_rejected() {
    let _trace = trace_init();

    let mut list = List::from_iter([1, 2, 3]);
    let mut other = List::from_iter([1, 2, 3]);

    let two = list.get(1).unwrap();
    assert_eq!(other.delete(two), None);
    assert_eq!(contents(&other), vec![1, 2, 3]);

    assert_eq!(list.delete(two), Some(2));
    assert_eq!(list.delete(two), None);
    assert_eq!(list.element(two), None);
    assert_eq!(list.next_node(two), None);

    // the freed slot is reused, the old handle must not see the new node
    let four = list.insert_last(4).unwrap();
    assert_ne!(four, two);
    assert_eq!(list.element(two), None);
    assert_eq!(list.element(four), Some(&4));
    assert_eq!(contents(&list), vec![1, 3, 4]);

    let first = list.first().unwrap();
    list.clear();
    assert_eq!(list.element(first), None);
    assert_eq!(list.delete(four), None);
}

#[test]
fn allocation_failure_is_reported() {
    let _trace = trace_init();

    assert!(matches!(
        List::<u64>::try_with_capacity(usize::MAX),
        Err(ListError::AllocFailed(_))
    ));
    let err = List::<u8>::try_with_capacity(usize::MAX).unwrap_err();
    assert_eq!(err.to_string(), "failed to allocate a list node");

    // failed operations leave the source alone
    let mut list = List::from_iter([1, 2, 3]);
    let err = list.insert(7, 4).unwrap_err();
    assert!(matches!(err.kind(), ListError::IndexOutOfRange { .. }));
    assert_eq!(err.into_element(), 4);
    assert!(list
        .try_duplicate_with(|x, _| if *x == 2 { None } else { Some(*x) })
        .is_err());
    assert_eq!(contents(&list), vec![1, 2, 3]);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn count(&self, message: &str) -> usize {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.contains(message))
            .count()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn bulk_teardown_logs_once() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut list = List::from_iter(0..100);
        assert_eq!(list.remove(0), Some(0));
        let first = list.first().unwrap();
        assert_eq!(list.delete(first), Some(1));
        list.clear();
        drop(list);

        let list = List::from_iter(0..50);
        assert_eq!(list.into_iter().rev().count(), 50);

        let list = List::from_iter(0..50);
        list.destroy_with(drop);
    });

    assert_eq!(logs.count("inserted element"), 0);
    assert_eq!(logs.count("removed element"), 1);
    assert_eq!(logs.count("deleted node"), 1);
    assert_eq!(logs.count("cleared list"), 1);
    assert_eq!(logs.count("destroyed list"), 1);
}

#[test]
fn walk_with_node_handles() {
    let list = List::from_iter(['a', 'b', 'c']);

    let mut forward = Vec::new();
    let mut node = list.first();
    while let Some(current) = node {
        forward.push(*list.element(current).unwrap());
        node = list.next_node(current);
    }
    assert_eq!(forward, vec!['a', 'b', 'c']);

    let mut backward = Vec::new();
    let mut node = list.last();
    while let Some(current) = node {
        backward.push(*list.element(current).unwrap());
        node = list.prev_node(current);
    }
    assert_eq!(backward, vec!['c', 'b', 'a']);
}

#[test]
fn destroy_hands_out_elements_in_order() {
    let list = List::from_iter(["x", "y", "z"]);
    let mut freed = Vec::new();
    list.destroy_with(|s| freed.push(s));
    assert_eq!(freed, vec!["x", "y", "z"]);
}

#[test]
fn element_size_hint() {
    assert_eq!(List::<u64>::new().element_size(), 8);
    assert_eq!(List::<u8>::with_element_size(128).element_size(), 128);
    let list = List::<u16>::try_with_capacity(32).unwrap();
    assert!(list.is_empty());
    assert_eq!(list.element_size(), 2);
}

#[derive(Debug)]
enum Op {
    InsertFirst,
    InsertLast,
    Insert(usize),
    Remove(usize),
    RemoveFirst,
    RemoveLast,
    Get(usize),
    Delete(usize),
    Find(usize),
    Sort,
}

fn run_ops(ops: Vec<usize>) {
    let ops = ops
        .iter()
        .map(|i| match i % 10 {
            0 => Op::InsertFirst,
            1 => Op::InsertLast,
            2 => Op::Insert(i / 10),
            3 => Op::Remove(i / 10),
            4 => Op::RemoveFirst,
            5 => Op::RemoveLast,
            6 => Op::Get(i / 10),
            7 => Op::Delete(i / 10),
            8 => Op::Find(i / 10),
            9 => Op::Sort,
            _ => unreachable!(),
        })
        .collect::<Vec<_>>();

    let mut list = List::<usize>::new();
    let mut reference = VecDeque::new();
    let mut handles: Vec<NodeRef> = Vec::new();

    for (i, op) in ops.iter().enumerate() {
        let _span = tracing::info_span!("op", ?i, ?op).entered();
        match *op {
            Op::InsertFirst => {
                reference.push_front(i);
                handles.push(list.insert_first(i).unwrap());
            }
            Op::InsertLast => {
                reference.push_back(i);
                handles.push(list.insert_last(i).unwrap());
            }
            Op::Insert(n) => {
                let index = n % (reference.len() + 1);
                reference.insert(index, i);
                let node = list.insert(index, i).unwrap();
                assert_eq!(list.element(node), Some(&i));
                handles.push(node);
            }
            Op::Remove(n) => {
                let index = n % (reference.len() + 1);
                assert_eq!(list.remove(index), reference.remove(index));
            }
            Op::RemoveFirst => assert_eq!(list.remove_first(), reference.pop_front()),
            Op::RemoveLast => assert_eq!(list.remove_last(), reference.pop_back()),
            Op::Get(n) => {
                let index = n % (reference.len() + 1);
                let element = list.get(index).and_then(|node| list.element(node));
                assert_eq!(element, reference.get(index));
            }
            Op::Delete(n) => {
                if handles.is_empty() {
                    continue;
                }
                let node = handles[n % handles.len()];
                let expected = list.element(node).copied();
                let deleted = list.delete(node);
                assert_eq!(deleted, expected);
                if let Some(value) = deleted {
                    let index = reference.iter().position(|v| *v == value).unwrap();
                    reference.remove(index);
                }
                assert_eq!(list.delete(node), None);
            }
            Op::Find(n) => {
                let x = n % (i + 1);
                let cmp = |a: &usize, b: &usize| a.cmp(b);
                let index = list.index_of(&x, cmp);
                assert_eq!(index, reference.iter().position(|v| *v == x));
                assert_eq!(list.find(&x, cmp), index.and_then(|k| list.get(k)));
            }
            Op::Sort => {
                list.sort_by_key(|v| v % 4);
                reference.make_contiguous().sort_by_key(|v| v % 4);
            }
        }
        list.assert_valid();
        assert_eq!(list.len(), reference.len());
        assert!(list.iter().eq(reference.iter()));
    }
}

proptest! {
    #[test]
    fn ops_match_vecdeque(ops: Vec<usize>) {
        let _trace = trace_init();
        let _span = tracing::info_span!("ops_match_vecdeque").entered();
        tracing::info!(?ops);
        run_ops(ops);
    }

    #[test]
    fn sort_matches_stable_slice_sort(input: Vec<(u8, u16)>) {
        let mut list = List::from_iter(input.iter().copied());
        list.sort_by(|a, b| a.0.cmp(&b.0));
        list.assert_valid();

        let mut expected = input;
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(Vec::from_iter(list), expected);
    }

    #[test]
    fn reverse_sort_keeps_every_handle(input: Vec<i16>) {
        let mut list = List::new();
        let handles = input
            .iter()
            .map(|x| list.insert_last(*x).unwrap())
            .collect::<Vec<_>>();
        list.sort_by(|a, b| b.cmp(a));
        list.assert_valid();
        for (node, x) in handles.iter().zip(&input) {
            prop_assert_eq!(list.element(*node), Some(x));
        }
        let sorted = Vec::from_iter(list.iter().copied());
        prop_assert!(sorted.windows(2).all(|w| w[0] >= w[1]));
    }
}
