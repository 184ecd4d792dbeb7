use super::*;
use crate::BidirectionalCursor;

use std::{cell::Cell, collections::hash_map::DefaultHasher, rc::Rc};

struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn assert_capacity_policy<T>(arr: &DynArray<T>) {
    let cap = arr.capacity();
    assert!(arr.len() <= cap);
    assert!(cap == DynArray::<T>::MIN_CAPACITY || arr.len() >= cap / 4, "len {} with capacity {}", arr.len(), cap);
}

#[test]
fn dyn_array_new() {
    let arr = DynArray::<i32>::new();
    assert_eq!(arr.capacity(), 0);
    assert_eq!(arr.len(), 0);
    assert!(arr.is_empty());
    assert!(!arr.is_moved_from());
}

#[test]
fn dyn_array_growth() {
    let mut arr = DynArray::new();

    arr.push_back(0);
    assert_eq!(arr.capacity(), 8);

    for i in 1..8 {
        arr.push_back(i);
    }
    assert_eq!(arr.capacity(), 8);

    arr.push_back(8);
    assert_eq!(arr.capacity(), 16);

    for i in 9..17 {
        arr.push_back(i);
    }
    assert_eq!(arr.capacity(), 32);
    assert_eq!(arr.len(), 17);
    assert!(arr.iter().copied().eq(0..17));
}

#[test]
fn dyn_array_shrink_on_pop_front() {
    let mut arr = DynArray::new();
    for i in 0..10_000u32 {
        arr.push_back(i);
    }
    assert_eq!(arr.capacity(), 16384);

    for i in 0..10_000u32 {
        assert_eq!(arr.pop_front(), Ok(i));
        assert_capacity_policy(&arr);
    }

    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 8);
    assert_eq!(arr.pop_front(), Err(Error::EmptyContainer{ op: "pop_front" }));
}

#[test]
fn dyn_array_push_front() {
    let mut arr = DynArray::new();
    for i in 0..5 {
        arr.push_front(i);
    }
    assert_eq!(arr, [4, 3, 2, 1, 0]);

    for i in (0..5).rev() {
        assert_eq!(arr.pop_front(), Ok(i));
    }
    assert!(arr.is_empty());
}

#[test]
fn dyn_array_pop_back() {
    let mut arr = dyn_array![1, 2, 3];
    assert_eq!(arr.pop_back(), Ok(3));
    assert_eq!(arr.pop_back(), Ok(2));
    assert_eq!(arr.pop_back(), Ok(1));
    assert_eq!(arr.pop_back(), Err(Error::EmptyContainer{ op: "pop_back" }));
}

#[test]
fn dyn_array_get() {
    let mut arr = dyn_array![1, 2, 3];
    assert_eq!(arr.get(2), Ok(&3));
    assert_eq!(arr.get(3), Err(Error::IndexOutOfRange{ index: 3, len: 3 }));

    *arr.get_mut(0).unwrap() = 10;
    assert_eq!(arr[0], 10);
    assert_eq!(arr.front(), Some(&10));
    assert_eq!(arr.back(), Some(&3));
    assert!(arr.contains(&2));
    assert!(!arr.contains(&1));
}

#[test]
fn dyn_array_insert() {
    let mut arr = dyn_array![1, 2, 4];
    let pos = (arr.cbegin() + 2).unwrap().position();
    arr.insert(pos, 3).unwrap();
    assert_eq!(arr, [1, 2, 3, 4]);

    let pos = arr.cend().position();
    arr.insert(pos, 5).unwrap();
    assert_eq!(arr, [1, 2, 3, 4, 5]);
}

#[test]
fn dyn_array_erase() {
    let mut arr = dyn_array![10, 20, 30, 40, 50];
    let pos = (arr.cbegin() + 2).unwrap().position();
    assert_eq!(arr.erase(pos), Ok(30));
    assert_eq!(arr, [10, 20, 40, 50]);

    let end = arr.cend().position();
    assert!(matches!(arr.erase(end), Err(Error::InvalidIterator(_))));

    let mut empty = DynArray::<i32>::new();
    let pos = empty.cbegin().position();
    assert_eq!(empty.erase(pos), Err(Error::EmptyContainer{ op: "erase" }));
}

#[test]
fn dyn_array_erase_range() {
    let mut arr = dyn_array![10, 20, 30, 40, 50];
    let first = (arr.cbegin() + 1).unwrap().position();
    let last = (arr.cbegin() + 3).unwrap().position();
    assert_eq!(arr.erase_range(first, last), Ok(2));
    assert_eq!(arr, [10, 40, 50]);

    let pos = (arr.cbegin() + 1).unwrap().position();
    assert_eq!(arr.erase_range(pos, pos), Ok(0));
    assert_eq!(arr, [10, 40, 50]);

    let first = (arr.cbegin() + 2).unwrap().position();
    let last = arr.cbegin().position();
    assert!(matches!(arr.erase_range(first, last), Err(Error::InvalidIterator(_))));
    assert_eq!(arr, [10, 40, 50]);
}

#[test]
fn dyn_array_erase_range_shrinks() {
    let mut arr: DynArray<u32> = (0..64).collect();
    assert_eq!(arr.capacity(), 64);

    let first = arr.cbegin().position();
    let last = (arr.cbegin() + 60).unwrap().position();
    assert_eq!(arr.erase_range(first, last), Ok(60));
    assert_eq!(arr, [60, 61, 62, 63]);
    assert_eq!(arr.capacity(), 16);
}

#[test]
fn dyn_array_stale_position() {
    let mut arr: DynArray<u32> = (0..8).collect();
    let pos = arr.cbegin().position();
    arr.push_back(8);
    assert_eq!(arr.erase(pos), Err(Error::InvalidIterator("position was invalidated by a reallocation")));

    let other = dyn_array![1, 2, 3];
    let foreign = other.cbegin().position();
    assert_eq!(arr.erase(foreign), Err(Error::InvalidIterator("position belongs to another container")));

    let mut arr = dyn_array![1, 2, 3, 4, 5];
    let pos = (arr.cbegin() + 4).unwrap().position();
    arr.pop_back().unwrap();
    arr.pop_back().unwrap();
    assert_eq!(arr.capacity(), 8);
    assert_eq!(arr.erase(pos), Err(Error::InvalidIterator("position is past the end")));
}

#[test]
fn dyn_array_generation_does_not_wrap() {
    let mut arr: DynArray<u32> = (0..8).collect();
    arr.generation = u64::from(u32::MAX);
    let pos = arr.cbegin().position();
    arr.push_back(8);
    assert_eq!(arr.generation, u64::from(u32::MAX) + 1);
    assert_eq!(arr.erase(pos), Err(Error::InvalidIterator("position was invalidated by a reallocation")));
}

#[test]
fn dyn_array_take() {
    let mut arr = dyn_array![1, 2, 3];
    let pos = (arr.cbegin() + 1).unwrap().position();

    let mut moved = arr.take();
    assert_eq!(moved, [1, 2, 3]);
    assert!(arr.is_moved_from());
    assert_eq!(arr.len(), 0);
    assert_eq!(arr.get(0), Err(Error::UseAfterMove));
    assert_eq!(arr.pop_front(), Err(Error::EmptyContainer{ op: "pop_front" }));
    assert!(matches!(arr.erase(pos), Err(Error::EmptyContainer{ .. })));

    // Positions follow the storage
    assert_eq!(moved.erase(pos), Ok(2));

    arr.push_back(7);
    assert!(!arr.is_moved_from());
    assert_eq!(arr.get(0), Ok(&7));
}

#[test]
fn dyn_array_move_from() {
    let mut a = dyn_array![1, 2];
    let mut b = dyn_array![3, 4, 5];
    a.move_from(&mut b);
    assert_eq!(a, [3, 4, 5]);
    assert!(b.is_moved_from());
    assert_eq!(b.get(0), Err(Error::UseAfterMove));
}

#[test]
#[should_panic(expected = "after its storage was moved away")]
fn dyn_array_index_after_move() {
    let mut arr = dyn_array![1, 2, 3];
    let _moved = arr.take();
    let _value = arr[0];
}

#[test]
#[should_panic(expected = "Index out of range: the len is 3 but the index is 5")]
fn dyn_array_index_out_of_range() {
    let arr = dyn_array![1, 2, 3];
    let _value = arr[5];
}

#[test]
#[should_panic(expected = "Index out of range: the len is 2 but the index is 2")]
fn dyn_array_index_mut_out_of_range() {
    let mut arr = dyn_array![1, 2];
    arr[1] = 20;
    assert_eq!(arr, [1, 20]);
    arr[2] = 30;
}

#[test]
fn dyn_array_index_ranges() {
    let mut arr = dyn_array![1, 2, 3, 4];
    assert_eq!(arr[0], 1);
    assert_eq!(&arr[1..3], &[2, 3]);
    assert_eq!(&arr[..=1], &[1, 2]);
    arr[2..].copy_from_slice(&[30, 40]);
    assert_eq!(arr, [1, 2, 30, 40]);
}

#[test]
fn dyn_array_clone() {
    let arr = dyn_array![1, 2, 3];
    let mut copy = arr.clone();
    copy.push_back(4);
    copy[0] = 0;
    assert_eq!(arr, [1, 2, 3]);
    assert_eq!(copy, [0, 2, 3, 4]);

    copy.clone_from(&arr);
    assert_eq!(copy, arr);
}

#[test]
fn dyn_array_cursor() {
    let arr = dyn_array![1, 2, 3];

    assert!(matches!(arr.cend().get(), Err(Error::InvalidIterator(_))));
    assert_eq!((arr.cend() - 1).unwrap().get(), Ok(&3));
    assert_eq!(arr.cbegin() + 3, Ok(arr.cend()));
    assert!((arr.cbegin() + 4).is_err());
    assert!((arr.cbegin() - 1).is_err());

    let mut cursor = arr.cbegin();
    assert!(cursor.is_begin());
    assert!(cursor.advance_by(5).is_err());
    assert_eq!(cursor.index(), 0);

    let before = cursor.post_next().unwrap();
    assert_eq!(before.index(), 0);
    assert_eq!(cursor.current(), Ok(&2));

    let cursor = cursor.offset(2).unwrap();
    assert!(cursor.is_end());
    let cursor = cursor.offset(-3).unwrap();
    assert_eq!(cursor.current(), Ok(&1));

    let empty = DynArray::<i32>::new();
    assert!(empty.cbegin().is_end());
    assert_eq!(empty.cbegin(), empty.cend());
}

#[test]
fn dyn_array_cursor_mut() {
    let mut arr = dyn_array![1, 2, 3];
    {
        let mut cursor = arr.begin();
        cursor.move_next().unwrap();
        *cursor.current_mut().unwrap() = 20;

        cursor.insert_before(15);
        assert_eq!(cursor.current(), Ok(&20));
        assert_eq!(cursor.index(), 2);

        assert_eq!(cursor.remove_current(), Ok(20));
        assert_eq!(cursor.current(), Ok(&3));

        cursor.move_next().unwrap();
        assert!(cursor.is_end());
        assert!(matches!(cursor.remove_current(), Err(Error::InvalidIterator(_))));
    }
    assert_eq!(arr, [1, 15, 3]);

    let mut end = arr.end();
    end.insert_before(4);
    assert!(end.is_end());
    assert_eq!(arr, [1, 15, 3, 4]);
}

#[test]
fn dyn_array_clear() {
    let mut arr: DynArray<u32> = (0..100).collect();
    assert_eq!(arr.capacity(), 128);
    arr.clear();
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 8);

    let mut arr = DynArray::<u32>::new();
    arr.clear();
    assert_eq!(arr.capacity(), 0);
}

#[test]
fn dyn_array_drops() {
    let drops = Rc::new(Cell::new(0));
    let mut arr: DynArray<DropCounter> = (0..10).map(|_| DropCounter(drops.clone())).collect();

    let first = (arr.cbegin() + 2).unwrap().position();
    let last = (arr.cbegin() + 5).unwrap().position();
    arr.erase_range(first, last).unwrap();
    assert_eq!(drops.get(), 3);

    drop(arr.pop_back().unwrap());
    assert_eq!(drops.get(), 4);

    drop(arr);
    assert_eq!(drops.get(), 10);

    let drops = Rc::new(Cell::new(0));
    let arr: DynArray<DropCounter> = (0..6).map(|_| DropCounter(drops.clone())).collect();
    let mut iter = arr.into_iter();
    drop(iter.next());
    drop(iter.next_back());
    assert_eq!(drops.get(), 2);
    drop(iter);
    assert_eq!(drops.get(), 6);
}

#[test]
fn dyn_array_into_iter() {
    let arr = dyn_array![1, 2, 3, 4];
    let mut iter = arr.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(1));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.as_slice(), &[2, 3]);
    assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
}

#[test]
fn dyn_array_extend() {
    let mut arr = dyn_array![1, 2];
    arr.extend([3, 4]);
    arr.extend(&[5, 6]);
    assert_eq!(arr, [1, 2, 3, 4, 5, 6]);

    let arr = dyn_array![7; 3];
    assert_eq!(arr, [7, 7, 7]);
}

#[test]
fn dyn_array_hash_and_debug() {
    let hash = |arr: &DynArray<i32>| {
        let mut hasher = DefaultHasher::new();
        arr.hash(&mut hasher);
        hasher.finish()
    };

    let a = dyn_array![1, 2, 3];
    let b: DynArray<i32> = (1..4).collect();
    assert_eq!(a, b);
    assert_eq!(hash(&a), hash(&b));
    assert_eq!(format!("{a:?}"), "[1, 2, 3]");
}

#[test]
fn dyn_array_zero_sized() {
    let mut arr = DynArray::new();
    for _ in 0..20 {
        arr.push_back(());
    }
    assert_eq!(arr.len(), 20);
    assert_eq!(arr.capacity(), 32);
    assert_eq!(arr.pop_front(), Ok(()));
}
