use strand_collections::*;

/// Behaviour both containers share, instantiated once per container
macro_rules! container_tests {
    ($module:ident, $container:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn appends_keep_order() {
                let mut container = $container::new();
                for i in 0..1000u32 {
                    container.push_back(i);
                }
                assert_eq!(container.len(), 1000);
                assert!(container.iter().copied().eq(0..1000));
                assert_eq!(container.get(999), Ok(&999));
            }

            #[test]
            fn push_front_then_pop_front() {
                let mut container = $container::from([1, 2, 3]);
                container.push_front(0);
                assert_eq!(container.pop_front(), Ok(0));
                assert_eq!(container, [1, 2, 3]);
            }

            #[test]
            fn pop_back_until_empty() {
                let mut container: $container<u32> = (0..100).collect();
                for i in (0..100).rev() {
                    assert_eq!(container.pop_back(), Ok(i));
                }
                assert!(matches!(container.pop_back(), Err(Error::EmptyContainer{ .. })));
            }

            #[test]
            fn copies_are_independent() {
                let original = $container::from([1, 2, 3]);
                let mut copy = original.clone();
                assert_eq!(copy, original);

                copy.push_back(4);
                assert_ne!(copy, original);
                assert_eq!(original.len(), 3);
            }

            #[test]
            fn take_transfers_order() {
                let mut source: $container<u32> = (0..10).collect();
                let target = source.take();
                assert!(source.is_empty());
                assert!(target.iter().copied().eq(0..10));

                let mut assigned = $container::new();
                assigned.push_back(99);
                let mut target = target;
                assigned.move_from(&mut target);
                assert_eq!(assigned.len(), 10);
                assert!(target.is_empty());
            }

            #[test]
            fn erase_range_keeps_relative_order() {
                let mut container = $container::from([10, 20, 30, 40, 50]);
                let first = (container.cbegin() + 1).unwrap().position();
                let last = (container.cbegin() + 3).unwrap().position();
                assert_eq!(container.erase_range(first, last), Ok(2));
                assert_eq!(container, [10, 40, 50]);
                assert_eq!(container.len(), 3);

                let pos = container.cend().position();
                assert_eq!(container.erase_range(pos, pos), Ok(0));
                assert_eq!(container.len(), 3);
            }

            #[test]
            fn end_is_never_dereferenced() {
                let mut container = $container::from([1]);
                assert!(matches!(container.cend().current(), Err(Error::InvalidIterator(_))));
                assert!(matches!(container.end().current_mut(), Err(Error::InvalidIterator(_))));

                let empty = $container::<i32>::new();
                assert!(matches!(empty.cbegin().current(), Err(Error::InvalidIterator(_))));
            }

            #[test]
            fn failed_offset_keeps_cursor() {
                let container = $container::from([1, 2, 3]);
                let mut cursor = container.cbegin();
                cursor.move_next().unwrap();

                assert!(cursor.advance_by(3).is_err());
                assert_eq!(cursor.current(), Ok(&2));
                assert!(cursor.retreat_by(2).is_err());
                assert_eq!(cursor.current(), Ok(&2));

                cursor.advance_by(2).unwrap();
                assert!(cursor.is_end());
                assert!(cursor.move_next().is_err());
            }

            #[test]
            fn cursor_equality_is_identity() {
                let a = $container::from([1, 2, 3]);
                let b = $container::from([1, 2, 3]);
                assert_eq!(a.cbegin(), a.cbegin());
                assert_ne!(a.cbegin(), b.cbegin());
                assert_ne!(a.cbegin().position(), b.cbegin().position());
            }

            #[test]
            fn positions_are_container_bound() {
                let mut a = $container::from([1, 2, 3]);
                let b = $container::from([1, 2, 3]);
                let pos = b.cbegin().position();
                assert!(matches!(a.erase(pos), Err(Error::InvalidIterator(_))));
                assert!(matches!(a.insert(pos, 0), Err(Error::InvalidIterator(_))));
                assert_eq!(a, [1, 2, 3]);
            }
        }
    };
}

container_tests!(dyn_array_behaviour, DynArray);
container_tests!(linked_list_behaviour, LinkedList);

#[test]
fn dyn_array_append_then_pop_front_shrinks() {
    const COUNT : u32 = 100_000;

    let mut arr = DynArray::new();
    for i in 0..COUNT {
        arr.push_back(i);
    }
    let peak = arr.capacity();
    assert!(peak >= COUNT as usize);

    for i in 0..COUNT {
        assert_eq!(arr.pop_front(), Ok(i));
    }
    assert!(arr.capacity() < peak);
    assert_eq!(arr.capacity(), DynArray::<u32>::MIN_CAPACITY);
    assert_eq!(arr.pop_front(), Err(Error::EmptyContainer{ op: "pop_front" }));
}

#[test]
fn moved_from_containers() {
    let mut arr = dyn_array![1, 2, 3];
    let _arr = arr.take();
    assert!(arr.is_empty());
    assert_eq!(arr.get(0), Err(Error::UseAfterMove));

    let mut list = linked_list![1, 2, 3];
    let _list = list.take();
    assert!(list.is_empty());
    assert_eq!(list.get(0), Err(Error::IndexOutOfRange{ index: 0, len: 0 }));
    assert!(list.cbegin().is_end());
}

#[test]
fn errors_display() {
    assert_eq!(Error::EmptyContainer{ op: "pop_back" }.to_string(), "Cannot pop_back on an empty container");
    assert_eq!(Error::IndexOutOfRange{ index: 4, len: 2 }.to_string(), "Index out of range: the len is 2 but the index is 4");
    assert_eq!(Error::InvalidIterator("cannot advance past the end").to_string(), "Invalid iterator: cannot advance past the end");
}
