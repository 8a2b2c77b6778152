//! Several dictionaries allocating from one arena.

use treapdict_arena::{shared_arena_is_live, ArenaConfig, SharedArena};
use treapdict_engine::validate::check_forest;
use treapdict_engine::TreapDict;
use treapdict_test_utils::{random_entries, setup_logger};

#[test]
fn dictionaries_on_one_arena_stay_independent() {
    setup_logger();
    let arena = SharedArena::new(&ArenaConfig::new(4).with_seed(8));
    let mut dicts: Vec<TreapDict<u32, String>> =
        (0..4).map(|_| TreapDict::new_in(&arena)).collect();
    assert_eq!(arena.holder_count(), 5);

    let data: Vec<_> = (0..4).map(|i| random_entries(256, i)).collect();
    for (dict, entries) in dicts.iter_mut().zip(&data) {
        dict.extend(entries.iter().cloned());
    }
    for (i, dict) in dicts.iter_mut().enumerate() {
        for (k, _) in data[i].iter().step_by(2) {
            assert!(dict.remove(k));
        }
    }

    for (dict, entries) in dicts.iter().zip(&data) {
        assert_eq!(dict.len(), 128);
        for (j, (k, v)) in entries.iter().enumerate() {
            match dict.search(k) {
                Ok(found) => {
                    assert_eq!(j % 2, 1);
                    assert_eq!(&*found, v);
                }
                Err(_) => assert_eq!(j % 2, 0),
            }
        }
    }

    let roots: Vec<_> = dicts.iter().map(|d| d.root_slot()).collect();
    assert_eq!(check_forest(&arena.borrow(), &roots), Ok(()));
    assert_eq!(arena.borrow().live_count(), 4 * 128);
}

#[test]
fn clearing_one_dictionary_leaves_others_intact() {
    let arena = SharedArena::new(&ArenaConfig::new(8).with_seed(4));
    let mut a: TreapDict<u32, u32> = TreapDict::new_in(&arena);
    let mut b: TreapDict<u32, u32> = TreapDict::new_in(&arena);
    a.extend((0..100).map(|k| (k, k)));
    b.extend((0..100).map(|k| (k, k + 1)));

    a.clear();
    assert!(a.is_empty());
    assert_eq!(b.len(), 100);
    assert_eq!(*b.search(&42).unwrap(), 43);

    // a's freed slots are reused by b before the arena grows again.
    let capacity = arena.borrow().capacity();
    b.extend((100..200).map(|k| (k, k)));
    assert_eq!(arena.borrow().capacity(), capacity);
}

#[test]
fn shared_constructor_reuses_first_capacity() {
    let first: TreapDict<i64, u8> = TreapDict::shared(4);
    let second: TreapDict<i64, u8> = TreapDict::shared(1_000);
    assert!(first.arena().ptr_eq(second.arena()));
    assert_eq!(second.arena().borrow().capacity(), 4);

    drop(first);
    drop(second);
    assert!(!shared_arena_is_live::<i64, u8>());

    let third: TreapDict<i64, u8> = TreapDict::shared(32);
    assert_eq!(third.arena().borrow().capacity(), 32);
}

#[test]
fn shared_dictionaries_see_growth_from_each_other() {
    let mut a: TreapDict<i16, i16> = TreapDict::shared(2);
    let mut b: TreapDict<i16, i16> = TreapDict::shared(2);
    a.insert(1, 1);
    a.insert(2, 2);
    b.insert(3, 3);
    assert_eq!(a.arena().borrow().capacity(), 4);
    assert_eq!(*a.search(&2).unwrap(), 2);
    assert_eq!(*b.search(&3).unwrap(), 3);
    assert!(b.search(&1).is_err());
}

#[test]
fn arena_released_after_last_dictionary() {
    let arena = SharedArena::new(&ArenaConfig::default());
    let dict: TreapDict<u32, u32> = TreapDict::new_in(&arena);
    drop(arena);
    assert_eq!(dict.arena().holder_count(), 1);
}

#[test]
fn dictionary_dropped_under_a_sibling_guard_is_reclaimed() {
    let arena = SharedArena::new(&ArenaConfig::new(16).with_seed(6));
    let mut a: TreapDict<u32, String> = TreapDict::new_in(&arena);
    let mut b: TreapDict<u32, String> = TreapDict::new_in(&arena);
    a.insert(0, "kept".into());
    b.extend(random_entries(100, 6));
    assert_eq!(arena.borrow().live_count(), 101);

    {
        let guard = a.search(&0).unwrap();
        drop(b);
        assert_eq!(&*guard, "kept");
    }
    assert_eq!(arena.pending_release_count(), 1);

    a.clear();
    assert_eq!(arena.pending_release_count(), 0);
    assert_eq!(arena.borrow().live_count(), 0);
    drop(a);
    assert_eq!(arena.borrow().free_count(), arena.borrow().capacity());
}
