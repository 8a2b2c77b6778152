//! Per-type shared arenas.
//!
//! [`shared_arena`] hands out one arena per `(K, V)` type pair per thread.
//! The registry keeps only weak handles: the arena is released once every
//! dictionary using it is dropped, and the next request creates a fresh
//! one.
//!
//! The capacity hint is honoured only when a new arena is created. While
//! an arena for the type pair is alive, later hints are ignored.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::rc::Weak;

use indexmap::IndexMap;
use log::debug;

use crate::config::ArenaConfig;
use crate::shared::{ArenaCell, SharedArena};

type WeakArena<K, V> = Weak<ArenaCell<K, V>>;

thread_local! {
    static REGISTRY: RefCell<IndexMap<TypeId, Box<dyn Any>>> =
        RefCell::new(IndexMap::new());
}

/// The arena shared by all `(K, V)` dictionaries on this thread.
///
/// Creates the arena from `config` if none is alive; otherwise returns a
/// new handle to the live one and ignores `config`.
pub fn shared_arena<K: 'static, V: 'static>(config: &ArenaConfig) -> SharedArena<K, V> {
    let type_key = TypeId::of::<(K, V)>();
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        let live = registry
            .get(&type_key)
            .and_then(|entry| entry.downcast_ref::<WeakArena<K, V>>())
            .and_then(Weak::upgrade);
        if let Some(inner) = live {
            debug!(
                "reusing shared node arena for {}; capacity hint {} ignored",
                type_name::<(K, V)>(),
                config.initial_capacity
            );
            return SharedArena::from_rc(inner);
        }
        debug!(
            "creating shared node arena for {} with capacity {}",
            type_name::<(K, V)>(),
            config.effective_capacity()
        );
        let arena = SharedArena::new(config);
        registry.insert(type_key, Box::new(arena.downgrade()));
        arena
    })
}

/// Whether a shared arena for `(K, V)` is currently alive on this thread.
pub fn shared_arena_is_live<K: 'static, V: 'static>() -> bool {
    let type_key = TypeId::of::<(K, V)>();
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(&type_key)
            .and_then(|entry| entry.downcast_ref::<WeakArena<K, V>>())
            .is_some_and(|weak| weak.strong_count() > 0)
    })
}
