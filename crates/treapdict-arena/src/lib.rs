//! Node arena for treapdict.
//!
//! Stores treap nodes in one contiguous slot table addressed by
//! [`SlotIndex`](treapdict_core::SlotIndex) instead of individually boxed
//! nodes.
//!
//! # Architecture
//!
//! ```text
//! SharedArena (Rc<RefCell<_>> handle, one per arena)
//! └── NodeArena
//!     ├── Vec<Node> (slot table, doubles when the free list is empty)
//!     ├── free list (threaded through each free slot's `left` link)
//!     └── ChaCha8Rng (priority generator)
//! ```
//!
//! Arenas are private to one dictionary by default. [`SharedArena`]
//! handles can be passed to several dictionaries explicitly, and
//! [`shared_arena`] hands out one arena per key/value type pair per
//! thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod node;
pub mod registry;
pub mod shared;

// Public re-exports for the primary API surface.
pub use arena::NodeArena;
pub use config::ArenaConfig;
pub use node::Node;
pub use registry::{shared_arena, shared_arena_is_live};
pub use shared::SharedArena;
