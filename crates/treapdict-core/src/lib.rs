//! Core types for the treapdict workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! slot index type used as the arena's "pointer" and the error types
//! shared by the arena and the treap engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;

pub use error::{DictError, InvariantViolation};
pub use id::SlotIndex;
