//! Benchmark helpers and the demonstration driver for treapdict.
//!
//! - [`populated`]: build a dictionary from a fixture in one call.
//! - [`driver`]: the pass/fail demonstration run used by the `driver`
//!   example.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod driver;

use treapdict_arena::ArenaConfig;
use treapdict_engine::TreapDict;

/// Build a private-arena dictionary holding `entries`.
pub fn populated(entries: &[(u32, String)], config: &ArenaConfig) -> TreapDict<u32, String> {
    let mut dict = TreapDict::with_config(config);
    dict.extend(entries.iter().cloned());
    dict
}
