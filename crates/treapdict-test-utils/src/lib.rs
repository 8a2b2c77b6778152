//! Test utilities for treapdict development.
//!
//! - [`setup_logger`]: route `log` output through `env_logger` in tests.
//! - [`fixtures`]: deterministic key/value data sets.
//! - [`ops`]: proptest strategies for operation sequences plus a
//!   `BTreeMap` model to check them against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod ops;

pub use fixtures::{random_entries, sorted_entries, VALUE_LEN};
pub use ops::{arb_ops, Op};

/// Install an `env_logger` at `Info` level, overridable through `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs a logger.
pub fn setup_logger() {
    use std::io::Write;

    let mut builder = env_logger::Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{:05} {:10} {}",
                record.level(),
                record
                    .module_path()
                    .and_then(|path| path.rsplit("::").next())
                    .unwrap_or("unknown"),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .is_test(true);

    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    }

    let _ = builder.try_init();
}
