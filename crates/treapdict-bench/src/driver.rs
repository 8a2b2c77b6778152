//! Demonstration driver.
//!
//! Fills several dictionaries that share one arena with random entries,
//! then runs a fixed sequence of checks (initial state, insert, search,
//! removal of every other entry, clear and sorted rebuild) and writes one
//! `pass`/`fail` line per check.

use std::error::Error;
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::time::Instant;

use log::info;
use treapdict_arena::{ArenaConfig, SharedArena};
use treapdict_engine::TreapDict;
use treapdict_test_utils::{random_entries, sorted_entries};

const LABEL_WIDTH: usize = 16;

/// Parameters of a driver run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// Number of dictionaries sharing the arena.
    pub dictionaries: usize,
    /// Entries inserted into each dictionary.
    pub entries: usize,
    /// Seed for both the fixtures and the arena's priority generator.
    pub seed: u64,
}

impl DriverConfig {
    /// Default dictionary count.
    pub const DEFAULT_DICTIONARIES: usize = 4;

    /// Default entries per dictionary.
    pub const DEFAULT_ENTRIES: usize = 4096;

    /// Parse `-d<N>`, `-e<N>` and `-s<N>` flags. Arguments that do not
    /// start with `-` are ignored.
    pub fn from_args<I>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        for arg in args {
            let Some(flag) = arg.strip_prefix('-') else {
                continue;
            };
            let mut chars = flag.chars();
            let (Some(name), value) = (chars.next(), chars.as_str()) else {
                return Err(ArgError::UnknownFlag { flag: arg });
            };
            let invalid = || ArgError::InvalidNumber {
                flag: name,
                value: value.to_string(),
            };
            match name {
                'd' => config.dictionaries = value.parse().map_err(|_| invalid())?,
                'e' => config.entries = value.parse().map_err(|_| invalid())?,
                's' => config.seed = value.parse().map_err(|_| invalid())?,
                _ => return Err(ArgError::UnknownFlag { flag: arg }),
            }
        }
        Ok(config)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            dictionaries: Self::DEFAULT_DICTIONARIES,
            entries: Self::DEFAULT_ENTRIES,
            seed: 0,
        }
    }
}

/// Command-line parse failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// A flag other than `-d`, `-e` or `-s`.
    UnknownFlag {
        /// The argument as given.
        flag: String,
    },
    /// A flag whose value is not a non-negative integer.
    InvalidNumber {
        /// The flag letter.
        flag: char,
        /// The rejected value.
        value: String,
    },
}

impl Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag { flag } => write!(f, "unknown flag '{flag}'"),
            Self::InvalidNumber { flag, value } => {
                write!(f, "flag -{flag} expects a number, got '{value}'")
            }
        }
    }
}

impl Error for ArgError {}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "fail"
    }
}

fn line<W: Write>(out: &mut W, label: &str, result: impl Display) -> io::Result<()> {
    writeln!(out, "{label:>LABEL_WIDTH$}{result}")
}

fn height_text(height: Option<u32>) -> String {
    height.map_or_else(|| "empty".to_string(), |h| h.to_string())
}

/// Run every check, writing the report to `out`.
///
/// Returns `Ok(true)` when every check passed.
pub fn run<W: Write>(config: &DriverConfig, out: &mut W) -> io::Result<bool> {
    let started = Instant::now();
    writeln!(out, "Dictionaries: {}", config.dictionaries)?;
    writeln!(out, "Entries per dictionary: {}", config.entries)?;

    let arena = SharedArena::new(&ArenaConfig::default().with_seed(config.seed));
    let mut dicts: Vec<TreapDict<u32, String>> = (0..config.dictionaries)
        .map(|_| TreapDict::new_in(&arena))
        .collect();
    let raw: Vec<_> = (0..config.dictionaries)
        .map(|i| random_entries(config.entries, config.seed.wrapping_add(i as u64)))
        .collect();

    let mut all_ok = true;
    let mut check = |out: &mut W, label: &str, ok: bool| -> io::Result<()> {
        all_ok &= ok;
        line(out, label, verdict(ok))
    };

    check(out, "Initial empty: ", dicts.iter().all(|d| d.is_empty()))?;
    check(out, "Initial size: ", dicts.iter().all(|d| d.len() == 0))?;
    check(out, "Initial height: ", dicts.iter().all(|d| d.height().is_none()))?;

    for (dict, entries) in dicts.iter_mut().zip(&raw) {
        for (k, v) in entries {
            *dict.slot(*k) = v.clone();
        }
    }
    check(out, "Insert: ", dicts.iter().zip(&raw).all(|(d, e)| d.len() == e.len()))?;
    for (i, dict) in dicts.iter().enumerate() {
        line(out, &format!("Height {i}: "), height_text(dict.height()))?;
    }

    let search_ok = dicts.iter().zip(&raw).all(|(dict, entries)| {
        entries
            .iter()
            .all(|(k, v)| dict.search(k).is_ok_and(|found| *found == *v))
    });
    check(out, "Search: ", search_ok)?;

    for (dict, entries) in dicts.iter_mut().zip(&raw) {
        for (k, _) in entries.iter().step_by(2) {
            dict.remove(k);
        }
    }
    check(
        out,
        "Size after removal: ",
        dicts
            .iter()
            .zip(&raw)
            .all(|(d, e)| d.len() == e.len() / 2),
    )?;
    for (i, dict) in dicts.iter().enumerate() {
        line(
            out,
            &format!("Height after removal {i}: "),
            height_text(dict.height()),
        )?;
    }

    let after_removal_ok = dicts.iter().zip(&raw).all(|(dict, entries)| {
        entries.iter().enumerate().all(|(j, (k, v))| {
            let found = dict.search(k);
            if j % 2 == 0 {
                found.is_err()
            } else {
                found.is_ok_and(|found| *found == *v)
            }
        })
    });
    check(out, "Search after removal: ", after_removal_ok)?;

    if let (Some(first), Some(entries)) = (dicts.first_mut(), raw.first()) {
        let sorted = sorted_entries(entries);
        first.clear();
        for (k, v) in &sorted {
            *first.slot(*k) = v.clone();
        }
        check(out, "Sorted size: ", first.len() == sorted.len())?;
        line(out, "Sorted height: ", height_text(first.height()))?;
        let sorted_ok = sorted
            .iter()
            .all(|(k, v)| first.search(k).is_ok_and(|found| *found == *v));
        check(out, "Sorted search: ", sorted_ok)?;
    }

    {
        let arena = arena.borrow();
        info!(
            "driver finished in {:?}: {} slots, {} live, grew {} times",
            started.elapsed(),
            arena.capacity(),
            arena.live_count(),
            arena.grow_count()
        );
    }
    Ok(all_ok)
}
