//! Snapshots of varnish counters and the providers that produce them
//!
//! Varnish keeps its statistics in a shared memory segment owned by the
//! running daemon. We never attach to it directly: a `StatsProvider` is
//! asked for a `CounterSet` and everything downstream only sees names and
//! numbers.

use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::result::Result as StdResult;

use derive_more::From;

mod parse;
pub mod provider;
pub mod schema;

pub use self::provider::{StatsFile, Varnishstat};

/// Section prefix that Varnish 4 and later put in front of the classic
/// counters, e.g. `MAIN.cache_hit`
pub const MAIN_PREFIX: &'static str = "MAIN.";

/// Stats errors
///
/// Every error that can happen while acquiring a `CounterSet` can be
/// converted into a `ProviderError`
#[derive(Debug, From)]
pub enum ProviderError {
    /// Couldn't run varnishstat or read a snapshot
    Io(io::Error),
    /// varnishstat ran but told us it couldn't read the instance
    Failed(CommandFailure),
    /// JSON output that doesn't look like `varnishstat -j`
    Json(serde_json::Error),
    /// A line of `varnishstat -1` output we couldn't understand
    Malformed(MalformedLine),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        use self::ProviderError::*;
        match self {
            &Io(ref e) => write!(f, "{}", e),
            &Failed(ref e) => write!(f, "{}", e),
            &Json(ref e) => write!(f, "invalid varnishstat json: {}", e),
            &Malformed(ref e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug)]
pub struct CommandFailure {
    pub program: String,
    /// `None` if the process was killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        match self.code {
            Some(code) => write!(f, "{} exited with status {}", self.program, code)?,
            None => write!(f, "{} was killed by a signal", self.program)?,
        }
        if !self.stderr.is_empty() {
            write!(f, ": {}", self.stderr)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct MalformedLine {
    pub line_number: usize,
    pub line: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        write!(
            f,
            "unable to parse counter at line {}: '{}'",
            self.line_number, self.line
        )
    }
}

pub type Result<T> = StdResult<T, ProviderError>;

/// Anything that can produce a snapshot of a varnish instance's counters
pub trait StatsProvider {
    /// Read the counters of `instance`, or of the default instance if `None`
    fn open(&self, instance: Option<&str>) -> Result<CounterSet>;
}

/// A single counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub value: u64,
    /// Whatever the provider had to say about the counter
    pub description: Option<String>,
}

impl Counter {
    pub fn new(value: u64) -> Counter {
        Counter {
            value: value,
            description: None,
        }
    }
}

/// A read-only snapshot of named counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterSet {
    counters: BTreeMap<String, Counter>,
}

impl CounterSet {
    pub fn new() -> CounterSet {
        CounterSet::default()
    }

    /// Parse the output of `varnishstat -j` or `varnishstat -1`
    ///
    /// The format is sniffed: anything starting with `{` is JSON.
    pub fn parse(contents: &str) -> Result<CounterSet> {
        if contents.trim_start().starts_with('{') {
            parse::json(contents)
        } else {
            parse::plain(contents)
        }
    }

    pub(crate) fn insert<S: Into<String>>(&mut self, name: S, counter: Counter) {
        self.counters.insert(name.into(), counter);
    }

    /// Find a counter by name
    ///
    /// Bare names also match counters in the `MAIN.` section, so
    /// `cache_hit` works against both varnish 3 and varnish 6.
    pub fn get(&self, name: &str) -> Option<&Counter> {
        self.counters
            .get(name)
            .or_else(|| self.counters.get(&format!("{}{}", MAIN_PREFIX, name)))
    }

    pub fn value(&self, name: &str) -> Option<u64> {
        self.get(name).map(|c| c.value)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Counter> {
        self.counters.iter()
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for CounterSet {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> CounterSet {
        let mut set = CounterSet::new();
        for (name, value) in iter {
            set.insert(name, Counter::new(value));
        }
        set
    }
}

impl<'a> IntoIterator for &'a CounterSet {
    type Item = (&'a String, &'a Counter);
    type IntoIter = btree_map::Iter<'a, String, Counter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
