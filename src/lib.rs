//! Varnish plugins: strongly typed checks against varnishstat counters
//!
//! The goal is to give Nagios and Sensu a fast, single-shot check of a
//! running Varnish instance that can't go wrong because somebody mistyped a
//! counter name in a shell pipeline.
//!
//! A check is built from four pieces that run one after another:
//!
//! * a [`CheckRequest`](request/struct.CheckRequest.html) built from the
//!   command line,
//! * a [`StatsProvider`](stats/trait.StatsProvider.html) that produces a
//!   [`CounterSet`](stats/struct.CounterSet.html),
//! * the [`Param`](param/enum.Param.html) resolver, which reads or derives
//!   the value to check,
//! * the [`threshold`](threshold/index.html) evaluator and the
//!   [`CheckResult`](report/struct.CheckResult.html) reporter.
//!
//! ```rust
//! use varnish_plugins::request::CheckRequest;
//! use varnish_plugins::stats::CounterSet;
//! use varnish_plugins::{check, Status};
//!
//! let counters: CounterSet = vec![("cache_hit", 99), ("cache_miss", 1)]
//!     .into_iter()
//!     .collect();
//! let request = CheckRequest::from_options(None, None, None, false).unwrap();
//! let result = check(&request, &counters).unwrap();
//! assert_eq!(result.status, Status::Ok);
//! assert_eq!(result.to_string(), "OK: 99 Cache hit ratio");
//! ```

use std::fmt;
use std::process;

pub mod error;
pub mod param;
pub mod report;
pub mod request;
pub mod stats;
pub mod threshold;

pub use crate::error::CheckError;
pub use crate::report::CheckResult;

/// The short usage line, printed on any invalid invocation
pub static USAGE: &'static str =
    "usage: check_varnish [-l] [-n varnish_name] [-p param_name [-c N] [-w N]]";

/// Exit statuses, in the order monitoring systems rank them
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// The process exit code for this status
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    #[cfg_attr(test, allow(dead_code))]
    pub fn exit(self) -> ! {
        process::exit(self.code())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let word = match *self {
            Status::Ok => "OK",
            Status::Warning => "Warning",
            Status::Critical => "Critical",
            Status::Unknown => "Unknown",
        };
        f.write_str(word)
    }
}

/// Resolve the requested parameter against `counters` and classify it
///
/// This is everything between acquiring the stats and printing the result,
/// and never touches the process: the caller decides how to report.
pub fn check(
    request: &request::CheckRequest,
    counters: &stats::CounterSet,
) -> Result<CheckResult, CheckError> {
    let reading = request.param.resolve(counters)?;
    let status = request.thresholds.evaluate(reading.value);
    log::debug!(
        "{} = {} against {:?} -> {:?}",
        request.param,
        reading.value,
        request.thresholds,
        status
    );
    Ok(CheckResult {
        status,
        value: reading.value,
        label: reading.label,
    })
}
