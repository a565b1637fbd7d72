//! Build a `CheckRequest` out of command line options

use std::fmt;

use crate::param::Param;
use crate::threshold::{Direction, Thresholds};

/// Warn when the hit ratio drops to this percentage
pub const DEFAULT_RATIO_WARN: i64 = 95;
/// Go critical when the hit ratio drops to this percentage
pub const DEFAULT_RATIO_CRIT: i64 = 90;

/// Everything needed to run a check, before any stats are read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub param: Param,
    pub thresholds: Thresholds,
}

/// The options don't describe a check we can run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub reason: &'static str,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.reason)
    }
}

impl CheckRequest {
    /// Apply the defaults and validate
    ///
    /// Without a parameter we check the hit ratio, and if no thresholds were
    /// given either we alert when it falls to 95% and 90%. A zero threshold
    /// counts as not given. Any other parameter needs at least one threshold.
    pub fn from_options(
        param: Option<String>,
        warn: Option<i64>,
        crit: Option<i64>,
        less_is_bad: bool,
    ) -> Result<CheckRequest, UsageError> {
        let mut warn = warn.unwrap_or(0);
        let mut crit = crit.unwrap_or(0);
        let mut direction = if less_is_bad {
            Direction::LessIsBad
        } else {
            Direction::MoreIsBad
        };

        let param = match param {
            Some(name) => Param::from(name),
            None => {
                if warn == 0 && crit == 0 {
                    warn = DEFAULT_RATIO_WARN;
                    crit = DEFAULT_RATIO_CRIT;
                    direction = Direction::LessIsBad;
                }
                Param::Ratio
            }
        };

        if warn == 0 && crit == 0 {
            return Err(UsageError {
                reason: "no warning or critical threshold given",
            });
        }

        Ok(CheckRequest {
            param: param,
            thresholds: Thresholds {
                warn: warn,
                crit: crit,
                direction: direction,
            },
        })
    }
}
