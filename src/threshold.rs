//! Classify a value against warning and critical thresholds

use crate::Status;

/// Which way a value has to move to become a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Higher values are worse, e.g. a usage percentage
    MoreIsBad,
    /// Lower values are worse, e.g. a hit ratio
    LessIsBad,
}

impl Default for Direction {
    fn default() -> Direction {
        Direction::MoreIsBad
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warn: i64,
    pub crit: i64,
    pub direction: Direction,
}

impl Thresholds {
    pub fn evaluate(&self, value: i64) -> Status {
        evaluate(value, self.warn, self.crit, self.direction)
    }
}

/// Classify `value`
///
/// With `MoreIsBad` anything below `warn` is fine and anything not below
/// `crit` is critical. With `LessIsBad` anything above `warn` is fine and
/// anything not above `crit` is critical. A value sitting exactly on a
/// threshold always lands in the worse bucket.
pub fn evaluate(value: i64, warn: i64, crit: i64, direction: Direction) -> Status {
    match direction {
        Direction::MoreIsBad => {
            if value < warn {
                return Status::Ok;
            } else if value < crit {
                return Status::Warning;
            }
        }
        Direction::LessIsBad => {
            if value > warn {
                return Status::Ok;
            } else if value > crit {
                return Status::Warning;
            }
        }
    }
    Status::Critical
}
