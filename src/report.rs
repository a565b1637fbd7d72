//! The one line a monitoring system gets to see

use std::fmt;

use crate::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: Status,
    pub value: i64,
    pub label: String,
}

impl CheckResult {
    /// Print the result and exit with its status
    #[cfg_attr(test, allow(dead_code))]
    pub fn report(&self) -> ! {
        println!("{}", self);
        self.status.exit()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} {}", self.status, self.value, self.label)
    }
}
