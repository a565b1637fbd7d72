//! Every way a check can end without a result

use std::fmt;
use std::process;
use std::result::Result as StdResult;

use derive_more::From;

use crate::param::UnknownParameter;
use crate::request::UsageError;
use crate::stats::ProviderError;
use crate::{Status, USAGE};

/// Exit code when the stats can't be read at all
pub const EXIT_NO_STATS: i32 = 1;

#[derive(Debug, From)]
pub enum CheckError {
    /// The stats provider couldn't be opened
    Acquisition(ProviderError),
    /// The requested counter doesn't exist
    UnknownParameter(UnknownParameter),
    /// The options don't make sense
    Usage(UsageError),
}

impl CheckError {
    pub fn exit_code(&self) -> i32 {
        match *self {
            CheckError::Acquisition(_) => EXIT_NO_STATS,
            CheckError::UnknownParameter(_) | CheckError::Usage(_) => Status::Unknown.code(),
        }
    }

    /// Tell the user what went wrong, where they expect to hear it, and exit
    #[cfg_attr(test, allow(dead_code))]
    pub fn exit(self) -> ! {
        match self {
            CheckError::Acquisition(_) => eprintln!("{}", self),
            CheckError::UnknownParameter(ref e) => println!("{}", e),
            CheckError::Usage(ref e) => {
                log::debug!("usage error: {}", e);
                eprintln!("{}", USAGE);
            }
        }
        process::exit(self.exit_code())
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter) -> StdResult<(), fmt::Error> {
        match *self {
            CheckError::Acquisition(ref e) => write!(f, "cannot access stats: {}", e),
            CheckError::UnknownParameter(ref e) => write!(f, "{}", e),
            CheckError::Usage(ref e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CheckError {}

#[cfg(test)]
mod test {
    use std::io;

    use super::CheckError;
    use crate::param::UnknownParameter;
    use crate::request::UsageError;
    use crate::stats::ProviderError;

    #[test]
    fn exit_codes() {
        let acquisition: CheckError =
            ProviderError::from(io::Error::new(io::ErrorKind::NotFound, "no varnishstat")).into();
        assert_eq!(acquisition.exit_code(), 1);
        assert_eq!(
            acquisition.to_string(),
            "cannot access stats: no varnishstat"
        );

        let unknown: CheckError = UnknownParameter {
            name: "nope".into(),
        }
        .into();
        assert_eq!(unknown.exit_code(), 3);
        assert_eq!(unknown.to_string(), "Unknown parameter 'nope'");

        let usage: CheckError = UsageError { reason: "bad" }.into();
        assert_eq!(usage.exit_code(), 3);
    }
}
