use std::path::PathBuf;
use std::process;

use structopt::clap::{self, ErrorKind};
use structopt::StructOpt;

use varnish_plugins::request::{CheckRequest, UsageError};
use varnish_plugins::stats::{StatsFile, StatsProvider, Varnishstat};
use varnish_plugins::{Status, USAGE};

static PARAMS_HELP: &'static str = "\
All items reported by varnishstat(1) are available: use the identifier
listed by 'check_varnish --list' or 'varnishstat -l'. In addition, the
following parameters are available:

    ratio   The cache hit ratio expressed as a percentage of hits to
            hits + misses. Default thresholds are 95 and 90.
    usage   Cache file usage as a percentage of the total cache space.

If -p is not given the hit ratio is checked, and if neither -w nor -c is
given either it alerts when the ratio falls to 95 (warning) or 90
(critical).";

/// Nagios plugin for Varnish
///
/// Reads one varnishstat counter (or a ratio derived from two of them) and
/// compares it against warning and critical thresholds.
#[derive(Debug, StructOpt)]
#[structopt(name = "check_varnish (part of varnish-plugins)", after_help = PARAMS_HELP)]
pub(crate) struct Args {
    #[structopt(
        short = "c",
        value_name = "N",
        number_of_values = 1,
        allow_hyphen_values = true,
        help = "Set critical threshold to N"
    )]
    pub crit: Vec<i64>,
    #[structopt(
        short = "w",
        value_name = "N",
        number_of_values = 1,
        allow_hyphen_values = true,
        help = "Set warning threshold to N"
    )]
    pub warn: Vec<i64>,
    #[structopt(
        short = "l",
        help = "Warn when the measured value is less, not more, than the configured threshold."
    )]
    pub less: bool,
    #[structopt(
        short = "n",
        value_name = "varnish_name",
        help = "Specify the Varnish instance name"
    )]
    pub instance: Option<String>,
    #[structopt(
        short = "p",
        value_name = "param_name",
        help = "Specify the parameter to check (see below). Default is 'ratio'."
    )]
    pub param: Option<String>,
    #[structopt(
        long = "list",
        help = "List every parameter this instance reports, and exit"
    )]
    pub list: bool,
    #[structopt(
        long = "varnishstat",
        value_name = "PATH",
        env = "VARNISHSTAT",
        default_value = "varnishstat",
        help = "The varnishstat binary to read counters with"
    )]
    pub varnishstat: String,
    #[structopt(
        long = "stats-file",
        value_name = "FILE",
        parse(from_os_str),
        help = "Read counters from the saved output of 'varnishstat -j' or \
                'varnishstat -1' instead of running varnishstat"
    )]
    pub stats_file: Option<PathBuf>,
}

impl Args {
    /// Parse the process arguments
    ///
    /// Help goes to stderr and exits 0. Anything else clap complains about
    /// prints the short usage and exits unknown.
    pub fn parse() -> Args {
        match Args::from_iter_safe(std::env::args_os()) {
            Ok(args) => args,
            Err(e) => match e.kind {
                ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                    if !e.message.is_empty() {
                        eprintln!("{}", e.message);
                    }
                    process::exit(0);
                }
                _ => {
                    log::warn!("{}", first_line(&e));
                    eprintln!("{}", USAGE);
                    Status::Unknown.exit();
                }
            },
        }
    }

    /// The last `-w` and `-c` given win
    pub fn request(&self) -> Result<CheckRequest, UsageError> {
        CheckRequest::from_options(
            self.param.clone(),
            self.warn.last().cloned(),
            self.crit.last().cloned(),
            self.less,
        )
    }

    pub fn provider(&self) -> Box<dyn StatsProvider> {
        match self.stats_file {
            Some(ref path) => Box::new(StatsFile::new(path.clone())),
            None => Box::new(Varnishstat::new(self.varnishstat.clone())),
        }
    }
}

fn first_line(e: &clap::Error) -> &str {
    e.message.lines().next().unwrap_or("invalid arguments")
}
