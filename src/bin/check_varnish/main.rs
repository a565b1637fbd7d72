//! Check a counter of a running Varnish instance
//!
//! Exits 0, 1 or 2 for OK, warning and critical, 3 on bad arguments or an
//! unknown parameter, and 1 if the stats can't be read at all.

mod args;

use varnish_plugins::param::Param;
use varnish_plugins::stats::{schema, CounterSet};
use varnish_plugins::{check, CheckError};

use crate::args::Args;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

/// Every parameter `-p` accepts against this snapshot, one per line
fn listing(counters: &CounterSet) -> String {
    let mut lines: Vec<String> = Param::DERIVED
        .iter()
        .map(|&(name, description)| {
            let value = Param::from(name)
                .resolve(counters)
                .map(|reading| reading.value)
                .unwrap_or(0);
            format!("{:<28} {:>14} {}\n", name, value, description)
        })
        .collect();
    lines.extend(counters.iter().map(|(name, counter)| {
        let description = schema::describe(name)
            .map(|field| field.description)
            .or_else(|| counter.description.as_ref().map(|d| d.as_str()))
            .unwrap_or("");
        format!("{:<28} {:>14} {}\n", name, counter.value, description)
    }));
    lines.concat()
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    init_logging();
    let args = Args::parse();
    let provider = args.provider();

    let counters = provider
        .open(args.instance.as_deref())
        .unwrap_or_else(|e| CheckError::from(e).exit());

    if args.list {
        print!("{}", listing(&counters));
        return;
    }

    let request = args
        .request()
        .unwrap_or_else(|e| CheckError::from(e).exit());
    match check(&request, &counters) {
        Ok(result) => result.report(),
        Err(e) => e.exit(),
    }
}
