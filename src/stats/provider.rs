//! Concrete `StatsProvider`s

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use super::{CommandFailure, CounterSet, Result, StatsProvider};

/// Ask the `varnishstat` binary for a JSON dump of every counter
#[derive(Debug, Clone)]
pub struct Varnishstat {
    pub program: String,
}

impl Varnishstat {
    pub fn new<S: Into<String>>(program: S) -> Varnishstat {
        Varnishstat {
            program: program.into(),
        }
    }

    fn command(&self, instance: Option<&str>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-j");
        if let Some(name) = instance {
            cmd.arg("-n").arg(name);
        }
        cmd
    }
}

impl Default for Varnishstat {
    fn default() -> Varnishstat {
        Varnishstat::new("varnishstat")
    }
}

impl StatsProvider for Varnishstat {
    fn open(&self, instance: Option<&str>) -> Result<CounterSet> {
        let mut cmd = self.command(instance);
        log::debug!("running {:?}", cmd);
        let output = cmd.output()?;
        if !output.status.success() {
            return Err(CommandFailure {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }
            .into());
        }
        let counters = CounterSet::parse(&String::from_utf8_lossy(&output.stdout))?;
        log::debug!("read {} counters from {}", counters.len(), self.program);
        Ok(counters)
    }
}

/// Read a snapshot previously captured with `varnishstat -j` or
/// `varnishstat -1`
#[derive(Debug, Clone)]
pub struct StatsFile {
    pub path: PathBuf,
}

impl StatsFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> StatsFile {
        StatsFile { path: path.into() }
    }
}

impl StatsProvider for StatsFile {
    fn open(&self, instance: Option<&str>) -> Result<CounterSet> {
        if let Some(name) = instance {
            log::warn!(
                "ignoring instance '{}', reading {}",
                name,
                self.path.display()
            );
        }
        let contents = fs::read_to_string(&self.path)?;
        let counters = CounterSet::parse(&contents)?;
        log::debug!(
            "read {} counters from {}",
            counters.len(),
            self.path.display()
        );
        Ok(counters)
    }
}
