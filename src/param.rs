//! Turn a parameter name into the number we check

use std::convert::TryFrom;
use std::fmt;
use std::result::Result as StdResult;

use crate::stats::{schema, CounterSet};

/// What to check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Percentage of lookups that were hits
    Ratio,
    /// Percentage of the storage file that is allocated
    Usage,
    /// Any counter varnishstat knows about
    Counter(String),
}

impl Param {
    /// The derived parameters, with the help text for each
    pub const DERIVED: [(&'static str, &'static str); 2] = [
        ("ratio", "Cache hit ratio"),
        ("usage", "Cache file usage"),
    ];

    /// Read (or compute) this parameter from a snapshot
    pub fn resolve(&self, counters: &CounterSet) -> StdResult<Reading, UnknownParameter> {
        match *self {
            Param::Ratio => Ok(Reading {
                value: percent(counters, "cache_hit", "cache_miss"),
                label: "Cache hit ratio".into(),
            }),
            Param::Usage => Ok(Reading {
                value: percent(counters, "sm_balloc", "sm_bfree"),
                label: "Cache file usage".into(),
            }),
            Param::Counter(ref name) => {
                let counter = counters.get(name).ok_or_else(|| UnknownParameter {
                    name: name.clone(),
                })?;
                let label = schema::describe(name)
                    .map(|field| field.description.to_owned())
                    .or_else(|| counter.description.clone())
                    .unwrap_or_else(|| name.clone());
                Ok(Reading {
                    value: i64::try_from(counter.value).unwrap_or(i64::MAX),
                    label: label,
                })
            }
        }
    }
}

impl<'a> From<&'a str> for Param {
    fn from(name: &'a str) -> Param {
        match name {
            "ratio" => Param::Ratio,
            "usage" => Param::Usage,
            other => Param::Counter(other.to_owned()),
        }
    }
}

impl From<String> for Param {
    fn from(name: String) -> Param {
        Param::from(name.as_str())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Param::Ratio => f.write_str("ratio"),
            Param::Usage => f.write_str("usage"),
            Param::Counter(ref name) => f.write_str(name),
        }
    }
}

/// A resolved parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub value: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParameter {
    pub name: String,
}

impl fmt::Display for UnknownParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown parameter '{}'", self.name)
    }
}

/// `part` as a whole percentage of `part + rest`
///
/// Missing counters count as zero, and so does an empty total. Fractions
/// are truncated, so 99.9% is reported as 99.
fn percent(counters: &CounterSet, part: &str, rest: &str) -> i64 {
    let part = counters.value(part).unwrap_or(0) as f64;
    let total = part + counters.value(rest).unwrap_or(0) as f64;
    if total > 0.0 {
        (100.0 * part / total) as i64
    } else {
        0
    }
}

#[cfg(test)]
mod test {
    use super::{Param, Reading, UnknownParameter};
    use crate::stats::CounterSet;

    fn counters(values: Vec<(&str, u64)>) -> CounterSet {
        values.into_iter().collect()
    }

    #[test]
    fn names_map_to_params() {
        assert_eq!(Param::from("ratio"), Param::Ratio);
        assert_eq!(Param::from("usage"), Param::Usage);
        assert_eq!(
            Param::from("client_conn".to_owned()),
            Param::Counter("client_conn".into())
        );
        assert_eq!(Param::Counter("n_wrk".into()).to_string(), "n_wrk");
    }

    #[test]
    fn hit_ratio() {
        let reading = Param::Ratio
            .resolve(&counters(vec![("cache_hit", 99), ("cache_miss", 1)]))
            .unwrap();
        assert_eq!(
            reading,
            Reading {
                value: 99,
                label: "Cache hit ratio".into()
            }
        );
    }

    #[test]
    fn ratios_truncate() {
        let reading = Param::Ratio
            .resolve(&counters(vec![("cache_hit", 999), ("cache_miss", 1)]))
            .unwrap();
        assert_eq!(reading.value, 99);
        let reading = Param::Usage
            .resolve(&counters(vec![("sm_balloc", 2), ("sm_bfree", 1)]))
            .unwrap();
        assert_eq!(reading.value, 66);
    }

    #[test]
    fn empty_totals_are_zero() {
        let reading = Param::Ratio
            .resolve(&counters(vec![("cache_hit", 0), ("cache_miss", 0)]))
            .unwrap();
        assert_eq!(reading.value, 0);

        let reading = Param::Usage
            .resolve(&counters(vec![("sm_balloc", 0), ("sm_bfree", 0)]))
            .unwrap();
        assert_eq!(
            reading,
            Reading {
                value: 0,
                label: "Cache file usage".into()
            }
        );

        // modern varnish doesn't have the sm_ counters at all
        assert_eq!(Param::Usage.resolve(&CounterSet::new()).unwrap().value, 0);
    }

    #[test]
    fn huge_counters_do_not_overflow() {
        let reading = Param::Ratio
            .resolve(&counters(vec![("cache_hit", u64::max_value()), ("cache_miss", u64::max_value())]))
            .unwrap();
        assert_eq!(reading.value, 50);

        let reading = Param::Counter("s_bodybytes".into())
            .resolve(&counters(vec![("s_bodybytes", u64::max_value())]))
            .unwrap();
        assert_eq!(reading.value, i64::max_value());
    }

    #[test]
    fn counters_use_schema_labels() {
        let reading = Param::Counter("client_conn".into())
            .resolve(&counters(vec![("MAIN.client_conn", 2954)]))
            .unwrap();
        assert_eq!(
            reading,
            Reading {
                value: 2954,
                label: "Client connections accepted".into()
            }
        );
    }

    #[test]
    fn counters_outside_the_schema_use_provider_labels() {
        let set = CounterSet::parse(
            r#"{"MAIN.n_lru_limited": {"description": "Reached nuke_limit", "value": 4}}"#,
        )
        .unwrap();
        let reading = Param::Counter("n_lru_limited".into()).resolve(&set).unwrap();
        assert_eq!(reading.label, "Reached nuke_limit");

        let set = counters(vec![("VBE.boot.default.happy", 1)]);
        let reading = Param::Counter("VBE.boot.default.happy".into())
            .resolve(&set)
            .unwrap();
        assert_eq!(reading.label, "VBE.boot.default.happy");
    }

    #[test]
    fn unknown_counters_fail() {
        let set = counters(vec![("cache_hit", 1)]);
        assert_eq!(
            Param::Counter("doesnotexist".into()).resolve(&set),
            Err(UnknownParameter {
                name: "doesnotexist".into()
            })
        );
        // in the schema, but this varnish didn't report it
        assert!(Param::Counter("n_wrk".into()).resolve(&set).is_err());
        assert_eq!(
            UnknownParameter {
                name: "doesnotexist".into()
            }
            .to_string(),
            "Unknown parameter 'doesnotexist'"
        );
    }
}
