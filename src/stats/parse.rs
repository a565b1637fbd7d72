//! Readers for the two varnishstat output formats

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Counter, CounterSet, MalformedLine, Result};

/// One counter in `varnishstat -j` output
///
/// Varnish also sends `flag`, `format` and (for varnish 3) `type` and
/// `ident`, none of which we need.
#[derive(Deserialize, Debug)]
struct Entry {
    value: u64,
    #[serde(default)]
    description: Option<String>,
}

/// Parse `varnishstat -j`
///
/// Varnish 4.0 through 6.4 put the counters at the top level, next to a
/// `timestamp` string. Varnish 6.5 and later wrap them in a `counters`
/// object next to `version` and `timestamp`.
pub(super) fn json(contents: &str) -> Result<CounterSet> {
    let mut document: Map<String, Value> = serde_json::from_str(contents)?;
    let counters = match document.remove("counters") {
        Some(Value::Object(counters)) => counters,
        Some(other) => {
            document.insert("counters".into(), other);
            document
        }
        None => document,
    };

    let mut set = CounterSet::new();
    for (name, value) in counters {
        if !value.is_object() {
            continue;
        }
        let entry: Entry = serde_json::from_value(value)?;
        set.insert(
            name,
            Counter {
                value: entry.value,
                description: entry.description,
            },
        );
    }
    Ok(set)
}

/// Parse `varnishstat -1`
///
/// Each line is `name value rate description...`, where the rate is `.` for
/// gauges.
pub(super) fn plain(contents: &str) -> Result<CounterSet> {
    let mut set = CounterSet::new();
    for (idx, line) in contents.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let name = match fields.next() {
            Some(name) => name,
            None => continue,
        };
        let value = fields
            .next()
            .and_then(|v| v.parse::<u64>().ok())
            .ok_or_else(|| MalformedLine {
                line_number: idx + 1,
                line: line.to_owned(),
            })?;
        let _rate = fields.next();
        let description = fields.collect::<Vec<_>>().join(" ");
        set.insert(
            name,
            Counter {
                value: value,
                description: if description.is_empty() {
                    None
                } else {
                    Some(description)
                },
            },
        );
    }
    Ok(set)
}

#[cfg(test)]
mod test {
    use crate::stats::{CounterSet, ProviderError};

    fn json_varnish_4() -> &'static str {
        r#"{
          "timestamp": "2016-04-12T12:42:46",
          "MAIN.uptime": {
            "description": "Child process uptime",
            "type": "MAIN", "flag": "c", "format": "d",
            "value": 5038
          },
          "MAIN.cache_hit": {
            "description": "Cache hits",
            "type": "MAIN", "flag": "c", "format": "i",
            "value": 990
          },
          "MAIN.cache_miss": {
            "description": "Cache misses",
            "type": "MAIN", "flag": "c", "format": "i",
            "value": 10
          },
          "SMA.s0.g_bytes": {
            "description": "Bytes outstanding",
            "type": "SMA", "ident": "s0", "flag": "g", "format": "B",
            "value": 2048
          }
        }"#
    }

    fn json_varnish_6_5() -> &'static str {
        r#"{
          "version": 1,
          "timestamp": "2021-03-01T10:00:00",
          "counters": {
            "MAIN.cache_hit": {
              "description": "Cache hits",
              "flag": "c", "format": "i",
              "value": 7
            },
            "MAIN.cache_miss": {
              "description": "Cache misses",
              "flag": "c", "format": "i",
              "value": 3
            }
          }
        }"#
    }

    fn plain_varnish_2() -> &'static str {
        "client_conn            2954         0.04 Client connections accepted
client_req             3191         0.04 Client requests received
cache_hit                 5         0.00 Cache hits
cache_miss               95          .   Cache misses

sm_balloc                 0          .   bytes allocated
"
    }

    #[test]
    fn reads_flat_json() {
        let set = CounterSet::parse(json_varnish_4()).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.value("cache_hit"), Some(990));
        assert_eq!(
            set.get("uptime").unwrap().description.as_ref().map(|s| s.as_str()),
            Some("Child process uptime")
        );
        assert_eq!(set.value("SMA.s0.g_bytes"), Some(2048));
    }

    #[test]
    fn reads_wrapped_json() {
        let set = CounterSet::parse(json_varnish_6_5()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.value("cache_miss"), Some(3));
        assert_eq!(set.value("version"), None);
    }

    #[test]
    fn rejects_json_without_values() {
        let err = CounterSet::parse(r#"{"MAIN.cache_hit": {"description": "Cache hits"}}"#);
        match err {
            Err(ProviderError::Json(_)) => {}
            other => panic!("expected json error, got {:?}", other),
        }
        assert!(CounterSet::parse("{ not json").is_err());
    }

    #[test]
    fn reads_plain_text() {
        let set = CounterSet::parse(plain_varnish_2()).unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.value("client_conn"), Some(2954));
        assert_eq!(
            set.get("cache_miss").unwrap().description.as_ref().map(|s| s.as_str()),
            Some("Cache misses")
        );
        assert_eq!(
            set.get("client_req").unwrap().description.as_ref().map(|s| s.as_str()),
            Some("Client requests received")
        );
    }

    #[test]
    fn plain_text_reports_bad_lines() {
        match CounterSet::parse("cache_hit 12 0.1 Cache hits\ncache_miss lots\n") {
            Err(ProviderError::Malformed(e)) => {
                assert_eq!(e.line_number, 2);
                assert_eq!(e.line, "cache_miss lots");
            }
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn empty_output_is_an_empty_set() {
        assert!(CounterSet::parse("").unwrap().is_empty());
    }
}
