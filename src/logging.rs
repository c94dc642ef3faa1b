//! Structured JSONL logging: one JSON object per line on stdout, with a
//! level filter from `LOG_LEVEL`. Fallback-to-demo events and refresh
//! summaries go through here so a render cycle leaves an audit trail.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

/// RFC3339 timestamp with milliseconds.
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry at the given level.
pub fn log(level: Level, module: &str, fields: Map<String, Value>) {
    if level < Level::from_env() {
        return;
    }
    let mut entry = Map::new();
    entry.insert("ts".to_string(), Value::String(ts_now()));
    entry.insert("lvl".to_string(), Value::String(level.as_str().to_uppercase()));
    entry.insert("module".to_string(), Value::String(module.to_string()));
    for (k, v) in fields {
        entry.insert(k, v);
    }
    println!("{}", Value::Object(entry));
}

/// Info-level entry with a module tag.
pub fn json_log(module: &str, fields: Map<String, Value>) {
    log(Level::Info, module, fields);
}

/// Warn-level entry, used by the degrade-to-demo fallback path.
pub fn warn_log(module: &str, fields: Map<String, Value>) {
    log(Level::Warn, module, fields);
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn obj_builds_field_map() {
        let fields = obj(&[("a", v_str("x")), ("b", v_num(2.5))]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["a"], "x");
        assert_eq!(fields["b"], 2.5);
    }

    #[test]
    fn v_num_non_finite_is_null() {
        assert_eq!(v_num(f64::NAN), Value::Null);
        assert_eq!(v_num(f64::INFINITY), Value::Null);
    }

    #[test]
    fn ts_is_rfc3339_utc() {
        let ts = ts_now();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
