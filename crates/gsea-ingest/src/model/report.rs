//! Run report: producer, timestamp, parameters and produced files

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    /// Name of the tool that produced the run
    pub producer: Option<String>,
    /// Milliseconds since the Unix epoch; 0 when unknown
    pub timestamp: i64,
    pub params: BTreeMap<String, String>,
    pub files: Vec<String>,
    /// Text of `#` lines in the source
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Report {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Timestamp as a UTC date-time
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
