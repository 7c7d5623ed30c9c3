use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verbosity of the native agent's own logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentLogLevel {
    Error,
    Warning,
    #[default]
    Info,
    Verbose,
    Audit,
}

impl AgentLogLevel {
    /// Level constant understood by the native agent.
    pub fn native_code(self) -> i32 {
        match self {
            AgentLogLevel::Error => 1,
            AgentLogLevel::Warning => 2,
            AgentLogLevel::Info => 3,
            AgentLogLevel::Verbose => 4,
            AgentLogLevel::Audit => 6,
        }
    }
}

/// Reason a network request failed before a response was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkFailure {
    Unknown,
    BadUrl,
    TimedOut,
    CannotConnectToHost,
    DnsLookupFailed,
    BadServerResponse,
    SecureConnectionFailed,
}

impl NetworkFailure {
    pub fn native_code(self) -> i32 {
        match self {
            NetworkFailure::Unknown => -1,
            NetworkFailure::BadUrl => -1000,
            NetworkFailure::TimedOut => -1001,
            NetworkFailure::CannotConnectToHost => -1004,
            NetworkFailure::DnsLookupFailed => -1006,
            NetworkFailure::BadServerResponse => -1011,
            NetworkFailure::SecureConnectionFailed => -1200,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricUnit {
    Percent,
    Bytes,
    Seconds,
    BytesPerSecond,
    Operations,
}

impl MetricUnit {
    /// Unit label understood by the native agent.
    pub fn native_label(self) -> &'static str {
        match self {
            MetricUnit::Percent => "%",
            MetricUnit::Bytes => "bytes",
            MetricUnit::Seconds => "sec",
            MetricUnit::BytesPerSecond => "bytes/second",
            MetricUnit::Operations => "op",
        }
    }
}

/// Agent features that can be switched on or off at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    CrashReporting,
    AnalyticsEvents,
    NetworkRequests,
    NetworkErrorRequests,
    HttpResponseBodyCapture,
}

impl FeatureFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureFlag::CrashReporting => "CrashReporting",
            FeatureFlag::AnalyticsEvents => "AnalyticsEvents",
            FeatureFlag::NetworkRequests => "NetworkRequests",
            FeatureFlag::NetworkErrorRequests => "NetworkErrorRequests",
            FeatureFlag::HttpResponseBodyCapture => "HttpResponseBodyCapture",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value types the native agent accepts for attributes, events and breadcrumbs.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Converts a loosely-typed JSON value. Numbers of any kind become doubles,
    /// booleans stay booleans and everything else is stringified; `null` has no
    /// native counterpart and yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(AttributeValue::Bool(*flag)),
            Value::Number(number) => number.as_f64().map(AttributeValue::Number),
            Value::String(text) => Some(AttributeValue::Text(text.clone())),
            other => Some(AttributeValue::Text(other.to_string())),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

pub type Attributes = BTreeMap<String, AttributeValue>;

/// Converts a JSON object into native attributes, dropping `null` entries.
pub fn attributes_from_json(attributes: &Map<String, Value>) -> Attributes {
    attributes
        .iter()
        .filter_map(|(key, value)| match AttributeValue::from_json(value) {
            Some(converted) => Some((key.clone(), converted)),
            None => {
                log::debug!("dropping null attribute {key}");
                None
            }
        })
        .collect()
}

/// A completed HTTP request observed by the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpTransaction {
    pub url: String,
    pub http_method: String,
    pub status_code: u16,
    /// Milliseconds since the Unix epoch.
    pub start_time: i64,
    pub end_time: i64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub response_body: Option<String>,
}

/// A network request that failed without a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkFailureRecord {
    pub url: String,
    pub http_method: String,
    pub start_time: i64,
    pub end_time: i64,
    pub failure_code: i32,
}

/// Metric in the shape the native agent records it.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    pub name: String,
    pub category: String,
    pub count: u32,
    pub value: Option<f64>,
    pub exclusive_value: f64,
    pub count_unit: Option<&'static str>,
    pub value_unit: Option<&'static str>,
}
