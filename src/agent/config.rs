use serde::{Deserialize, Serialize};
use url::Host;

use crate::agent::constants::{APPLICATION_FRAMEWORK, APPLICATION_FRAMEWORK_VERSION};
use crate::agent::error::{invalid_argument, AgentResult};
use crate::agent::types::AgentLogLevel;

/// Options applied when the agent is started.
///
/// Collector addresses are host names; `None` keeps the agent's built-in
/// collectors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentConfiguration {
    pub crash_reporting_enabled: bool,
    pub logging_enabled: bool,
    pub log_level: AgentLogLevel,
    pub collector_address: Option<String>,
    pub crash_collector_address: Option<String>,
}

impl Default for AgentConfiguration {
    fn default() -> Self {
        Self {
            crash_reporting_enabled: true,
            logging_enabled: true,
            log_level: AgentLogLevel::Info,
            collector_address: None,
            crash_collector_address: None,
        }
    }
}

impl AgentConfiguration {
    /// Parses a JSON configuration; missing keys keep their defaults.
    pub fn from_json(json: &str) -> AgentResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| invalid_argument(format!("Invalid agent configuration: {err}")))
    }

    pub fn validate(&self) -> AgentResult<()> {
        validate_collector("collectorAddress", self.collector_address.as_deref())?;
        validate_collector(
            "crashCollectorAddress",
            self.crash_collector_address.as_deref(),
        )
    }
}

fn validate_collector(field: &str, address: Option<&str>) -> AgentResult<()> {
    match address {
        None => Ok(()),
        Some(address) => Host::parse(address)
            .map(|_| ())
            .map_err(|err| invalid_argument(format!("{field} '{address}' is not a valid host: {err}"))),
    }
}

/// Everything the native agent needs to start, already translated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentStartOptions {
    pub application_token: String,
    pub framework: &'static str,
    pub framework_version: &'static str,
    pub logging_enabled: bool,
    pub log_level: i32,
    pub collector_address: Option<String>,
    pub crash_collector_address: Option<String>,
}

impl AgentStartOptions {
    pub(crate) fn new(application_token: &str, config: &AgentConfiguration) -> Self {
        Self {
            application_token: application_token.to_string(),
            framework: APPLICATION_FRAMEWORK,
            framework_version: APPLICATION_FRAMEWORK_VERSION,
            logging_enabled: config.logging_enabled,
            log_level: config.log_level.native_code(),
            collector_address: config.collector_address.clone(),
            crash_collector_address: config.crash_collector_address.clone(),
        }
    }
}
