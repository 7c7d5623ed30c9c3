#![doc = include_str!("README.md")]
mod client;
mod config;
mod constants;
mod error;
mod native;
mod types;

#[doc(inline)]
pub use client::ClientManager;

#[doc(inline)]
pub use config::{AgentConfiguration, AgentStartOptions};

#[doc(inline)]
pub use constants::{
    APPLICATION_FRAMEWORK,
    APPLICATION_FRAMEWORK_VERSION,
    DEFAULT_ATTRIBUTE_INCREMENT,
};

#[doc(inline)]
pub use error::{internal_error, invalid_argument, not_started, AgentError, AgentErrorCode, AgentResult};

#[doc(inline)]
pub use native::NativeAgent;

#[doc(inline)]
pub use types::{
    attributes_from_json,
    AgentLogLevel,
    AttributeValue,
    Attributes,
    FeatureFlag,
    HttpTransaction,
    Metric,
    MetricUnit,
    NetworkFailure,
    NetworkFailureRecord,
};
