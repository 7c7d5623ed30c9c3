use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::agent::{
    internal_error, AgentResult, AgentStartOptions, AttributeValue, Attributes, FeatureFlag,
    HttpTransaction, Metric, NativeAgent, NetworkFailureRecord,
};
use crate::crash::HandledException;

/// One call received by a [`RecordingAgent`].
#[derive(Clone, Debug, PartialEq)]
pub enum AgentCall {
    Start(AgentStartOptions),
    Shutdown,
    CrashNow(Option<String>),
    CurrentSessionId,
    StartInteraction(String),
    EndInteraction(String),
    HttpTransaction(HttpTransaction),
    NetworkFailure(NetworkFailureRecord),
    Breadcrumb(String, Attributes),
    CustomEvent(String, String, Attributes),
    Metric(Metric),
    SetAttribute(String, AttributeValue),
    IncrementAttribute(String, f64),
    RemoveAttribute(String),
    RemoveAllAttributes,
    MaxEventBufferTime(u32),
    MaxEventPoolSize(u32),
    UserId(String),
    EnableFeature(FeatureFlag),
    DisableFeature(FeatureFlag),
    HandledException(HandledException),
}

/// In-memory [`NativeAgent`] that records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingAgent {
    calls: Mutex<Vec<AgentCall>>,
    fail_start: bool,
    start_delay: Option<Duration>,
}

impl RecordingAgent {
    /// An agent whose `start` always fails.
    pub fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Default::default()
        }
    }

    /// An agent whose `start` takes `delay` before returning.
    pub fn slow_start(delay: Duration) -> Self {
        Self {
            start_delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<AgentCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: AgentCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl NativeAgent for RecordingAgent {
    fn start(&self, options: &AgentStartOptions) -> AgentResult<()> {
        if self.fail_start {
            return Err(internal_error("native agent refused to start"));
        }
        if let Some(delay) = self.start_delay {
            thread::sleep(delay);
        }
        self.record(AgentCall::Start(options.clone()));
        Ok(())
    }

    fn shutdown(&self) {
        self.record(AgentCall::Shutdown);
    }

    fn crash_now(&self, message: Option<&str>) {
        self.record(AgentCall::CrashNow(message.map(str::to_string)));
    }

    fn current_session_id(&self) -> String {
        self.record(AgentCall::CurrentSessionId);
        "session-1".to_string()
    }

    fn start_interaction(&self, name: &str) -> String {
        self.record(AgentCall::StartInteraction(name.to_string()));
        format!("interaction-{name}")
    }

    fn end_interaction(&self, interaction_id: &str) {
        self.record(AgentCall::EndInteraction(interaction_id.to_string()));
    }

    fn notice_http_transaction(&self, transaction: &HttpTransaction) {
        self.record(AgentCall::HttpTransaction(transaction.clone()));
    }

    fn notice_network_failure(&self, failure: &NetworkFailureRecord) {
        self.record(AgentCall::NetworkFailure(failure.clone()));
    }

    fn record_breadcrumb(&self, name: &str, attributes: &Attributes) -> bool {
        self.record(AgentCall::Breadcrumb(name.to_string(), attributes.clone()));
        true
    }

    fn record_custom_event(&self, event_type: &str, event_name: &str, attributes: &Attributes) -> bool {
        self.record(AgentCall::CustomEvent(
            event_type.to_string(),
            event_name.to_string(),
            attributes.clone(),
        ));
        true
    }

    fn record_metric(&self, metric: &Metric) {
        self.record(AgentCall::Metric(metric.clone()));
    }

    fn set_attribute(&self, name: &str, value: &AttributeValue) -> bool {
        self.record(AgentCall::SetAttribute(name.to_string(), value.clone()));
        true
    }

    fn increment_attribute(&self, name: &str, value: f64) -> bool {
        self.record(AgentCall::IncrementAttribute(name.to_string(), value));
        true
    }

    fn remove_attribute(&self, name: &str) -> bool {
        self.record(AgentCall::RemoveAttribute(name.to_string()));
        true
    }

    fn remove_all_attributes(&self) -> bool {
        self.record(AgentCall::RemoveAllAttributes);
        true
    }

    fn set_max_event_buffer_time(&self, seconds: u32) {
        self.record(AgentCall::MaxEventBufferTime(seconds));
    }

    fn set_max_event_pool_size(&self, size: u32) {
        self.record(AgentCall::MaxEventPoolSize(size));
    }

    fn set_user_id(&self, user_id: &str) -> bool {
        self.record(AgentCall::UserId(user_id.to_string()));
        true
    }

    fn enable_feature(&self, flag: FeatureFlag) {
        self.record(AgentCall::EnableFeature(flag));
    }

    fn disable_feature(&self, flag: FeatureFlag) {
        self.record(AgentCall::DisableFeature(flag));
    }

    fn record_handled_exception(&self, exception: &HandledException) -> bool {
        self.record(AgentCall::HandledException(exception.clone()));
        true
    }
}
