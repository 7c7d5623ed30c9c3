use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use url::Url;

use crate::agent::config::{AgentConfiguration, AgentStartOptions};
use crate::agent::constants::DEFAULT_ATTRIBUTE_INCREMENT;
use crate::agent::error::{invalid_argument, not_started, AgentResult};
use crate::agent::native::NativeAgent;
use crate::agent::types::{
    attributes_from_json, AttributeValue, FeatureFlag, HttpTransaction, Metric, MetricUnit,
    NetworkFailure, NetworkFailureRecord,
};
use crate::crash::{ExceptionInfo, HandledException};

/// Shared entry point that forwards telemetry calls to a [`NativeAgent`].
pub struct ClientManager<A> {
    inner: Arc<ClientInner<A>>,
}

struct ClientInner<A> {
    agent: A,
    started: AtomicBool,
    lifecycle: Mutex<()>,
}

impl<A> Clone for ClientManager<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for ClientManager<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientManager")
            .field("started", &self.inner.started.load(Ordering::SeqCst))
            .finish()
    }
}

impl<A: NativeAgent> ClientManager<A> {
    pub fn new(agent: A) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                agent,
                started: AtomicBool::new(false),
                lifecycle: Mutex::new(()),
            }),
        }
    }

    pub fn agent(&self) -> &A {
        &self.inner.agent
    }

    pub fn is_started(&self) -> bool {
        self.inner.started.load(Ordering::SeqCst)
    }

    /// Starts the native agent. Calling it again once started is a no-op,
    /// including when several threads race to start the same client.
    pub fn start(
        &self,
        application_token: &str,
        config: Option<AgentConfiguration>,
    ) -> AgentResult<()> {
        if application_token.trim().is_empty() {
            return Err(invalid_argument("Application token must not be empty"));
        }

        let _lifecycle = self.inner.lifecycle.lock().unwrap();
        if self.is_started() {
            log::debug!("agent already started, ignoring start request");
            return Ok(());
        }

        let config = config.unwrap_or_default();
        config.validate()?;

        if !config.crash_reporting_enabled {
            self.agent().disable_feature(FeatureFlag::CrashReporting);
        }

        self.agent()
            .start(&AgentStartOptions::new(application_token, &config))?;
        self.inner.started.store(true, Ordering::SeqCst);
        log::debug!("agent started (log level {:?})", config.log_level);
        Ok(())
    }

    pub fn shutdown(&self) {
        let _lifecycle = self.inner.lifecycle.lock().unwrap();
        self.agent().shutdown();
        self.inner.started.store(false, Ordering::SeqCst);
    }

    /// Makes the native agent crash on purpose, to verify crash reporting.
    pub fn crash_now(&self, message: Option<&str>) {
        let message = message.filter(|text| !text.is_empty());
        self.agent().crash_now(message);
    }

    pub fn current_session_id(&self) -> AgentResult<String> {
        self.ensure_started("current_session_id")?;
        Ok(self.agent().current_session_id())
    }

    pub fn start_interaction(&self, interaction_name: &str) -> AgentResult<String> {
        self.ensure_started("start_interaction")?;
        if interaction_name.trim().is_empty() {
            return Err(invalid_argument("Interaction name must not be empty"));
        }
        Ok(self.agent().start_interaction(interaction_name))
    }

    pub fn end_interaction(&self, interaction_id: &str) {
        self.agent().end_interaction(interaction_id);
    }

    pub fn notice_http_transaction(&self, transaction: &HttpTransaction) -> AgentResult<()> {
        validate_request(&transaction.url, transaction.start_time, transaction.end_time)?;
        self.agent().notice_http_transaction(transaction);
        Ok(())
    }

    pub fn notice_network_failure(
        &self,
        url: &str,
        http_method: &str,
        start_time: i64,
        end_time: i64,
        failure: NetworkFailure,
    ) -> AgentResult<()> {
        validate_request(url, start_time, end_time)?;
        self.agent().notice_network_failure(&NetworkFailureRecord {
            url: url.to_string(),
            http_method: http_method.to_string(),
            start_time,
            end_time,
            failure_code: failure.native_code(),
        });
        Ok(())
    }

    pub fn record_breadcrumb(&self, name: &str, attributes: &Map<String, Value>) -> bool {
        self.agent()
            .record_breadcrumb(name, &attributes_from_json(attributes))
    }

    pub fn record_custom_event(
        &self,
        event_type: &str,
        event_name: &str,
        attributes: &Map<String, Value>,
    ) -> bool {
        self.agent()
            .record_custom_event(event_type, event_name, &attributes_from_json(attributes))
    }

    pub fn record_metric(&self, name: &str, category: &str) {
        self.agent().record_metric(&Metric {
            name: name.to_string(),
            category: category.to_string(),
            count: 1,
            value: None,
            exclusive_value: 0.0,
            count_unit: None,
            value_unit: None,
        });
    }

    pub fn record_metric_value(&self, name: &str, category: &str, value: f64) {
        self.agent().record_metric(&Metric {
            name: name.to_string(),
            category: category.to_string(),
            count: 1,
            value: Some(value),
            exclusive_value: 0.0,
            count_unit: None,
            value_unit: None,
        });
    }

    pub fn record_metric_with_units(
        &self,
        name: &str,
        category: &str,
        value: f64,
        count_unit: MetricUnit,
        value_unit: MetricUnit,
    ) {
        self.agent().record_metric(&Metric {
            name: name.to_string(),
            category: category.to_string(),
            count: 0,
            value: Some(value),
            exclusive_value: 0.0,
            count_unit: Some(count_unit.native_label()),
            value_unit: Some(value_unit.native_label()),
        });
    }

    pub fn set_attribute(&self, name: &str, value: impl Into<AttributeValue>) -> bool {
        self.agent().set_attribute(name, &value.into())
    }

    pub fn increment_attribute(&self, name: &str) -> bool {
        self.increment_attribute_by(name, DEFAULT_ATTRIBUTE_INCREMENT)
    }

    pub fn increment_attribute_by(&self, name: &str, value: f64) -> bool {
        self.agent().increment_attribute(name, value)
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        self.agent().remove_attribute(name)
    }

    pub fn remove_all_attributes(&self) -> bool {
        self.agent().remove_all_attributes()
    }

    pub fn set_max_event_buffer_time(&self, seconds: u32) {
        self.agent().set_max_event_buffer_time(seconds);
    }

    pub fn set_max_event_pool_size(&self, size: u32) {
        self.agent().set_max_event_pool_size(size);
    }

    pub fn set_user_id(&self, user_id: &str) -> bool {
        self.agent().set_user_id(user_id)
    }

    pub fn analytics_event_enabled(&self, enabled: bool) {
        self.set_feature(FeatureFlag::AnalyticsEvents, enabled);
    }

    pub fn network_request_enabled(&self, enabled: bool) {
        self.set_feature(FeatureFlag::NetworkRequests, enabled);
    }

    pub fn network_error_request_enabled(&self, enabled: bool) {
        self.set_feature(FeatureFlag::NetworkErrorRequests, enabled);
    }

    pub fn http_response_body_capture_enabled(&self, enabled: bool) {
        self.set_feature(FeatureFlag::HttpResponseBodyCapture, enabled);
    }

    /// Formats `exception` and its causes into a [`HandledException`] and
    /// hands it to the native agent.
    pub fn record_exception(&self, exception: &ExceptionInfo) -> bool {
        let report = HandledException::from_exception(exception);
        log::debug!(
            "recording handled exception {} with {} frames",
            report.exception_type,
            report.stack_frames.len()
        );
        self.agent().record_handled_exception(&report)
    }

    fn set_feature(&self, flag: FeatureFlag, enabled: bool) {
        log::debug!("feature {flag} enabled: {enabled}");
        if enabled {
            self.agent().enable_feature(flag);
        } else {
            self.agent().disable_feature(flag);
        }
    }

    fn ensure_started(&self, operation: &str) -> AgentResult<()> {
        if self.is_started() {
            Ok(())
        } else {
            Err(not_started(format!("{operation} requires a started agent")))
        }
    }
}

fn validate_request(url: &str, start_time: i64, end_time: i64) -> AgentResult<()> {
    Url::parse(url).map_err(|err| invalid_argument(format!("Invalid request url '{url}': {err}")))?;
    if end_time < start_time {
        return Err(invalid_argument("Request end time precedes its start time"));
    }
    Ok(())
}
