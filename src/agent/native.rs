use crate::agent::config::AgentStartOptions;
use crate::agent::error::AgentResult;
use crate::agent::types::{
    AttributeValue, Attributes, FeatureFlag, HttpTransaction, Metric, NetworkFailureRecord,
};
use crate::crash::HandledException;

/// The platform monitoring agent every [`ClientManager`](crate::agent::ClientManager)
/// call is forwarded to.
///
/// Implementations wrap a vendor SDK. Values arrive already translated into
/// native codes and labels, so an implementation only has to hand them over.
pub trait NativeAgent: Send + Sync {
    fn start(&self, options: &AgentStartOptions) -> AgentResult<()>;

    fn shutdown(&self);

    fn crash_now(&self, message: Option<&str>);

    fn current_session_id(&self) -> String;

    fn start_interaction(&self, name: &str) -> String;

    fn end_interaction(&self, interaction_id: &str);

    fn notice_http_transaction(&self, transaction: &HttpTransaction);

    fn notice_network_failure(&self, failure: &NetworkFailureRecord);

    fn record_breadcrumb(&self, name: &str, attributes: &Attributes) -> bool;

    fn record_custom_event(&self, event_type: &str, event_name: &str, attributes: &Attributes) -> bool;

    fn record_metric(&self, metric: &Metric);

    fn set_attribute(&self, name: &str, value: &AttributeValue) -> bool;

    fn increment_attribute(&self, name: &str, value: f64) -> bool;

    fn remove_attribute(&self, name: &str) -> bool;

    fn remove_all_attributes(&self) -> bool;

    fn set_max_event_buffer_time(&self, seconds: u32);

    fn set_max_event_pool_size(&self, size: u32);

    fn set_user_id(&self, user_id: &str) -> bool;

    fn enable_feature(&self, flag: FeatureFlag);

    fn disable_feature(&self, flag: FeatureFlag);

    fn record_handled_exception(&self, exception: &HandledException) -> bool;
}
