use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crash::error::CrashResult;
use crate::crash::exception::{parse_exception, ExceptionInfo};
use crate::crash::stack_trace::StackFrame;

/// Payload handed to the native agent when a handled exception is recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandledException {
    pub exception_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub stack_frames: Vec<StackFrame>,
}

impl HandledException {
    /// Captures `exception` now, flattening its whole cause chain into frames.
    pub fn from_exception(exception: &ExceptionInfo) -> Self {
        Self::captured_at(exception, Utc::now())
    }

    pub fn captured_at(exception: &ExceptionInfo, timestamp: DateTime<Utc>) -> Self {
        Self {
            exception_type: exception.type_name().to_string(),
            message: exception.message().to_string(),
            timestamp,
            stack_frames: parse_exception(exception),
        }
    }

    pub fn to_json(&self) -> CrashResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> CrashResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl From<&ExceptionInfo> for HandledException {
    fn from(exception: &ExceptionInfo) -> Self {
        HandledException::from_exception(exception)
    }
}
