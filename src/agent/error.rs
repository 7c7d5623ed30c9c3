use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AgentErrorCode {
    InvalidArgument,
    NotStarted,
    Internal,
}

impl AgentErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentErrorCode::InvalidArgument => "agent/invalid-argument",
            AgentErrorCode::NotStarted => "agent/not-started",
            AgentErrorCode::Internal => "agent/internal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AgentError {
    pub code: AgentErrorCode,
    message: String,
}

impl AgentError {
    pub fn new(code: AgentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for AgentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for AgentError {}

pub type AgentResult<T> = Result<T, AgentError>;

pub fn invalid_argument(message: impl Into<String>) -> AgentError {
    AgentError::new(AgentErrorCode::InvalidArgument, message)
}

pub fn not_started(message: impl Into<String>) -> AgentError {
    AgentError::new(AgentErrorCode::NotStarted, message)
}

pub fn internal_error(message: impl Into<String>) -> AgentError {
    AgentError::new(AgentErrorCode::Internal, message)
}
