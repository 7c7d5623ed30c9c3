use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrashErrorCode {
    Serialization,
}

impl CrashErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrashErrorCode::Serialization => "crash/serialization",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CrashError {
    pub code: CrashErrorCode,
    message: String,
}

impl CrashError {
    pub fn new(code: CrashErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for CrashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for CrashError {}

impl From<serde_json::Error> for CrashError {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err.to_string())
    }
}

pub type CrashResult<T> = Result<T, CrashError>;

pub fn serialization_error(message: impl Into<String>) -> CrashError {
    CrashError::new(CrashErrorCode::Serialization, message)
}
