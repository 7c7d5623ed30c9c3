#![doc = include_str!("README.md")]
mod constants;
mod error;
mod exception;
mod report;
mod stack_trace;

#[doc(inline)]
pub use constants::{aggregated_inner_exception_label, INNER_EXCEPTION_LABEL, UNKNOWN_FILE_NAME};

#[doc(inline)]
pub use error::{serialization_error, CrashError, CrashErrorCode, CrashResult};

#[doc(inline)]
pub use exception::{parse_exception, Cause, ExceptionInfo, TypeName};

#[doc(inline)]
pub use report::HandledException;

#[doc(inline)]
pub use stack_trace::{parse_line, parse_text, IntoStackTraceText, StackFrame, StackFrames};
