//! Test utilities shared across crate-level unit tests.

pub mod agent;

pub use agent::{AgentCall, RecordingAgent};
