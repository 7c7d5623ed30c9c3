pub const APPLICATION_FRAMEWORK: &str = "Rust";
pub const APPLICATION_FRAMEWORK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_ATTRIBUTE_INCREMENT: f64 = 1.0;
