#![doc = include_str!("RUSTDOC.md")]

pub mod agent;
pub mod crash;

#[cfg(test)]
pub mod test_support;
