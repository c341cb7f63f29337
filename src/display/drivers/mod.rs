// src/display/drivers/mod.rs
//! Leaf display driver implementations.

pub mod headless;
#[cfg(test)]
pub mod mock;

pub use headless::HeadlessDisplayDriver;
