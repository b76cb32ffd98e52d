//! Domain ports

pub mod providers;

pub use providers::*;
