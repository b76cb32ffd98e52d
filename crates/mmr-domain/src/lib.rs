//! # Domain Layer
//!
//! Core types of the multimodal retriever: the error taxonomy, the records
//! that flow through extraction, and the capability ports every provider
//! implements. This crate performs no I/O.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorKind, Result};
