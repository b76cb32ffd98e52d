//! # Application Layer
//!
//! Wires capability implementations into usable components:
//!
//! - [`registry`]: compile-time registration slices and the explicit
//!   per-category [`ImplementationRegistry`](registry::ImplementationRegistry)
//! - [`components`]: the [`Capability`](components::Capability) categories,
//!   their lazily-building factories and the
//!   [`ComponentManager`](components::ComponentManager)
//! - [`use_cases`]: the extraction pipeline and the retrieval service

pub mod components;
pub mod registry;
pub mod use_cases;

pub use components::{Component, ComponentManager};
pub use use_cases::{ExtractionPipeline, PipelineConfig, RetrievalService};
