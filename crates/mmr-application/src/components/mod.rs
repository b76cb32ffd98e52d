//! Capability categories, their factories and the component manager

pub mod capability;
pub mod config;
pub mod factory;
pub mod manager;

pub use capability::{
    Asr, Capability, Component, ImageEmbedding, SearchEngine, Storage, TextEmbedding,
    VideoEmbedding, Vlm,
};
pub use config::{CapabilityConfig, IMPLEMENTATION_TYPE_KEY};
pub use factory::{CapabilityFactory, ComponentFactory};
pub use manager::ComponentManager;
