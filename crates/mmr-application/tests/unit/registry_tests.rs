//! Tests for implementation registries
//!
//! Isolated registries are built per test; the compile-time slices are
//! checked through `extern crate mmr_providers`.

use std::sync::Arc;

use mmr_application::components::{
    Asr, Capability, ImageEmbedding, SearchEngine, Storage, TextEmbedding, VideoEmbedding, Vlm,
};
use mmr_application::registry::{ImplementationRegistry, ProviderEntry};
use mmr_domain::ErrorKind;
use mmr_domain::error::Result;
use mmr_domain::ports::providers::TextEmbeddingProvider;
use serde_json::{Value, json};

use crate::support::text_registry;

fn build_null(_: &Value) -> Result<Arc<dyn TextEmbeddingProvider>> {
    let registry = TextEmbedding::registry();
    let entry = registry.resolve("null")?;
    (entry.factory)(&json!({}))
}

fn entry(name: &'static str) -> ProviderEntry<dyn TextEmbeddingProvider> {
    ProviderEntry {
        name,
        description: "test entry",
        config_template: || json!({}),
        factory: build_null,
    }
}

#[test]
fn test_resolve_registered_entry() {
    let registry = text_registry();
    let entry = registry.resolve("mock").unwrap();
    assert_eq!(entry.name, "mock");
    assert_eq!(registry.category(), "text_embedding");
}

#[test]
fn test_resolve_does_not_build() {
    let mut registry = ImplementationRegistry::<dyn TextEmbeddingProvider>::new(TextEmbedding::CATEGORY);
    registry.register(ProviderEntry {
        name: "exploding",
        description: "factory panics",
        config_template: || json!({}),
        factory: |_| panic!("resolve must not initialise"),
    });
    assert!(registry.resolve("exploding").is_ok());
}

#[test]
fn test_resolve_unknown_name_lists_available() {
    let mut registry = ImplementationRegistry::new(TextEmbedding::CATEGORY);
    registry.register(entry("alpha"));
    registry.register(entry("beta"));

    let err = registry.resolve("gamma").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let message = err.to_string();
    assert!(message.contains("gamma"), "{message}");
    assert!(message.contains("text_embedding"), "{message}");
    assert!(message.contains("alpha, beta"), "{message}");
}

#[test]
#[should_panic(expected = "already registered")]
fn test_duplicate_registration_panics() {
    let mut registry = ImplementationRegistry::new(TextEmbedding::CATEGORY);
    registry.register(entry("dup"));
    registry.register(entry("dup"));
}

#[test]
#[should_panic(expected = "already registered")]
fn test_from_entries_rejects_duplicates() {
    let _ = ImplementationRegistry::from_entries(
        TextEmbedding::CATEGORY,
        &[entry("same"), entry("same")],
    );
}

#[test]
fn test_names_are_sorted() {
    let mut registry = ImplementationRegistry::new(TextEmbedding::CATEGORY);
    registry.register(entry("zeta"));
    registry.register(entry("alpha"));
    registry.register(entry("mid"));
    assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
    assert_eq!(registry.len(), 3);
    assert!(registry.contains("mid"));
}

#[test]
fn test_isolated_registries_do_not_share_state() {
    let mut first = ImplementationRegistry::<dyn TextEmbeddingProvider>::new("text_embedding");
    let second = ImplementationRegistry::<dyn TextEmbeddingProvider>::new("text_embedding");
    first.register(entry("only_here"));
    assert!(first.contains("only_here"));
    assert!(second.is_empty());
}

#[test]
fn test_compile_time_registrations() {
    for (category, names) in [
        (TextEmbedding::CATEGORY, TextEmbedding::registry().names()),
        (ImageEmbedding::CATEGORY, ImageEmbedding::registry().names()),
        (VideoEmbedding::CATEGORY, VideoEmbedding::registry().names()),
        (Vlm::CATEGORY, Vlm::registry().names()),
    ] {
        assert!(names.contains(&"null"), "{category}: {names:?}");
        assert!(names.contains(&"qwen"), "{category}: {names:?}");
    }

    let asr = Asr::registry().names();
    assert!(asr.contains(&"aliyun") && asr.contains(&"null"), "{asr:?}");
    assert!(SearchEngine::registry().contains("memory"));
    let storage = Storage::registry().names();
    assert!(storage.contains(&"memory") && storage.contains(&"local"), "{storage:?}");
}

#[test]
fn test_registered_entries_have_descriptions() {
    for entry in TextEmbedding::registered() {
        assert!(!entry.description.is_empty(), "{} has no description", entry.name);
        assert!((entry.config_template)().is_object(), "{}", entry.name);
    }
}
