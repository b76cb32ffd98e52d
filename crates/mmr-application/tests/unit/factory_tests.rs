//! Tests for capability factories

use std::sync::Arc;

use mmr_application::components::{
    CapabilityFactory, Component, ComponentFactory, TextEmbedding,
};
use mmr_domain::ErrorKind;
use serde_json::json;

use crate::support::text_registry;

fn mock_factory(tag: &str) -> CapabilityFactory<TextEmbedding> {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    factory
        .set_config(Some(&json!({"implementation_type": "mock", "mock": {"tag": tag}})))
        .unwrap();
    factory
}

#[test]
fn test_cached_instance_is_identity_equal() {
    let factory = mock_factory("factory-identity");
    let first = factory.get_or_create_instance().unwrap();
    let second = factory.get_or_create_instance().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.build_count(), 1);
    assert!(factory.is_built());
}

#[test]
fn test_set_config_none_is_noop() {
    let factory = mock_factory("factory-none");
    let before = factory.config();
    let instance = factory.get_or_create_instance().unwrap();

    factory.set_config(None).unwrap();

    assert_eq!(factory.config(), before);
    assert!(factory.is_built());
    let after = factory.get_or_create_instance().unwrap();
    assert!(Arc::ptr_eq(&instance, &after));
    assert_eq!(factory.epoch(), 1);
}

#[test]
fn test_set_config_invalidates_cached_instance() {
    let factory = mock_factory("factory-invalidate");
    let first = factory.get_or_create_instance().unwrap();

    factory
        .set_config(Some(&json!({"implementation_type": "mock", "mock": {"tag": "other"}})))
        .unwrap();
    assert!(!factory.is_built());

    let second = factory.get_or_create_instance().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(factory.build_count(), 2);
}

#[test]
fn test_unchanged_config_keeps_cached_instance() {
    let factory = mock_factory("factory-unchanged");
    let first = factory.get_or_create_instance().unwrap();

    factory
        .set_config(Some(&json!({"implementation_type": "mock", "mock": {"tag": "factory-unchanged"}})))
        .unwrap();

    assert!(factory.is_built());
    let second = factory.get_or_create_instance().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.epoch(), 1);
    assert_eq!(factory.build_count(), 1);
}

#[test]
fn test_rejected_config_keeps_previous() {
    let factory = mock_factory("factory-rejected");
    let before = factory.config();

    let err = factory.set_config(Some(&json!(["not", "a", "mapping"]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    let err = factory
        .set_config(Some(&json!({"implementation_type": false})))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    assert_eq!(factory.config(), before);
}

#[test]
fn test_unknown_implementation_is_not_found() {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    factory
        .set_config(Some(&json!({"implementation_type": "missing"})))
        .unwrap();
    let err = factory.get_or_create_instance().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_unset_implementation_type_is_configuration_error() {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    let err = factory.get_or_create_instance().err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("implementation_type"));
}

#[test]
fn test_failed_build_is_retried() {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    factory
        .set_config(Some(&json!({"implementation_type": "mock", "mock": {"delay_ms": "soon"}})))
        .unwrap();
    assert!(factory.get_or_create_instance().is_err());
    assert!(!factory.is_built());
    assert_eq!(factory.build_count(), 0);

    factory
        .set_config(Some(&json!({"implementation_type": "mock", "mock": {}})))
        .unwrap();
    assert!(factory.get_or_create_instance().is_ok());
}

#[test]
fn test_concurrent_first_build_runs_once() {
    let factory = Arc::new(mock_factory("factory-concurrent"));
    let handles = (0..16)
        .map(|_| {
            let factory = Arc::clone(&factory);
            std::thread::spawn(move || factory.get_or_create_instance().unwrap())
        })
        .collect::<Vec<_>>();
    let instances = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();

    assert_eq!(factory.build_count(), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[test]
fn test_component_carries_category() {
    let factory = mock_factory("factory-component");
    let component = factory.get_or_create_component().unwrap();
    assert!(matches!(component, Component::TextEmbedding(_)));
    assert_eq!(component.category(), "text_embedding");
    assert_eq!(component.provider_name(), "mock");
}

#[test]
fn test_config_template_lists_every_implementation() {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    let template = factory.config_template();
    assert_eq!(template.implementation_type, "mock");
    assert_eq!(template.section("mock")["delay_ms"], 0);

    let configured = mock_factory("factory-template");
    let template = configured.config_template();
    assert_eq!(template.section("mock")["tag"], "factory-template");
}

#[test]
fn test_implementations_lists_registry() {
    let factory = CapabilityFactory::<TextEmbedding>::new(text_registry());
    assert_eq!(factory.implementations(), vec![("mock", "Test double")]);
    assert_eq!(factory.category(), "text_embedding");
}
