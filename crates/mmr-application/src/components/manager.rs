//! Component manager

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mmr_domain::error::{Error, Result};
use serde_json::{Map, Value};

use super::capability::{
    Asr, Capability, Component, ImageEmbedding, SearchEngine, Storage, TextEmbedding,
    VideoEmbedding, Vlm,
};
use super::config::CapabilityConfig;
use super::factory::{CapabilityFactory, ComponentFactory};
use crate::registry::ImplementationRegistry;

/// Owns one factory per category and hands out built components
///
/// Registration happens during bootstrap through `&mut self`; afterwards the
/// manager is shared behind an `Arc` and every operation takes `&self`.
#[derive(Default)]
pub struct ComponentManager {
    factories: BTreeMap<&'static str, Arc<dyn ComponentFactory>>,
}

impl ComponentManager {
    /// Create a manager with no categories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with one factory per built-in category, each over
    /// the implementations registered at compile time
    pub fn from_registered() -> Self {
        let mut manager = Self::new();
        manager.register::<TextEmbedding>(TextEmbedding::registry());
        manager.register::<ImageEmbedding>(ImageEmbedding::registry());
        manager.register::<VideoEmbedding>(VideoEmbedding::registry());
        manager.register::<Asr>(Asr::registry());
        manager.register::<Vlm>(Vlm::registry());
        manager.register::<SearchEngine>(SearchEngine::registry());
        manager.register::<Storage>(Storage::registry());
        manager
    }

    /// Register a factory for `C` over `registry`
    ///
    /// # Panics
    ///
    /// Panics if the category is already registered.
    pub fn register<C: Capability>(&mut self, registry: ImplementationRegistry<C::Provider>) {
        self.register_factory(Arc::new(CapabilityFactory::<C>::new(registry)));
    }

    /// Register a factory
    ///
    /// # Panics
    ///
    /// Panics if the factory's category is already registered.
    pub fn register_factory(&mut self, factory: Arc<dyn ComponentFactory>) {
        let category = factory.category();
        assert!(
            !self.factories.contains_key(category),
            "category '{category}' already registered"
        );
        self.factories.insert(category, factory);
    }

    /// Distribute a configuration tree to the factories
    ///
    /// Every present sub-tree is checked before any is applied, so a
    /// rejected tree leaves all categories on their prior configuration.
    /// Categories absent from the tree keep their configuration. Keys with no
    /// registered category are ignored.
    pub fn apply_config(&self, tree: &BTreeMap<String, Value>) -> Result<()> {
        for key in tree.keys() {
            if !self.factories.contains_key(key.as_str()) {
                tracing::warn!(category = %key, "Ignoring configuration for unknown category");
            }
        }

        for (category, factory) in &self.factories {
            if let Some(raw) = tree.get(*category) {
                factory.validate_config(raw)?;
            }
        }

        for (category, factory) in &self.factories {
            factory.set_config(tree.get(*category))?;
        }
        Ok(())
    }

    /// [`apply_config`](Self::apply_config) for an untyped tree
    pub fn apply_config_value(&self, tree: &Value) -> Result<()> {
        match tree {
            Value::Null => Ok(()),
            Value::Object(map) => {
                let tree = map
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<BTreeMap<_, _>>();
                self.apply_config(&tree)
            }
            _ => Err(Error::configuration(
                "components",
                "expected a mapping of category name to configuration",
            )),
        }
    }

    /// Aggregated configuration template, keyed by category
    pub fn config_template(&self) -> BTreeMap<String, CapabilityConfig> {
        self.factories
            .iter()
            .map(|(category, factory)| ((*category).to_string(), factory.config_template()))
            .collect()
    }

    /// Aggregated configuration template as an untyped value
    pub fn config_template_value(&self) -> Value {
        let map = self
            .config_template()
            .into_iter()
            .map(|(category, config)| (category, config.to_value()))
            .collect::<Map<_, _>>();
        Value::Object(map)
    }

    /// Built component of `category`
    ///
    /// Fails with `NotFound` when no factory serves `category`; errors from
    /// building the component are passed through.
    pub fn get_component(&self, category: &str) -> Result<Component> {
        self.factory(category)
            .ok_or_else(|| Error::not_found(format!("category '{category}'")))?
            .get_or_create_component()
    }

    /// Built component of capability `C`, typed
    pub fn get<C: Capability>(&self) -> Result<Arc<C::Provider>> {
        let component = self.get_component(C::CATEGORY)?;
        let category = component.category();
        C::from_component(component).ok_or_else(|| {
            Error::internal(format!(
                "factory for '{}' produced a '{}' component",
                C::CATEGORY,
                category
            ))
        })
    }

    /// Factory serving `category`
    pub fn factory(&self, category: &str) -> Option<&Arc<dyn ComponentFactory>> {
        self.factories.get(category)
    }

    /// Registered categories, sorted
    pub fn categories(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Whether `category` has a factory
    pub fn contains(&self, category: &str) -> bool {
        self.factories.contains_key(category)
    }
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("categories", &self.categories())
            .finish()
    }
}
