//! Component factories
//!
//! A factory owns the configuration of one category and lazily builds the
//! selected implementation, caching it until the configuration changes.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use mmr_domain::error::{Error, Result};
use serde_json::{Map, Value};

use super::capability::{Capability, Component};
use super::config::{CapabilityConfig, IMPLEMENTATION_TYPE_KEY};
use crate::registry::ImplementationRegistry;

/// Category-agnostic view of a factory, as held by the component manager
pub trait ComponentFactory: Send + Sync {
    /// Category served by this factory
    fn category(&self) -> &'static str;

    /// Current configuration
    fn config(&self) -> CapabilityConfig;

    /// Configuration shape listing every registered implementation
    ///
    /// Configured sections are reported as-is; implementations without a
    /// section contribute their default template.
    fn config_template(&self) -> CapabilityConfig;

    /// Check that `raw` converts into a [`CapabilityConfig`] without applying it
    fn validate_config(&self, raw: &Value) -> Result<CapabilityConfig> {
        CapabilityConfig::from_raw(self.category(), raw)
    }

    /// Replace the configuration and drop the cached instance
    ///
    /// `None` and a value equal to the current configuration are no-ops.
    /// A rejected value leaves the prior configuration in place.
    fn set_config(&self, raw: Option<&Value>) -> Result<()>;

    /// Cached instance, building it on first use
    fn get_or_create_component(&self) -> Result<Component>;

    /// Whether an instance is cached for the current configuration
    fn is_built(&self) -> bool;

    /// Registered implementations as `(name, description)`, sorted by name
    fn implementations(&self) -> Vec<(&'static str, &'static str)>;
}

struct FactoryState<P: ?Sized> {
    config: CapabilityConfig,
    instance: Option<Arc<P>>,
    epoch: u64,
    builds: u64,
}

/// Factory for capability `C`
pub struct CapabilityFactory<C: Capability> {
    registry: ImplementationRegistry<C::Provider>,
    state: RwLock<FactoryState<C::Provider>>,
}

impl<C: Capability> CapabilityFactory<C> {
    /// Create an unconfigured factory resolving against `registry`
    pub fn new(registry: ImplementationRegistry<C::Provider>) -> Self {
        Self::with_config(registry, CapabilityConfig::default())
    }

    /// Create a factory over every compile-time registration of `C`
    pub fn from_registered() -> Self {
        Self::new(C::registry())
    }

    /// Create a factory with an initial configuration
    pub fn with_config(
        registry: ImplementationRegistry<C::Provider>,
        config: CapabilityConfig,
    ) -> Self {
        Self {
            registry,
            state: RwLock::new(FactoryState {
                config,
                instance: None,
                epoch: 0,
                builds: 0,
            }),
        }
    }

    /// Registry this factory resolves against
    pub fn registry(&self) -> &ImplementationRegistry<C::Provider> {
        &self.registry
    }

    /// Cached instance, building it on first use
    ///
    /// The fast path only takes the read lock. The first caller after a
    /// configuration change takes the write lock and builds; callers racing
    /// with it wait and then reuse its result. A failed build caches nothing,
    /// so the next call tries again.
    pub fn get_or_create_instance(&self) -> Result<Arc<C::Provider>> {
        if let Some(instance) = self.read_state()?.instance.as_ref() {
            return Ok(Arc::clone(instance));
        }

        let mut state = self.write_state()?;
        if let Some(instance) = state.instance.as_ref() {
            return Ok(Arc::clone(instance));
        }

        let name = state.config.implementation_type.clone();
        if name.is_empty() {
            return Err(Error::configuration(
                C::CATEGORY,
                format!("{IMPLEMENTATION_TYPE_KEY} is not set"),
            ));
        }

        let entry = self.registry.resolve(&name)?;
        let section = state.config.section(&name);
        let instance = (entry.factory)(&section).inspect_err(|e| {
            tracing::warn!(
                category = C::CATEGORY,
                implementation = %name,
                error = %e,
                "Component initialisation failed"
            );
        })?;

        state.builds += 1;
        tracing::info!(
            category = C::CATEGORY,
            implementation = %name,
            epoch = state.epoch,
            "Component initialised"
        );
        state.instance = Some(Arc::clone(&instance));
        Ok(instance)
    }

    /// Number of successful builds since creation
    pub fn build_count(&self) -> u64 {
        self.read_state().map(|s| s.builds).unwrap_or_default()
    }

    /// Number of configuration changes since creation
    pub fn epoch(&self) -> u64 {
        self.read_state().map(|s| s.epoch).unwrap_or_default()
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, FactoryState<C::Provider>>> {
        self.state
            .read()
            .map_err(|_| Error::internal(format!("{} factory lock poisoned", C::CATEGORY)))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, FactoryState<C::Provider>>> {
        self.state
            .write()
            .map_err(|_| Error::internal(format!("{} factory lock poisoned", C::CATEGORY)))
    }
}

impl<C: Capability> ComponentFactory for CapabilityFactory<C> {
    fn category(&self) -> &'static str {
        C::CATEGORY
    }

    fn config(&self) -> CapabilityConfig {
        self.read_state()
            .map(|s| s.config.clone())
            .unwrap_or_default()
    }

    fn config_template(&self) -> CapabilityConfig {
        let mut template = self.config();
        for entry in self.registry.entries() {
            template
                .implementations
                .entry(entry.name.to_string())
                .or_insert_with(|| match (entry.config_template)() {
                    Value::Null => Value::Object(Map::new()),
                    section => section,
                });
        }
        if template.implementation_type.is_empty()
            && let Some(first) = self.registry.names().first()
        {
            template.implementation_type = (*first).to_string();
        }
        template
    }

    fn set_config(&self, raw: Option<&Value>) -> Result<()> {
        let Some(raw) = raw else {
            return Ok(());
        };
        let config = self.validate_config(raw)?;

        let mut state = self.write_state()?;
        if state.config == config {
            return Ok(());
        }
        state.config = config;
        state.instance = None;
        state.epoch += 1;
        tracing::debug!(
            category = C::CATEGORY,
            implementation = %state.config.implementation_type,
            epoch = state.epoch,
            "Component configuration replaced"
        );
        Ok(())
    }

    fn get_or_create_component(&self) -> Result<Component> {
        self.get_or_create_instance().map(C::into_component)
    }

    fn is_built(&self) -> bool {
        self.read_state()
            .map(|s| s.instance.is_some())
            .unwrap_or(false)
    }

    fn implementations(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .entries()
            .map(|entry| (entry.name, entry.description))
            .collect()
    }
}
