//! Registry entries and the explicit per-category registry object

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mmr_domain::error::{Error, Result};
use serde_json::Value;

/// Builds an implementation from its own configuration section
///
/// This is the implementation's `initialize` step: parse the section into
/// typed settings, validate required fields, construct the instance. No
/// network I/O happens here.
pub type ProviderFactory<P> = fn(&Value) -> Result<Arc<P>>;

/// Registry entry for one implementation of a capability
///
/// Each implementation registers itself with one of these using
/// `#[linkme::distributed_slice(<CATEGORY>_PROVIDERS)]`.
pub struct ProviderEntry<P: ?Sized + 'static> {
    /// Implementation name, unique within its category (e.g. "qwen")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default configuration section, used for template generation
    pub config_template: fn() -> Value,
    /// Factory function to create the instance
    pub factory: ProviderFactory<P>,
}

impl<P: ?Sized> Clone for ProviderEntry<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for ProviderEntry<P> {}

impl<P: ?Sized> fmt::Debug for ProviderEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Mapping from implementation name to entry for one capability category
///
/// Built once at bootstrap and immutable afterwards, so concurrent reads
/// need no synchronisation. Tests build isolated instances with
/// [`ImplementationRegistry::new`].
pub struct ImplementationRegistry<P: ?Sized + 'static> {
    category: &'static str,
    entries: BTreeMap<&'static str, ProviderEntry<P>>,
}

impl<P: ?Sized> ImplementationRegistry<P> {
    /// Create an empty registry for `category`
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            entries: BTreeMap::new(),
        }
    }

    /// Create a registry holding every entry of `entries`
    ///
    /// # Panics
    ///
    /// Panics if two entries share a name.
    pub fn from_entries(category: &'static str, entries: &[ProviderEntry<P>]) -> Self {
        let mut registry = Self::new(category);
        for entry in entries {
            registry.register(*entry);
        }
        registry
    }

    /// Register an implementation
    ///
    /// # Panics
    ///
    /// Panics if `entry.name` is already registered. Duplicate names are a
    /// startup-time programming error and must never shadow each other.
    pub fn register(&mut self, entry: ProviderEntry<P>) {
        assert!(
            !self.entries.contains_key(entry.name),
            "implementation '{}' already registered for category '{}'",
            entry.name,
            self.category
        );
        tracing::debug!(
            category = self.category,
            implementation = entry.name,
            "Registered implementation"
        );
        self.entries.insert(entry.name, entry);
    }

    /// Look up an implementation without initialising it
    pub fn resolve(&self, name: &str) -> Result<&ProviderEntry<P>> {
        self.entries.get(name).ok_or_else(|| {
            Error::not_found(format!(
                "implementation '{}' for category '{}' (available: {})",
                name,
                self.category,
                self.names().join(", ")
            ))
        })
    }

    /// Category this registry serves
    pub fn category(&self) -> &'static str {
        self.category
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Registered entries, sorted by name
    pub fn entries(&self) -> impl Iterator<Item = &ProviderEntry<P>> {
        self.entries.values()
    }

    /// Whether `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered implementations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P: ?Sized> fmt::Debug for ImplementationRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationRegistry")
            .field("category", &self.category)
            .field("implementations", &self.names())
            .finish()
    }
}
