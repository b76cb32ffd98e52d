//! Capability categories
//!
//! A [`Capability`] ties together a category name, the trait object its
//! implementations satisfy, the distributed slice they register into, and
//! the [`Component`] variant that carries a built instance.

use std::fmt;
use std::sync::Arc;

use mmr_domain::constants::{
    CATEGORY_ASR, CATEGORY_IMAGE_EMBEDDING, CATEGORY_SEARCH_ENGINE, CATEGORY_STORAGE,
    CATEGORY_TEXT_EMBEDDING, CATEGORY_VIDEO_EMBEDDING, CATEGORY_VLM,
};
use mmr_domain::ports::providers::{
    AsrProvider, ImageEmbeddingProvider, SearchEngineProvider, StorageProvider,
    TextEmbeddingProvider, VideoEmbeddingProvider, VlmProvider,
};

use crate::registry::{
    ASR_PROVIDERS, IMAGE_EMBEDDING_PROVIDERS, ImplementationRegistry, ProviderEntry,
    SEARCH_ENGINE_PROVIDERS, STORAGE_PROVIDERS, TEXT_EMBEDDING_PROVIDERS,
    VIDEO_EMBEDDING_PROVIDERS, VLM_PROVIDERS,
};

/// One category of capability
pub trait Capability: Send + Sync + 'static {
    /// Trait object implemented by every implementation of the category
    type Provider: ?Sized + Send + Sync + 'static;

    /// Category name, unique across the component manager
    const CATEGORY: &'static str;

    /// Entries registered at compile time
    fn registered() -> &'static [ProviderEntry<Self::Provider>];

    /// Wrap a built instance into the closed component enum
    fn into_component(provider: Arc<Self::Provider>) -> Component;

    /// Unwrap a component of this category
    fn from_component(component: Component) -> Option<Arc<Self::Provider>>;

    /// Registry holding every compile-time registration of this category
    ///
    /// # Panics
    ///
    /// Panics if two implementations registered the same name.
    fn registry() -> ImplementationRegistry<Self::Provider> {
        ImplementationRegistry::from_entries(Self::CATEGORY, Self::registered())
    }
}

/// A built instance of any category
#[derive(Clone)]
pub enum Component {
    /// `text_embedding` instance
    TextEmbedding(Arc<dyn TextEmbeddingProvider>),
    /// `image_embedding` instance
    ImageEmbedding(Arc<dyn ImageEmbeddingProvider>),
    /// `video_embedding` instance
    VideoEmbedding(Arc<dyn VideoEmbeddingProvider>),
    /// `asr` instance
    Asr(Arc<dyn AsrProvider>),
    /// `vlm` instance
    Vlm(Arc<dyn VlmProvider>),
    /// `search_engine` instance
    SearchEngine(Arc<dyn SearchEngineProvider>),
    /// `storage` instance
    Storage(Arc<dyn StorageProvider>),
}

impl Component {
    /// Category of the wrapped instance
    pub fn category(&self) -> &'static str {
        match self {
            Self::TextEmbedding(_) => CATEGORY_TEXT_EMBEDDING,
            Self::ImageEmbedding(_) => CATEGORY_IMAGE_EMBEDDING,
            Self::VideoEmbedding(_) => CATEGORY_VIDEO_EMBEDDING,
            Self::Asr(_) => CATEGORY_ASR,
            Self::Vlm(_) => CATEGORY_VLM,
            Self::SearchEngine(_) => CATEGORY_SEARCH_ENGINE,
            Self::Storage(_) => CATEGORY_STORAGE,
        }
    }

    /// Implementation name of the wrapped instance
    pub fn provider_name(&self) -> &str {
        match self {
            Self::TextEmbedding(p) => p.provider_name(),
            Self::ImageEmbedding(p) => p.provider_name(),
            Self::VideoEmbedding(p) => p.provider_name(),
            Self::Asr(p) => p.provider_name(),
            Self::Vlm(p) => p.provider_name(),
            Self::SearchEngine(p) => p.provider_name(),
            Self::Storage(p) => p.provider_name(),
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("category", &self.category())
            .field("implementation", &self.provider_name())
            .finish()
    }
}

macro_rules! capability {
    ($(#[$meta:meta])* $marker:ident, $provider:ident, $category:expr, $slice:ident, $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $marker;

        impl Capability for $marker {
            type Provider = dyn $provider;
            const CATEGORY: &'static str = $category;

            fn registered() -> &'static [ProviderEntry<Self::Provider>] {
                &$slice
            }

            fn into_component(provider: Arc<Self::Provider>) -> Component {
                Component::$variant(provider)
            }

            fn from_component(component: Component) -> Option<Arc<Self::Provider>> {
                match component {
                    Component::$variant(provider) => Some(provider),
                    _ => None,
                }
            }
        }
    };
}

capability!(
    /// Text embedding category
    TextEmbedding,
    TextEmbeddingProvider,
    CATEGORY_TEXT_EMBEDDING,
    TEXT_EMBEDDING_PROVIDERS,
    TextEmbedding
);
capability!(
    /// Image embedding category
    ImageEmbedding,
    ImageEmbeddingProvider,
    CATEGORY_IMAGE_EMBEDDING,
    IMAGE_EMBEDDING_PROVIDERS,
    ImageEmbedding
);
capability!(
    /// Video embedding category
    VideoEmbedding,
    VideoEmbeddingProvider,
    CATEGORY_VIDEO_EMBEDDING,
    VIDEO_EMBEDDING_PROVIDERS,
    VideoEmbedding
);
capability!(
    /// Speech recognition category
    Asr,
    AsrProvider,
    CATEGORY_ASR,
    ASR_PROVIDERS,
    Asr
);
capability!(
    /// Vision-language category
    Vlm,
    VlmProvider,
    CATEGORY_VLM,
    VLM_PROVIDERS,
    Vlm
);
capability!(
    /// Search engine category
    SearchEngine,
    SearchEngineProvider,
    CATEGORY_SEARCH_ENGINE,
    SEARCH_ENGINE_PROVIDERS,
    SearchEngine
);
capability!(
    /// Object storage category
    Storage,
    StorageProvider,
    CATEGORY_STORAGE,
    STORAGE_PROVIDERS,
    Storage
);
