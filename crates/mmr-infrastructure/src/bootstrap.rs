//! Application bootstrap
//!
//! Builds the runtime object graph from an [`AppConfig`]:
//! registered implementations → [`ComponentManager`] → [`ExtractionPipeline`]
//! → [`RetrievalService`].

use std::sync::Arc;

use mmr_application::{ComponentManager, ExtractionPipeline, RetrievalService};
use mmr_domain::error::Result;
use mmr_domain::ports::providers::AudioExtractor;
use mmr_providers::audio::FfmpegAudioExtractor;

use crate::config::{AppConfig, ConfigLoader};

/// Build outcome of one component category
#[derive(Debug)]
pub struct ComponentStatus {
    /// Category name
    pub category: &'static str,
    /// Implementation name on success
    pub result: Result<String>,
}

/// Wired application services
pub struct AppContext {
    loader: ConfigLoader,
    config: AppConfig,
    manager: Arc<ComponentManager>,
    pipeline: Arc<ExtractionPipeline>,
    retrieval: Arc<RetrievalService>,
}

impl AppContext {
    /// Load configuration with `loader` and build the services
    pub fn load(loader: ConfigLoader) -> Result<Self> {
        let config = loader.load()?;
        Self::build(loader, config)
    }

    /// Build the services from an already loaded configuration
    ///
    /// [`reload`](Self::reload) on the result uses the default loader.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        Self::build(ConfigLoader::new(), config)
    }

    fn build(loader: ConfigLoader, config: AppConfig) -> Result<Self> {
        let manager = Arc::new(ComponentManager::from_registered());
        manager.apply_config(&config.components)?;
        let (pipeline, retrieval) = Self::services(&manager, &config)?;

        tracing::info!(
            categories = manager.categories().len(),
            configured = config.components.len(),
            failure_policy = ?config.pipeline.failure_policy,
            "Application context ready"
        );
        Ok(Self {
            loader,
            config,
            manager,
            pipeline,
            retrieval,
        })
    }

    fn services(
        manager: &Arc<ComponentManager>,
        config: &AppConfig,
    ) -> Result<(Arc<ExtractionPipeline>, Arc<RetrievalService>)> {
        let audio: Arc<dyn AudioExtractor> =
            Arc::new(FfmpegAudioExtractor::new(&config.audio.ffmpeg_path));
        let pipeline = Arc::new(ExtractionPipeline::new(
            Arc::clone(manager),
            audio,
            config.pipeline.clone(),
        )?);
        let retrieval = Arc::new(RetrievalService::new(
            Arc::clone(manager),
            Arc::clone(&pipeline),
        ));
        Ok((pipeline, retrieval))
    }

    /// Reload configuration and re-apply it
    ///
    /// Categories whose sub-tree changed drop their cached instance and
    /// rebuild on next use. On error the context keeps its prior state.
    pub fn reload(&mut self) -> Result<()> {
        let config = self.loader.load()?;
        let (pipeline, retrieval) = Self::services(&self.manager, &config)?;
        self.manager.apply_config(&config.components)?;

        self.pipeline = pipeline;
        self.retrieval = retrieval;
        self.config = config;
        tracing::info!("Configuration reloaded");
        Ok(())
    }

    /// Build every configured category and report the outcome per category
    pub fn check_components(&self) -> Vec<ComponentStatus> {
        self.manager
            .categories()
            .into_iter()
            .filter(|category| self.config.components.contains_key(*category))
            .map(|category| ComponentStatus {
                category,
                result: self
                    .manager
                    .get_component(category)
                    .map(|component| component.provider_name().to_string()),
            })
            .collect()
    }

    /// Current configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Component manager
    pub fn manager(&self) -> &Arc<ComponentManager> {
        &self.manager
    }

    /// Extraction pipeline
    pub fn pipeline(&self) -> &Arc<ExtractionPipeline> {
        &self.pipeline
    }

    /// Retrieval service
    pub fn retrieval(&self) -> &Arc<RetrievalService> {
        &self.retrieval
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config_path", &self.loader.config_path())
            .field("manager", &self.manager)
            .finish_non_exhaustive()
    }
}

