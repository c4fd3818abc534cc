//! Application state and composition.

use std::sync::Arc;

use crate::entities::{Anatomy, BodyParts};
use crate::infrastructure::{
    ports::{RandomPort, TranslatorPort},
    random::SystemRandom,
    settings::EngineConfig,
    translation::{CatalogTranslator, PassthroughTranslator, TranslationError},
};
use crate::use_cases::content::{ContentLoadReport, LoadContent};

/// Main application state.
///
/// Owns the body part registry and the adapters behind each port.
pub struct App {
    pub body_parts: BodyParts,
    pub translator: Arc<dyn TranslatorPort>,
    pub random: Arc<dyn RandomPort>,
    pub config: EngineConfig,
}

impl App {
    /// Wires the adapters named by `config`. Content is not loaded yet.
    pub fn new(config: EngineConfig) -> Result<Self, TranslationError> {
        let translator: Arc<dyn TranslatorPort> = match &config.locale_catalog {
            Some(path) => Arc::new(CatalogTranslator::from_path(path)?),
            None => Arc::new(PassthroughTranslator),
        };
        Ok(Self::with_ports(config, translator, Arc::new(SystemRandom::new())))
    }

    pub fn with_ports(
        config: EngineConfig,
        translator: Arc<dyn TranslatorPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            body_parts: BodyParts::new(),
            translator,
            random,
            config,
        }
    }

    /// Loads every configured content source, then finalizes and checks.
    pub fn load_content(&mut self) -> ContentLoadReport {
        LoadContent::new(self.config.sources()).execute(&mut self.body_parts)
    }

    /// Clears the registry and loads everything again.
    pub fn reload_content(&mut self) -> ContentLoadReport {
        tracing::info!("Reloading body part content");
        self.body_parts.reset();
        self.load_content()
    }

    /// The standard humanoid anatomy over the loaded parts.
    pub fn anatomy(&self) -> Anatomy {
        Anatomy::human(&self.body_parts, self.random.clone())
    }
}
