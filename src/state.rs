use std::sync::Arc;

use crate::config_manager::Config;
use crate::translate::{TranslateFactory, TranslateInterface};

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn TranslateInterface>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let translator = TranslateFactory::create_translator(&config.translate_config)?;
        Ok(Self::with_translator(translator))
    }

    pub fn with_translator(translator: Arc<dyn TranslateInterface>) -> Self {
        Self { translator }
    }
}
