use std::sync::Arc;

use muse_llm::LLMClient;

use crate::{
    core::config::AppConfig, generation::generation_service::GenerationService,
    history::history_store::HistoryStore,
};

#[derive(Clone)]
pub struct AppService {
    pub generation_service: GenerationService,
    pub history_store: HistoryStore,
}

impl AppService {
    pub fn new(config: &AppConfig) -> Self {
        let llm_client =
            LLMClient::new(config.llm.clone(), None).with_timeout(config.generation_timeout);

        Self {
            generation_service: GenerationService::new(llm_client),
            history_store: HistoryStore::new(config.history_file.clone()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            service: AppService::new(&config),
            config: Arc::new(config),
        }
    }
}
