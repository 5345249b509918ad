pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    completion_service::CompletionService, generation_service::GenerationService,
    library_service::LibraryService, storage_service::QuizStore,
};
use crate::utils::time::{Clock, SystemClock};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub generation_service: GenerationService,
    pub library_service: LibraryService,
    pub completion_configured: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let completion = CompletionService::new(config, http_client.clone());
        let store = QuizStore::new(&config.mockapi_url, http_client)?;
        let completion_configured = completion.is_configured();

        let generation_service = GenerationService::new(
            completion,
            store.clone(),
            clock.clone(),
            config.max_input_chars,
        );
        let library_service = LibraryService::new(store, clock);

        Ok(Self {
            generation_service,
            library_service,
            completion_configured,
        })
    }
}
