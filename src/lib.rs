pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::services::{
    explore_service::ExploreService,
    llm::{GeminiClient, LanguageModel, OpenAiClient},
    quiz_service::QuizService,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub explore_service: ExploreService,
}

impl AppState {
    /// Builds the state from process configuration, selecting the vendor
    /// adapter by LLM_PROVIDER.
    pub fn new() -> Result<Self> {
        let config = get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap();

        let model: Arc<dyn LanguageModel> = match config.llm_provider.as_str() {
            "openai" => {
                let api_key = config.openai_api_key.clone().ok_or_else(|| {
                    Error::Config("OPENAI_API_KEY is required when LLM_PROVIDER=openai".to_string())
                })?;
                Arc::new(OpenAiClient::new(api_key, http_client))
            }
            _ => {
                let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                    Error::Config("GEMINI_API_KEY is required when LLM_PROVIDER=gemini".to_string())
                })?;
                Arc::new(GeminiClient::new(api_key, http_client))
            }
        };

        Ok(Self::with_model(model))
    }

    /// Builds the state around an arbitrary adapter; the seam tests use to
    /// stub the vendor call.
    pub fn with_model(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            quiz_service: QuizService::new(model.clone()),
            explore_service: ExploreService::new(model),
        }
    }
}
