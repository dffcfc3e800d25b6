use crate::error::Result;
use crate::models::explore::ExploreChunk;
use crate::services::llm::LanguageModel;
use crate::services::prompts;
use crate::utils::retry::retry_with_backoff;
use crate::utils::segment::{segment_response, RelatedAccumulator};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

const EXPLORE_MAX_TOKENS: u32 = 4000;
const MAX_STREAM_ATTEMPTS: u32 = 3;
const STREAM_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Substituted for the explore answer on any upstream failure; the blocking
/// explore path never surfaces an error.
pub const EXPLORE_FALLBACK: &str = "bestie, the wifi must be acting up... let me try again";

#[derive(Clone)]
pub struct ExploreService {
    model: Arc<dyn LanguageModel>,
}

impl ExploreService {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Blocking explore: opaque prose generation, fallback string on failure.
    pub async fn explore(&self, query: &str) -> String {
        let (system_prompt, user_prompt) = prompts::explore(query);
        match self
            .model
            .generate(&system_prompt, &user_prompt, EXPLORE_MAX_TOKENS)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!("Explore query failed: {}", e);
                EXPLORE_FALLBACK.to_string()
            }
        }
    }

    /// Streaming explore: the upstream call is made once per attempt (whole
    /// request retried with backoff, never resumed), then the completed
    /// response is segmented into chunks for the client. A prose-only chunk
    /// is emitted first; if the structured suffix is complete, a cumulative
    /// chunk with deduplicated topics and questions follows.
    pub async fn stream_explore(&self, query: &str, age: u32) -> Result<Vec<ExploreChunk>> {
        let (system_prompt, user_prompt) = prompts::stream_explore(query, age);

        let model = self.model.clone();
        let content = retry_with_backoff(MAX_STREAM_ATTEMPTS, STREAM_RETRY_DELAY, || {
            let model = model.clone();
            let system_prompt = system_prompt.clone();
            let user_prompt = user_prompt.clone();
            async move {
                model
                    .generate(&system_prompt, &user_prompt, EXPLORE_MAX_TOKENS)
                    .await
            }
        })
        .await?;

        let segmented = segment_response(&content);
        let mut chunks = vec![ExploreChunk {
            text: segmented.text.clone(),
            topics: None,
            questions: None,
        }];

        if let Some(related) = segmented.related {
            let mut accumulator = RelatedAccumulator::default();
            accumulator.absorb(related);
            chunks.push(accumulator.into_chunk(segmented.text));
        }

        Ok(chunks)
    }
}
