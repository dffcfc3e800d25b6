use crate::error::{Error, Result};
use crate::models::question::{Explanation, Question, TestQuestion};
use crate::services::llm::LanguageModel;
use crate::services::prompts;
use crate::utils::shuffle::shuffle_answers;
use crate::utils::validation::{validate_question, validate_test_question};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{error, info};

const QUESTION_MAX_TOKENS: u32 = 1500;
const TEST_SET_MAX_TOKENS: u32 = 3000;
const TEST_SET_SIZE: usize = 15;
const TEST_SET_MIN_VALID: usize = 5;

#[derive(Clone)]
pub struct QuizService {
    model: Arc<dyn LanguageModel>,
}

impl QuizService {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Generates one practice question: prompt, vendor call, parse, option
    /// shuffle with index remap, normalization, validation.
    pub async fn playground_question(
        &self,
        topic: &str,
        level: u8,
        age: u32,
    ) -> Result<Question> {
        let (system_prompt, user_prompt) = prompts::playground_question(topic, level, age);
        let content = self
            .model
            .generate(&system_prompt, &user_prompt, QUESTION_MAX_TOKENS)
            .await?;

        let raw: JsonValue = serde_json::from_str(strip_code_fences(&content)).map_err(|e| {
            error!("JSON parse error: {}", e);
            Error::Generation("Invalid JSON response".to_string())
        })?;

        let question = build_playground_question(&raw, topic, level, age);
        if !validate_question(&question) {
            return Err(Error::Format(
                "Failed to generate valid question".to_string(),
            ));
        }
        Ok(question)
    }

    /// Generates an exam test set: up to 15 questions, difficulty tier
    /// derived from position, filtered to the ones that validate.
    pub async fn test_questions(&self, topic: &str, exam_type: &str) -> Result<Vec<TestQuestion>> {
        let (system_prompt, user_prompt) = prompts::test_set(topic, exam_type);
        info!("Generating test questions...");
        let content = self
            .model
            .generate(&system_prompt, &user_prompt, TEST_SET_MAX_TOKENS)
            .await?;

        let raw: JsonValue = serde_json::from_str(strip_code_fences(&content)).map_err(|e| {
            error!("JSON parse error: {}", e);
            Error::Generation("Failed to parse API response".to_string())
        })?;

        build_test_set(&raw, topic, exam_type)
    }
}

fn build_playground_question(raw: &JsonValue, topic: &str, level: u8, age: u32) -> Question {
    let mut options: Vec<String> = raw
        .get("options")
        .and_then(|o| o.as_array())
        .map(|a| {
            a.iter()
                .map(|v| v.as_str().unwrap_or("").to_string())
                .collect()
        })
        .unwrap_or_default();

    // A missing or out-of-range index survives the shuffle unchanged and is
    // rejected by validation.
    let correct = raw
        .get("correctAnswer")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(usize::MAX);
    let correct = shuffle_answers(&mut options, correct);

    let explanation = raw.get("explanation");
    Question {
        text: raw
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        options,
        correct_answer: correct,
        explanation: Explanation {
            correct: explanation
                .and_then(|e| e.get("correct"))
                .and_then(|v| v.as_str())
                .unwrap_or("Correct answer explanation")
                .to_string(),
            key_point: explanation
                .and_then(|e| e.get("key_point"))
                .and_then(|v| v.as_str())
                .unwrap_or("Key learning point")
                .to_string(),
        },
        difficulty: level,
        topic: topic.to_string(),
        subtopic: raw
            .get("subtopic")
            .and_then(|v| v.as_str())
            .unwrap_or(topic)
            .to_string(),
        question_type: "conceptual".to_string(),
        age_group: age.to_string(),
    }
}

pub(crate) fn build_test_set(
    raw: &JsonValue,
    topic: &str,
    exam_type: &str,
) -> Result<Vec<TestQuestion>> {
    let items = raw
        .get("questions")
        .and_then(|q| q.as_array())
        .ok_or_else(|| Error::Generation("Invalid response structure".to_string()))?;
    info!("Received {} questions", items.len());

    let valid: Vec<TestQuestion> = items
        .iter()
        .enumerate()
        .map(|(idx, value)| coerce_test_question(value, idx, topic, exam_type))
        .filter(validate_test_question)
        .collect();
    info!("Valid questions: {}", valid.len());

    if valid.len() >= TEST_SET_MIN_VALID {
        Ok(valid.into_iter().take(TEST_SET_SIZE).collect())
    } else {
        Err(Error::Generation(format!(
            "Only {} valid questions generated",
            valid.len()
        )))
    }
}

fn coerce_test_question(
    value: &JsonValue,
    idx: usize,
    topic: &str,
    exam_type: &str,
) -> TestQuestion {
    TestQuestion {
        text: value
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        options: value
            .get("options")
            .and_then(|o| o.as_array())
            .map(|a| {
                a.iter()
                    .map(|v| v.as_str().unwrap_or("").to_string())
                    .collect()
            })
            .unwrap_or_default(),
        correct_answer: value
            .get("correctAnswer")
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(0),
        explanation: value
            .get("explanation")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string(),
        // Tiers of five: questions 0-4 are tier 1, 5-9 tier 2, 10-14 tier 3.
        difficulty: (idx / 5 + 1) as u8,
        topic: topic.to_string(),
        subtopic: value
            .get("subtopic")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{} Concept {}", topic, idx + 1)),
        exam_type: exam_type.to_string(),
        question_type: "conceptual".to_string(),
        age_group: "16-18".to_string(),
    }
}

/// Models sometimes wrap the requested JSON object in a markdown code block.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}
