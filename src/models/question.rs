use serde::{Deserialize, Serialize};

/// A single multiple-choice practice question in the shape the front-end
/// consumes. Built from parsed model output, shuffled once, validated once,
/// then immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: Explanation,
    pub difficulty: u8,
    pub topic: String,
    pub subtopic: String,
    pub question_type: String,
    pub age_group: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub correct: String,
    pub key_point: String,
}

/// Exam-set variant: explanation is a free-form solution string and the
/// question carries its exam type. Difficulty is derived from the question's
/// position in the set, not from the model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub difficulty: u8,
    pub topic: String,
    pub subtopic: String,
    pub exam_type: String,
    pub question_type: String,
    pub age_group: String,
}
