use crate::models::question::{Question, TestQuestion};
use std::collections::HashSet;

/// Structural checks on a generated practice question. Returns false instead
/// of erroring so callers can filter freely.
pub fn validate_question(q: &Question) -> bool {
    structure_ok(&q.text, &q.options, q.correct_answer)
        && !q.explanation.correct.trim().is_empty()
        && !q.explanation.key_point.trim().is_empty()
        && q.explanation.correct.len() >= 5
        && q.explanation.key_point.len() >= 5
}

/// Exam-set variant: same structural rules, plain-string explanation.
pub fn validate_test_question(q: &TestQuestion) -> bool {
    structure_ok(&q.text, &q.options, q.correct_answer)
        && !q.explanation.trim().is_empty()
        && q.explanation.len() >= 5
}

fn structure_ok(text: &str, options: &[String], correct_answer: usize) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if options.len() != 4 {
        return false;
    }
    if options.iter().any(|opt| opt.trim().is_empty()) {
        return false;
    }
    if correct_answer > 3 {
        return false;
    }
    if text.len() < 10 {
        return false;
    }
    let unique: HashSet<&str> = options.iter().map(|s| s.as_str()).collect();
    unique.len() == options.len()
}
