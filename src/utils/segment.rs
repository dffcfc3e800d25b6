use crate::models::explore::{ExploreChunk, RelatedQuestion, RelatedTopic};
use serde::Deserialize;

/// Boundary between the prose part and the trailing single-line JSON object
/// in a hybrid explore response.
pub const SEPARATOR: &str = "---";

/// Wire shape of the structured suffix the model is asked to emit:
/// `{"topics":[{"name","type","detail"}],"questions":[{"text","type","detail"}]}`.
#[derive(Debug, Deserialize)]
pub struct RelatedContent {
    #[serde(default)]
    pub topics: Vec<TopicEntry>,
    #[serde(default)]
    pub questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionEntry {
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub detail: String,
}

#[derive(Debug)]
pub struct Segmented {
    pub text: String,
    pub related: Option<RelatedContent>,
}

/// Splits a raw model response on the first separator into prose and a
/// structured suffix. The suffix is accepted only once a complete JSON object
/// is present; an incomplete or malformed suffix yields `related: None`
/// rather than an error, so a caller feeding in partial content can simply
/// wait for more.
pub fn segment_response(raw: &str) -> Segmented {
    match raw.split_once(SEPARATOR) {
        None => Segmented {
            text: clean_text(raw),
            related: None,
        },
        Some((prose, suffix)) => Segmented {
            text: clean_text(prose),
            related: extract_related(suffix),
        },
    }
}

fn clean_text(text: &str) -> String {
    // Models occasionally wrap phrases in bare anchor tags.
    text.replace("<a>", "").replace("</a>", "").trim().to_string()
}

fn extract_related(suffix: &str) -> Option<RelatedContent> {
    let object = complete_object(suffix)?;
    serde_json::from_str(object).ok()
}

/// Returns the first complete JSON object in `s`, determined by brace depth
/// returning to zero outside of string literals. `None` means the object is
/// still truncated.
fn complete_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Deduplicates topics (by name) and questions (by text) across successive
/// structured payloads, mapping them into the outgoing chunk shape.
#[derive(Debug, Default)]
pub struct RelatedAccumulator {
    topics: Vec<RelatedTopic>,
    questions: Vec<RelatedQuestion>,
}

impl RelatedAccumulator {
    pub fn absorb(&mut self, content: RelatedContent) {
        for topic in content.topics {
            if !self.topics.iter().any(|t| t.topic == topic.name) {
                self.topics.push(RelatedTopic {
                    topic: topic.name,
                    kind: topic.kind,
                    reason: topic.detail,
                });
            }
        }
        for question in content.questions {
            if !self.questions.iter().any(|q| q.question == question.text) {
                self.questions.push(RelatedQuestion {
                    question: question.text,
                    kind: question.kind,
                    context: question.detail,
                });
            }
        }
    }

    pub fn into_chunk(self, text: String) -> ExploreChunk {
        ExploreChunk {
            text,
            topics: (!self.topics.is_empty()).then_some(self.topics),
            questions: (!self.questions.is_empty()).then_some(self.questions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_prose_and_empty_structure() {
        let raw = "para1\n\npara2\n---\n{\"topics\":[],\"questions\":[]}";
        let segmented = segment_response(raw);
        assert_eq!(segmented.text, "para1\n\npara2");
        let related = segmented.related.expect("structured part");
        assert!(related.topics.is_empty());
        assert!(related.questions.is_empty());
    }

    #[test]
    fn no_separator_means_no_structured_part() {
        let segmented = segment_response("just three plain paragraphs");
        assert_eq!(segmented.text, "just three plain paragraphs");
        assert!(segmented.related.is_none());
    }

    #[test]
    fn truncated_suffix_is_not_ready() {
        let segmented = segment_response("text\n---\n{\"topics\":[");
        assert_eq!(segmented.text, "text");
        assert!(segmented.related.is_none());

        // A brace inside a string literal does not complete the object.
        let segmented = segment_response("text\n---\n{\"topics\":[{\"name\":\"a}b\"");
        assert!(segmented.related.is_none());
    }

    #[test]
    fn complete_suffix_parses() {
        let raw = "What is gravity?\n---\n{\"topics\":[{\"name\":\"Mass\",\"type\":\"prerequisite\",\"detail\":\"Why\"}],\"questions\":[{\"text\":\"Q?\",\"type\":\"curiosity\",\"detail\":\"Context\"}]}";
        let segmented = segment_response(raw);
        let related = segmented.related.expect("structured part");
        assert_eq!(related.topics[0].name, "Mass");
        assert_eq!(related.questions[0].text, "Q?");
    }

    #[test]
    fn strips_anchor_artifacts_from_prose() {
        let segmented = segment_response("see <a>gravity</a> basics\n---\n{}");
        assert_eq!(segmented.text, "see gravity basics");
    }

    #[test]
    fn accumulator_deduplicates_by_name_and_text() {
        let first: RelatedContent = serde_json::from_str(
            "{\"topics\":[{\"name\":\"Mass\",\"type\":\"prerequisite\",\"detail\":\"a\"}],\"questions\":[{\"text\":\"Q1?\",\"type\":\"curiosity\",\"detail\":\"b\"}]}",
        )
        .unwrap();
        let second: RelatedContent = serde_json::from_str(
            "{\"topics\":[{\"name\":\"Mass\",\"type\":\"related\",\"detail\":\"dup\"},{\"name\":\"Force\",\"type\":\"related\",\"detail\":\"c\"}],\"questions\":[{\"text\":\"Q1?\",\"type\":\"curiosity\",\"detail\":\"dup\"}]}",
        )
        .unwrap();

        let mut acc = RelatedAccumulator::default();
        acc.absorb(first);
        acc.absorb(second);
        let chunk = acc.into_chunk("text".to_string());

        let topics = chunk.topics.unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].reason, "a");
        assert_eq!(topics[1].topic, "Force");
        assert_eq!(chunk.questions.unwrap().len(), 1);
    }
}
