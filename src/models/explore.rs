use serde::{Deserialize, Serialize};

/// One unit of streamed explore output: accumulated prose text plus, once the
/// structured suffix of the model response is complete, related topics and
/// curiosity questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreChunk {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<RelatedTopic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<RelatedQuestion>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedTopic {
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub context: String,
}
