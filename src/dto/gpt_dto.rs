use serde::{Deserialize, Serialize};
use validator::Validate;

/// Personalization context sent by the front-end with every generation
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub age: u32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[validate(required, length(min = 1))]
    pub topic: Option<String>,
    #[validate(required, range(min = 1, max = 10))]
    pub level: Option<u8>,
    #[validate(required)]
    pub user_context: Option<UserContext>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestionsPayload {
    #[validate(required, length(min = 1))]
    pub topic: Option<String>,
    #[validate(required, length(min = 1))]
    pub exam_type: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExplorePayload {
    #[validate(required, length(min = 1))]
    pub query: Option<String>,
    #[validate(required)]
    pub user_context: Option<UserContext>,
}
