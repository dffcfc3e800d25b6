use crate::{
    dto::gpt_dto::{ExplorePayload, QuestionPayload, TestQuestionsPayload},
    error::Result,
    AppState,
};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::convert::Infallible;
use tracing::info;
use validator::Validate;

pub async fn generate_question(
    State(state): State<AppState>,
    Json(payload): Json<QuestionPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    info!("Request received for question");

    let topic = payload.topic.as_deref().unwrap_or_default();
    let level = payload.level.unwrap_or_default();
    let age = payload
        .user_context
        .as_ref()
        .map(|c| c.age)
        .unwrap_or_default();

    let question = state
        .quiz_service
        .playground_question(topic, level, age)
        .await?;
    Ok(Json(json!({ "data": question, "error": false })))
}

pub async fn get_test_questions(
    State(state): State<AppState>,
    Json(payload): Json<TestQuestionsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    info!("Request received for test questions");

    let topic = payload.topic.as_deref().unwrap_or_default();
    let exam_type = payload.exam_type.as_deref().unwrap_or_default();

    let questions = state.quiz_service.test_questions(topic, exam_type).await?;
    Ok(Json(json!({ "data": questions, "error": false })))
}

pub async fn get_explore_content(
    State(state): State<AppState>,
    Json(payload): Json<ExplorePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    info!("Request received for getExploreContent");

    let query = payload.query.as_deref().unwrap_or_default();
    let content = state.explore_service.explore(query).await;
    Ok(Json(json!({ "data": content, "error": false })))
}

/// Writes the explore result as newline-delimited JSON chunks over a chunked
/// transfer body.
pub async fn stream_explore_content(
    State(state): State<AppState>,
    Json(payload): Json<ExplorePayload>,
) -> Result<Response> {
    payload.validate()?;
    info!("Request received for streamExploreContent");

    let query = payload.query.as_deref().unwrap_or_default();
    let age = payload
        .user_context
        .as_ref()
        .map(|c| c.age)
        .unwrap_or_default();

    let chunks = state.explore_service.stream_explore(query, age).await?;

    let mut lines: Vec<std::result::Result<Bytes, Infallible>> = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let mut line = serde_json::to_vec(chunk)?;
        line.push(b'\n');
        lines.push(Ok(Bytes::from(line)));
    }

    let body = Body::from_stream(futures::stream::iter(lines));
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
