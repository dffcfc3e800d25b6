use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use quiz_backend::{
    error::{Error, Result},
    middleware::rate_limit,
    routes,
    services::llm::LanguageModel,
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

struct StubModel {
    response: String,
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _max_tokens: u32,
    ) -> Result<String> {
        Ok(self.response.clone())
    }
}

struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn generate(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _max_tokens: u32,
    ) -> Result<String> {
        Err(Error::Generation("upstream unavailable".to_string()))
    }
}

fn app(model: Arc<dyn LanguageModel>) -> Router {
    Router::new()
        .route("/api/gpt/question", post(routes::gpt::generate_question))
        .route(
            "/api/gpt/getTestQuestions",
            post(routes::gpt::get_test_questions),
        )
        .route(
            "/api/gpt/getExploreContent",
            post(routes::gpt::get_explore_content),
        )
        .route(
            "/api/gpt/streamExploreContent",
            post(routes::gpt::stream_explore_content),
        )
        .with_state(AppState::with_model(model))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn question_response() -> String {
    json!({
        "text": "Which organelle hosts the light reactions of photosynthesis in plant cells?",
        "options": ["Chloroplast", "Mitochondrion", "Ribosome", "Nucleus"],
        "correctAnswer": 0,
        "explanation": {
            "correct": "Light reactions happen in chloroplast thylakoids.",
            "key_point": "Chloroplasts capture light energy."
        },
        "difficulty": 3,
        "topic": "Photosynthesis",
        "subtopic": "Light reactions",
        "questionType": "conceptual",
        "ageGroup": "12"
    })
    .to_string()
}

#[tokio::test]
async fn question_endpoint_returns_valid_shuffled_question() {
    let app = app(Arc::new(StubModel {
        response: question_response(),
    }));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/question",
            json!({"topic": "Photosynthesis", "level": 3, "userContext": {"age": 12}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"], json!(false));

    let data = &body["data"];
    assert_eq!(data["options"].as_array().unwrap().len(), 4);
    assert_eq!(data["ageGroup"], "12");
    assert_eq!(data["topic"], "Photosynthesis");
    assert_eq!(data["difficulty"], 3);

    // The shuffle must keep the correct index pointing at the originally
    // correct option.
    let correct = data["correctAnswer"].as_u64().unwrap() as usize;
    assert_eq!(data["options"][correct], "Chloroplast");
}

#[tokio::test]
async fn question_endpoint_rejects_missing_fields() {
    let app = app(Arc::new(StubModel {
        response: question_response(),
    }));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/question",
            json!({"level": 3, "userContext": {"age": 12}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn question_endpoint_surfaces_generation_failure() {
    let app = app(Arc::new(FailingModel));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/question",
            json!({"topic": "Photosynthesis", "level": 3, "userContext": {"age": 12}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body["error"], "upstream unavailable");
}

#[tokio::test]
async fn test_questions_endpoint_filters_invalid_entries() {
    let valid = (0..6).map(|i| {
        json!({
            "text": format!("A sufficiently long exam question number {}?", i),
            "options": ["Alpha", "Beta", "Gamma", "Delta"],
            "correctAnswer": 2,
            "explanation": "Step-by-step solution for this problem.",
            "subtopic": "Kinematics"
        })
    });
    let invalid = (0..9).map(|_| {
        json!({
            "text": "short",
            "options": ["Alpha", "Alpha"],
            "correctAnswer": 0,
            "explanation": ""
        })
    });
    let questions: Vec<Value> = valid.chain(invalid).collect();

    let app = app(Arc::new(StubModel {
        response: json!({ "questions": questions }).to_string(),
    }));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/getTestQuestions",
            json!({"topic": "Physics", "examType": "SAT"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 6);
    assert_eq!(data[0]["examType"], "SAT");
    assert_eq!(data[0]["difficulty"], 1);
    assert_eq!(data[5]["difficulty"], 2);
}

#[tokio::test]
async fn explore_endpoint_substitutes_fallback_on_failure() {
    let app = app(Arc::new(FailingModel));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/getExploreContent",
            json!({"query": "black holes", "userContext": {"age": 14}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["data"],
        "bestie, the wifi must be acting up... let me try again"
    );
    assert_eq!(body["error"], json!(false));
}

#[tokio::test]
async fn rate_limited_request_answers_203_with_limit_body() {
    let limiter = rate_limit::RateLimiter::new(1, 250, 500);
    let app = Router::new()
        .route(
            "/api/gpt/getExploreContent",
            post(routes::gpt::get_explore_content),
        )
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ))
        .with_state(AppState::with_model(Arc::new(FailingModel)));

    let addr: SocketAddr = "10.0.0.7:55000".parse().unwrap();
    let payload = json!({"query": "black holes", "userContext": {"age": 14}});

    let mut first = post_json("/api/gpt/getExploreContent", payload.clone());
    first.extensions_mut().insert(ConnectInfo(addr));
    let resp = app.clone().oneshot(first).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let mut second = post_json("/api/gpt/getExploreContent", payload);
    second.extensions_mut().insert(ConnectInfo(addr));
    let resp = app.oneshot(second).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NON_AUTHORITATIVE_INFORMATION);
    let body = body_json(resp).await;
    assert_eq!(body["limitReached"], json!(true));
    assert_eq!(body["message"], "Too many requests, please try again later.");
}

#[tokio::test]
async fn stream_endpoint_emits_newline_delimited_chunks() {
    let response = "para1\n\npara2\n\npara3\n---\n{\"topics\":[{\"name\":\"Mass\",\"type\":\"prerequisite\",\"detail\":\"Why\"}],\"questions\":[{\"text\":\"Q?\",\"type\":\"curiosity\",\"detail\":\"Context\"}]}";
    let app = app(Arc::new(StubModel {
        response: response.to_string(),
    }));

    let resp = app
        .oneshot(post_json(
            "/api/gpt/streamExploreContent",
            json!({"query": "gravity", "userContext": {"age": 14}}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    let chunks: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0]["text"], "para1\n\npara2\n\npara3");
    assert!(chunks[0].get("topics").is_none());
    assert_eq!(chunks[1]["topics"][0]["topic"], "Mass");
    assert_eq!(chunks[1]["questions"][0]["question"], "Q?");
}
