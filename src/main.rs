use axum::{
    routing::{get, post},
    Router,
};
use quiz_backend::{
    config::{get_config, init_config},
    middleware::{cors::permissive_cors, rate_limit},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new()?;

    let limiter = rate_limit::RateLimiter::new(
        config.minute_limit,
        config.hour_limit,
        config.day_limit,
    );

    let gpt_api = Router::new()
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
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit::rate_limit_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(gpt_api)
        .with_state(app_state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
