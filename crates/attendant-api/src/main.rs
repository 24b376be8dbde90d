use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use attendant_api::{
    config::Config,
    routes::{chat, data, health},
    state::AppState,
};
use attendant_assistants::{AssistantsApi, OpenAIAssistantsClient};
use attendant_core::{Orchestrator, OrchestratorSettings};
use attendant_persist::PersistClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Attendant API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Initialize the remote platform client
    let assistants_api: Arc<dyn AssistantsApi> =
        Arc::new(OpenAIAssistantsClient::new(config.openai_api_key.clone())?);

    // Initialize persistence client
    tracing::info!("Connecting to MongoDB");
    let persist = Arc::new(
        PersistClient::new(&config.mongodb_uri, &config.mongodb.database).await?,
    );
    tracing::info!("MongoDB connected");

    // Assemble the orchestrator
    let settings = OrchestratorSettings::from(&config.assistant);
    let orchestrator = Orchestrator::new(assistants_api, persist.clone(), settings);

    // Create application state
    let state = AppState::new(config.clone(), orchestrator, persist);

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/api/v1/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Chat
        .route("/message", post(chat::send_message))
        .route("/train", post(chat::train))
        .route("/chat", post(chat::chat))
        // Read side
        .route("/leads/:client_id", get(data::get_leads))
        .route("/tickets/:client_id", get(data::get_tickets))
        .route("/conversations/:client_id", get(data::get_conversations));

    Router::new()
        .nest("/api/v1", api_routes)
        // Generous timeout: a run can legitimately poll for a while
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(120)))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            for origin in &config.cors.origins {
                if let Ok(parsed_origin) = origin.parse::<axum::http::HeaderValue>() {
                    cors = cors.allow_origin(parsed_origin);
                }
            }
        }

        cors
    } else {
        CorsLayer::permissive()
    }
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
