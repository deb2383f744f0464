mod config;
mod document;
mod errors;
mod llm_client;
mod models;
mod plan;
mod routes;
mod signature;
mod state;
mod suggestions;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageKind};
use crate::llm_client::LlmClient;
use crate::models::plan::PlanRecord;
use crate::plan::{FileStore, KeyValueStore, MemoryStore, PlanStore};
use crate::routes::build_router;
use crate::state::AppState;
use crate::suggestions::{DisabledSuggestionService, LlmSuggestionService, SuggestionService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Planner API v{}", env!("CARGO_PKG_VERSION"));

    // Durable storage + restore the last saved plan
    let storage: Box<dyn KeyValueStore> = match config.storage {
        StorageKind::File => {
            let files = FileStore::open(&config.data_dir)?;
            info!("Plan storage at {}", files.dir().display());
            Box::new(files)
        }
        StorageKind::Memory => {
            warn!("PLAN_STORAGE=memory; saved plans are lost on restart");
            Box::new(MemoryStore::new())
        }
    };
    let mut store = PlanStore::new(storage, PlanRecord::default());
    store.load();

    let suggestions: Arc<dyn SuggestionService> = match &config.anthropic_api_key {
        Some(key) => {
            let mut llm = LlmClient::new(key.clone())?;
            if let Some(url) = &config.anthropic_api_url {
                llm = llm.with_endpoint(url.clone());
            }
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmSuggestionService::new(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; suggestions are disabled");
            Arc::new(DisabledSuggestionService)
        }
    };

    let state = AppState::new(store, suggestions, config.save_settle);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
