mod companies;
mod config;
mod db;
mod errors;
mod hierarchy;
mod layout;
mod letters;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::companies::{KeyValueStore, MemoryKeyValueStore, RedisKeyValueStore};
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::hierarchy::{
    BackendAuthClient, HierarchyService, HierarchyStore, MemoryHierarchyStore, PgHierarchyStore,
    SessionResolver, StaticSessionResolver,
};
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting Letterdesk v{}", env!("CARGO_PKG_VERSION"));

    // Company lists: Redis when configured
    let kv: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            let store = RedisKeyValueStore::connect(&client).await?;
            info!("Redis company store connected");
            Arc::new(store)
        }
        None => {
            warn!("REDIS_URL not set; saved companies are kept in memory");
            Arc::new(MemoryKeyValueStore::new())
        }
    };

    // Hierarchy documents: PostgreSQL when configured
    let hierarchy_store: Arc<dyn HierarchyStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgHierarchyStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; hierarchies are kept in memory");
            Arc::new(MemoryHierarchyStore::new())
        }
    };

    let sessions: Arc<dyn SessionResolver> = match &config.backend {
        Some(backend) => {
            info!("Auth backend: {}", backend.url);
            Arc::new(BackendAuthClient::new(&backend.url, backend.anon_key.clone())?)
        }
        None => {
            warn!("BACKEND_URL not set; every hierarchy request is anonymous");
            Arc::new(StaticSessionResolver::new())
        }
    };

    let state = AppState::new(kv, HierarchyService::new(hierarchy_store, sessions));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
