use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Json, routing::get};
use combined_events::{
    Database,
    cache::MemoryCache,
    repository::{
        AllowAllReferences, CombinedEventStore, MemoryCombinedEventStore, PgCombinedEventStore,
        PgReferenceResolver, ReferenceResolver,
    },
    services::{CombinedEventService, RankingCache},
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;

use config::{Config, StoreBackend};
use features::{competitions, entries, event_types, scoring};

#[derive(OpenApi)]
#[openapi(
    paths(
        event_types::handlers::list_all,
        event_types::handlers::list_disciplines,
        scoring::handlers::preview,
        entries::handlers::create_entry,
        entries::handlers::get_entry,
        entries::handlers::delete_entry,
        entries::handlers::update_result,
        entries::handlers::recalculate,
        competitions::handlers::list_entries,
        competitions::handlers::get_ranking,
        competitions::handlers::get_statistics,
    ),
    components(
        schemas(
            combined_events::dto::entry::CreateEntryRequest,
            combined_events::dto::entry::UpdateResultRequest,
            combined_events::dto::scoring::PreviewPointsRequest,
            combined_events::dto::scoring::DisciplineInfo,
            combined_events::dto::ranking::RankingEntry,
            combined_events::dto::statistics::CompetitionStatistics,
            combined_events::models::CombinedEvent,
            combined_events::models::CombinedEventDetail,
            combined_events::models::DisciplineResult,
            combined_events::models::EntrySummary,
            combined_events::models::Discipline,
            combined_events::models::DisciplineKind,
            combined_events::models::EventType,
            combined_events::models::EventCategory,
            combined_events::models::Gender,
            combined_events::scoring::EventTypeInfo,
            combined_events::scoring::PointsPreview,
        )
    ),
    tags(
        (name = "event-types", description = "Combined event programmes"),
        (name = "scoring", description = "Stateless points computation"),
        (name = "entries", description = "Entry lifecycle and result submission"),
        (name = "competitions", description = "Per-competition listings, rankings and statistics"),
    )
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting combined events scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let (store, references) = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url, config.database_max_connections)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");

            tracing::info!("Running database migrations");
            db.run_migrations()
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Database migrations completed successfully");

            (
                Arc::new(PgCombinedEventStore::new(db.pool().clone()))
                    as Arc<dyn CombinedEventStore>,
                Arc::new(PgReferenceResolver::new(db.pool().clone()))
                    as Arc<dyn ReferenceResolver>,
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, entries are lost on shutdown");
            (
                Arc::new(MemoryCombinedEventStore::new()) as Arc<dyn CombinedEventStore>,
                Arc::new(AllowAllReferences) as Arc<dyn ReferenceResolver>,
            )
        }
    };

    let rankings = RankingCache::new(Arc::new(MemoryCache::new()), config.ranking_cache_ttl);
    let service = CombinedEventService::new(store, references, rankings)
        .with_plausibility_gate(config.enforce_plausibility);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::configure(service)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
