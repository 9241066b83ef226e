use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use campus_match::config::{Settings, StoreBackend};
use campus_match::core::Matcher;
use campus_match::routes::{self, AppState};
use campus_match::services::{AppwriteClient, AppwriteCollections, MemoryStore, PostgresClient, ProfileStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting Campus Match service...");

    let store = build_store(&settings).await.map_err(|e| {
        error!("Failed to initialize profile store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let matcher = Matcher::new(settings.scoring.scorer(), settings.matching.rules());

    info!("Matcher initialized with rules: {:?}", matcher.rules());

    // Build application state
    let app_state = AppState::new(store, matcher)
        .with_limits(settings.matching.default_limit, settings.matching.max_limit);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

/// Connect the configured profile store
async fn build_store(settings: &Settings) -> Result<Arc<dyn ProfileStore>, String> {
    match settings.store.backend {
        StoreBackend::Appwrite => {
            let collections = AppwriteCollections {
                user_profiles: settings.collection.user_profiles.clone(),
            };
            let timeout = Duration::from_secs(settings.appwrite.timeout_secs.unwrap_or(30));

            let client = AppwriteClient::new(
                settings.appwrite.endpoint.clone(),
                settings.appwrite.api_key.clone(),
                settings.appwrite.project_id.clone(),
                settings.appwrite.database_id.clone(),
                collections,
                timeout,
            )
            .map_err(|e| e.to_string())?;

            info!("Appwrite profile store initialized");
            Ok(Arc::new(client))
        }
        StoreBackend::Postgres => {
            let db = &settings.database;
            let client = PostgresClient::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| e.to_string())?;

            info!("PostgreSQL profile store initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            Ok(Arc::new(client))
        }
        StoreBackend::Memory => {
            let path = settings
                .store
                .seed_file
                .as_deref()
                .ok_or_else(|| "store.seed_file is required for the memory backend".to_string())?;
            let store = MemoryStore::from_json_file(path).map_err(|e| e.to_string())?;

            info!("In-memory profile store loaded from {}", path);
            Ok(Arc::new(store))
        }
    }
}
