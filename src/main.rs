use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use pawlink_algo::config::{Settings, StorageBackend};
use pawlink_algo::core::Ranker;
use pawlink_algo::models::UrgencyWeights;
use pawlink_algo::routes::{self, AppState};
use pawlink_algo::services::{
    ApplicationStore, DocumentClient, DocumentCollections, MemoryStore, PetStore, PostgresClient,
};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn config_error(message: String) -> io::Error {
    error!("{}", message);
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

/// Build the pet and application stores for the configured backend
async fn build_stores(
    settings: &Settings,
) -> io::Result<(Arc<dyn PetStore>, Arc<dyn ApplicationStore>)> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            let store = match &settings.storage.seed_path {
                Some(path) if path.exists() => MemoryStore::from_seed_file(path)
                    .map_err(|e| config_error(format!("Failed to load seed data: {}", e)))?,
                Some(path) => {
                    tracing::warn!("Seed file {} not found, starting with no pets", path.display());
                    MemoryStore::new()
                }
                None => MemoryStore::new(),
            };

            info!("Using in-memory storage");

            let store = Arc::new(store);
            let pets: Arc<dyn PetStore> = store.clone();
            let applications: Arc<dyn ApplicationStore> = store;
            Ok((pets, applications))
        }
        StorageBackend::Remote => {
            let documents = settings.documents.as_ref().ok_or_else(|| {
                config_error("documents settings are required for remote storage".to_string())
            })?;
            let database = settings.database.as_ref().ok_or_else(|| {
                config_error("database settings are required for remote storage".to_string())
            })?;

            let pets = DocumentClient::new(
                documents.endpoint.clone(),
                documents.api_key.clone(),
                documents.project_id.clone(),
                documents.database_id.clone(),
                DocumentCollections {
                    pets: settings.collection.pets.clone(),
                },
                documents.timeout_secs,
            )
            .map_err(|e| config_error(format!("Failed to build document store client: {}", e)))?;

            info!("Document store client initialized (collection: {})", settings.collection.pets);

            let db_max_conn = database.max_connections.unwrap_or(10);

            let postgres = PostgresClient::from_settings(
                &database.url,
                Some(db_max_conn),
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
            })?;

            info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

            let pets: Arc<dyn PetStore> = Arc::new(pets);
            let applications: Arc<dyn ApplicationStore> = Arc::new(postgres);
            Ok((pets, applications))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();

    match &settings {
        Ok(s) => init_logging(&s.logging.level, &s.logging.format),
        Err(_) => init_logging("info", "compact"),
    }

    info!("Starting Pawlink ranking service...");

    let settings =
        settings.map_err(|e| config_error(format!("Failed to load configuration: {}", e)))?;

    info!("Configuration loaded successfully");

    let (pets, applications) = build_stores(&settings).await?;

    let ranker = Ranker::new(UrgencyWeights::from(&settings.ranking.weights));

    info!("Ranker initialized with weights: {:?}", ranker.weights());

    let app_state = AppState {
        pets,
        applications,
        ranker,
        limits: settings.ranking.feed_limits(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(routes::handle_path_error))
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
