use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use hire_match::config::Settings;
use hire_match::core::MatchScorer;
use hire_match::models::ScoringWeights;
use hire_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use hire_match::services::{CacheManager, JwtVerifier, PostgresClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_tracing(&settings.logging.level, &settings.logging.format);

    info!("Starting hire-match service...");

    // Initialize cache manager (optional - app can work without it)
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(&settings.cache.redis_url, l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!("Cache manager initialized (L1: {} entries, TTL: {}s)", l1_cache_size, cache_ttl);
            Some(Arc::new(c))
        }
        Err(e) => {
            warn!("Failed to connect to Redis ({}), running without cache", e);
            None
        }
    };

    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let postgres = match PostgresClient::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        Some(db_min_conn),
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to connect to PostgreSQL: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let weights = ScoringWeights::from(&settings.scoring.weights);
    let scorer = MatchScorer::new(weights);

    info!("Scorer initialized with weights: {:?}", weights);

    let app_state = AppState {
        jobs: postgres.clone(),
        candidates: postgres,
        cache,
        scorer,
        matching: settings.matching.clone(),
    };

    if settings.auth.uses_default_secret() {
        warn!("auth.jwt_secret is unset or the shipped placeholder; set JWT_SECRET before exposing this service");
    }

    let verifier = web::Data::new(JwtVerifier::new(&settings.auth.jwt_secret, settings.auth.leeway_secs));

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(verifier.clone())
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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

/// `RUST_LOG` wins over the configured level when set
fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}
