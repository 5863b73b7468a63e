use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use printpress_server::config::Config;
use printpress_server::pinterest::PinterestClient;
use printpress_server::state::AppState;
use printpress_server::store::{MemoryPinStore, PgPinStore, PinStore};
use printpress_server::{db, handlers};

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "printpress_server=info,tower_http=info,sqlx=warn"
            .parse()
            .unwrap()
    });

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 PrintPress Server starting...");

    let config = Config::from_env().expect("Failed to load configuration");
    info!("📝 Configuration loaded");

    let store: Arc<dyn PinStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .expect("Failed to create database pool");

            db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");

            db::health_check(&pool)
                .await
                .expect("Database health check failed");
            info!("✅ Database health check passed");

            Arc::new(PgPinStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; pins are kept in memory and lost on restart");
            Arc::new(MemoryPinStore::new())
        }
    };

    let pinterest = PinterestClient::new(&config).expect("Failed to build Pinterest HTTP client");
    if !pinterest.is_configured() {
        tracing::warn!("PINTEREST_ACCESS_TOKEN not set; search will serve sample data");
    }

    // CORS: permissive in dev, locked to FRONTEND_URL in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        let origin: HeaderValue = config
            .frontend_url
            .parse()
            .expect("FRONTEND_URL is not a valid origin");
        info!("🔒 CORS: restricted to {}", config.frontend_url);
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods(AllowMethods::list([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ]))
            .allow_headers(AllowHeaders::list([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ]))
    };

    let addr = config.server_addr();

    let app_state = AppState {
        store: store.clone(),
        pins: Arc::new(pinterest),
    };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        // Health check + metrics
        .route("/api/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Pinterest search (ingests into the store)
        .route("/api/pinterest/search", get(handlers::pinterest::search_pins))
        // Stored images
        .route("/api/images", get(handlers::images::list_images))
        .route("/api/images/:id", get(handlers::images::get_image))
        // Middleware
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed to start");

    store.close().await;
    info!("👋 Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
