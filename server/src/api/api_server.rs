//! HTTP server implementation for the phonebook API

use axum::{
    handler::HandlerWithoutStateExt,
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::api_handlers;
use phonebook_core::{
    core::{AppState, ConfiguredAppState},
    log_error, log_info, log_warn,
    storage::StorageImpl,
};

/// Creates the main application router with all routes and middleware
pub fn create_router<S: StorageImpl>(app_state: AppState<S>) -> Router {
    let static_dir = app_state.config.server.static_dir.clone();
    let app_state = Arc::new(app_state);

    // CORS configuration - the browser client may be served from another origin
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any);

    let router = Router::new()
        // Person routes
        .route(
            "/api/persons",
            get(api_handlers::list_persons::<S>).post(api_handlers::create_person::<S>),
        )
        .route(
            "/api/persons/{id}",
            get(api_handlers::get_person::<S>)
                .put(api_handlers::update_person::<S>)
                .delete(api_handlers::delete_person::<S>),
        )

        // System routes
        .route("/info", get(api_handlers::info::<S>))
        .route("/health", get(api_handlers::health_check::<S>))

        // Known path, wrong method: same answer as an unknown route
        .method_not_allowed_fallback(api_handlers::unknown_endpoint);

    // Built client assets, if configured; misses still get the JSON 404
    let router = match static_dir {
        Some(dir) => {
            log_info!("Serving static assets from {}", dir.display());
            let assets = ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(api_handlers::unknown_endpoint.into_service());
            router.fallback_service(assets)
        }
        None => router.fallback(api_handlers::unknown_endpoint),
    };

    router
        // Apply middleware to ALL routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

/// Internal function to start the server with the configured router
async fn serve_api_server_with_app(addr: SocketAddr, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log_info!("Server listening on http://{}", addr);
    log_info!("Persons API available at http://{}/api/persons", addr);
    log_info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the router for whichever backend the factory configured
pub fn create_app(configured_app_state: ConfiguredAppState) -> Router {
    // Match once on storage type to get concrete AppState
    match configured_app_state {
        ConfiguredAppState::Memory { app_state } => {
            log_info!("Starting server with MemoryStore backend");
            create_router(app_state)
        }
        ConfiguredAppState::Document { app_state } => {
            log_info!("Starting server with DocumentStore backend");
            create_router(app_state)
        }
    }
}

/// Start the HTTP server with the configured AppState
pub async fn start_api_server(configured_app_state: ConfiguredAppState) -> Result<(), Box<dyn std::error::Error>> {
    let http_addr = configured_app_state.http_addr();

    log_info!("Starting phonebook API server on {}", http_addr);

    let app = create_app(configured_app_state);
    serve_api_server_with_app(http_addr, app).await
}

/// Completes when `signal` fires; never completes if its handler failed to install
async fn wait_for_signal<F>(signal: F, name: &str)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        log_error!("Failed to install {} handler: {}", name, e);
        std::future::pending::<()>().await;
    }
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(tokio::signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = wait_for_signal(
        async {
            use tokio::signal::unix::{signal, SignalKind};
            signal(SignalKind::terminate())?.recv().await;
            Ok::<(), std::io::Error>(())
        },
        "SIGTERM",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log_warn!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log_warn!("Received terminate signal");
        },
    }
}
