use axum::{extract::Extension, Router};
use campus_lost_found::{
    config, handlers, routes,
    services::{email::EmailService, notifier::Notifier},
};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        // Item routes
        handlers::item::list_items,
        handlers::item::list_college_items,
        handlers::item::create_lost_item,
        handlers::item::create_found_item,
        handlers::item::update_item_status,
        // Lifecycle routes
        handlers::finder::mark_found,
        handlers::finder::get_finder_details,
        handlers::claim::file_claim,
        // Export
        handlers::export::export_items,
    ),
    components(
        schemas(
            campus_lost_found::error::AppError,
            campus_lost_found::models::ItemSnapshot,
            campus_lost_found::models::LostItem,
            campus_lost_found::models::FoundItem,
            campus_lost_found::models::FinderDetails,
            campus_lost_found::models::Category,
            campus_lost_found::models::ItemType,
            campus_lost_found::models::LostStatus,
            campus_lost_found::models::FoundStatus,
            // Items
            handlers::item::CreateLostItemRequest,
            handlers::item::CreateFoundItemRequest,
            handlers::item::UpdateStatusRequest,
            handlers::item::FinderDetailsInput,
            // Lifecycle
            handlers::finder::MarkFoundRequest,
            handlers::finder::MarkFoundResponse,
            handlers::finder::FinderDetailsResponse,
            handlers::claim::ClaimRequest,
            handlers::claim::ClaimResponse,
        )
    ),
    tags(
        (name = "items", description = "Lost and found item reports"),
        (name = "lifecycle", description = "Mark-found and claim operations"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // LOG_FORMAT=json switches to structured output
    let json_logs = env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campus_lost_found=debug,tower_http=debug,axum=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer()))
        .init();

    // Validate configuration before doing anything else
    let static_dir = validate_config()?;

    tracing::info!(
        "Starting Campus Lost & Found API v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let store = config::store::get_store().await?;
    tracing::info!("Item store ready at {}", store.path().display());

    let email_service = EmailService::from_env();
    if email_service.is_configured() {
        tracing::info!("SMTP email service configured");
    } else {
        tracing::warn!("SMTP not configured, emails will be skipped");
    }
    let notifier = Notifier::spawn(email_service, None);

    let app = create_app(static_dir)
        .layer(Extension(store))
        .layer(Extension(notifier));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Validate configuration at startup (fail-fast). Returns the static
/// frontend directory, if one is configured.
fn validate_config() -> anyhow::Result<Option<PathBuf>> {
    if let Ok(port) = env::var("PORT") {
        port.parse::<u16>()
            .map_err(|e| anyhow::anyhow!("PORT '{}' is not a valid port: {}", port, e))?;
    }

    if let Ok(port) = env::var("SMTP_PORT") {
        port.parse::<u16>()
            .map_err(|e| anyhow::anyhow!("SMTP_PORT '{}' is not a valid port: {}", port, e))?;
    }

    let data_file = config::store::data_file();
    if data_file.is_dir() {
        return Err(anyhow::anyhow!(
            "DATA_FILE '{}' is a directory",
            data_file.display()
        ));
    }

    match env::var("STATIC_DIR").ok().filter(|s| !s.trim().is_empty()) {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            if !dir.is_dir() {
                return Err(anyhow::anyhow!(
                    "STATIC_DIR '{}' is not a directory",
                    dir.display()
                ));
            }
            Ok(Some(dir))
        }
        None => Ok(None),
    }
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app(static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = static_dir {
        tracing::info!("Serving static frontend from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
