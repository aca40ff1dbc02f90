use crate::handlers;
use axum::{routing, Router};

pub fn create_routes() -> Router {
    Router::new()
        .route("/health", routing::get(handlers::health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router {
    Router::new()
        // Items
        .route("/items", routing::get(handlers::item::list_items))
        .route(
            "/items/college/{college}",
            routing::get(handlers::item::list_college_items),
        )
        .route("/items/lost", routing::post(handlers::item::create_lost_item))
        .route(
            "/items/found",
            routing::post(handlers::item::create_found_item),
        )
        .route(
            "/items/{type}/{id}",
            routing::put(handlers::item::update_item_status),
        )
        // Lifecycle
        .route(
            "/finder-details",
            routing::post(handlers::finder::mark_found),
        )
        .route(
            "/finder-details/{item_id}",
            routing::get(handlers::finder::get_finder_details),
        )
        .route("/item-claim", routing::post(handlers::claim::file_claim))
        // Export
        .route("/export", routing::get(handlers::export::export_items))
}
