use crate::store::ItemStore;
use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
pub async fn health_check(Extension(store): Extension<ItemStore>) -> impl IntoResponse {
    let store_ok = store.load().await.is_ok();
    let status = if store_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "Campus Lost & Found API",
        "version": env!("CARGO_PKG_VERSION"),
        "store": store_ok,
    }))
}
