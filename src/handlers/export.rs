use crate::error::{AppError, AppResult};
use crate::store::ItemStore;
use axum::{
    http::header,
    response::IntoResponse,
    Extension,
};

pub const EXPORT_FILENAME: &str = "lost_found_items.json";

#[utoipa::path(
    get,
    path = "/api/export",
    responses(
        (status = 200, description = "The backing workbook as a file download", content_type = "application/json"),
        (status = 500, description = "Store unreadable", body = AppError),
    ),
    tag = "items"
)]
pub async fn export_items(Extension(store): Extension<ItemStore>) -> AppResult<impl IntoResponse> {
    let bytes = store.read_raw().await?;
    tracing::info!(bytes = bytes.len(), "Exporting item store");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        bytes,
    ))
}
