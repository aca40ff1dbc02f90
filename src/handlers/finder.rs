use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::{Category, FinderDetails, FoundItem, LostItem};
use crate::services::finder::FinderService;
use crate::services::notifier::Notifier;
use crate::store::ItemStore;
use crate::utils::email::{validate_email_pattern, validate_not_blank};
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarkFoundRequest {
    /// Lost item being marked found
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub item_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub finder_name: String,
    /// Finder email (local@domain.tld)
    #[serde(default)]
    #[validate(custom(function = "validate_email_pattern"))]
    pub finder_contact: String,
    /// Where the owner can pick the item up
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub finder_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkFoundResponse {
    pub message: String,
    pub lost_item: LostItem,
    /// The reunion record created for the lost item
    pub found_item: FoundItem,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinderDetailsResponse {
    pub success: bool,
    pub finder_details: FinderDetails,
    pub item_name: String,
    pub category: Category,
}

#[utoipa::path(
    post,
    path = "/api/finder-details",
    request_body = MarkFoundRequest,
    responses(
        (status = 201, description = "Lost item marked found and reunion record created", body = MarkFoundResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "No active lost item with that ID", body = AppError),
    ),
    tag = "lifecycle"
)]
pub async fn mark_found(
    Extension(store): Extension<ItemStore>,
    Extension(notifier): Extension<Notifier>,
    AppJson(payload): AppJson<MarkFoundRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = FinderService::new(store, notifier);
    let (lost_item, found_item) = service.mark_found(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MarkFoundResponse {
            message: "Finder details saved successfully".to_string(),
            lost_item,
            found_item,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/finder-details/{item_id}",
    params(("item_id" = String, Path, description = "Lost or found item ID")),
    responses(
        (status = 200, description = "Finder details", body = FinderDetailsResponse),
        (status = 404, description = "Item not found or no finder details", body = AppError),
    ),
    tag = "lifecycle"
)]
pub async fn get_finder_details(
    Extension(store): Extension<ItemStore>,
    Path(item_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (finder_details, item_name, category) =
        FinderService::finder_details(&store, &item_id).await?;

    Ok(Json(FinderDetailsResponse {
        success: true,
        finder_details,
        item_name,
        category,
    }))
}
