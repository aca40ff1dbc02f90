use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::{BoardItem, Category, FoundItem, ItemSnapshot, ItemType, LostItem};
use crate::services::item::ItemService;
use crate::store::ItemStore;
use crate::utils::email::validate_not_blank;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateLostItemRequest {
    /// What was lost
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub item_name: String,
    pub category: Category,
    /// Where it was last seen
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,
    #[serde(default)]
    pub date_lost: String,
    #[serde(default)]
    pub time_lost: String,
    #[serde(default)]
    pub description: String,
    /// Owner contact, normally an email address
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    /// Must be `lost` when present
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    /// Defaults to the time the server receives the report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub college: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFoundItemRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub item_name: String,
    pub category: Category,
    /// Where it was found
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,
    #[serde(default)]
    pub date_found: String,
    #[serde(default)]
    pub description: String,
    /// Finder contact, normally an email address
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub contact: String,
    /// Where the item can be collected now
    #[serde(default)]
    pub current_location: String,
    /// Must be `found` when present
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub college: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
}

/// Finder details supplied alongside a `found` status update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FinderDetailsInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pickup_time: String,
    /// Defaults to now
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reunion_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStatusRequest {
    /// New status; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_details: Option<FinderDetailsInput>,
}

#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "All non-archived items", body = ItemSnapshot),
        (status = 500, description = "Store unreadable", body = AppError),
    ),
    tag = "items"
)]
pub async fn list_items(Extension(store): Extension<ItemStore>) -> AppResult<impl IntoResponse> {
    let service = ItemService::new(store);
    Ok(Json(service.list(None).await?))
}

#[utoipa::path(
    get,
    path = "/api/items/college/{college}",
    params(("college" = String, Path, description = "College identifier")),
    responses(
        (status = 200, description = "Non-archived items of one college", body = ItemSnapshot),
        (status = 500, description = "Store unreadable", body = AppError),
    ),
    tag = "items"
)]
pub async fn list_college_items(
    Extension(store): Extension<ItemStore>,
    Path(college): Path<String>,
) -> AppResult<impl IntoResponse> {
    let service = ItemService::new(store);
    Ok(Json(service.list(Some(&college)).await?))
}

#[utoipa::path(
    post,
    path = "/api/items/lost",
    request_body = CreateLostItemRequest,
    responses(
        (status = 201, description = "Lost item reported", body = LostItem),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "items"
)]
pub async fn create_lost_item(
    Extension(store): Extension<ItemStore>,
    AppJson(payload): AppJson<CreateLostItemRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ItemService::new(store);
    let item = service.create_lost(payload).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    post,
    path = "/api/items/found",
    request_body = CreateFoundItemRequest,
    responses(
        (status = 201, description = "Found item posted", body = FoundItem),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "items"
)]
pub async fn create_found_item(
    Extension(store): Extension<ItemStore>,
    AppJson(payload): AppJson<CreateFoundItemRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ItemService::new(store);
    let item = service.create_found(payload).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/items/{type}/{id}",
    params(
        ("type" = String, Path, description = "Collection: lost or found"),
        ("id" = String, Path, description = "Item ID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Item updated", body = serde_json::Value),
        (status = 400, description = "Missing status or illegal transition", body = AppError),
        (status = 404, description = "No such item in that collection", body = AppError),
    ),
    tag = "items"
)]
pub async fn update_item_status(
    Extension(store): Extension<ItemStore>,
    Path((item_type, id)): Path<(String, String)>,
    AppJson(payload): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<BoardItem>> {
    let item_type: ItemType = item_type.parse().map_err(AppError::Validation)?;
    let status = payload
        .status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Status is required for an update.".to_string()))?;

    let service = ItemService::new(store);
    let item = service
        .update_status(item_type, &id, &status, payload.finder_details)
        .await?;

    Ok(Json(item))
}
