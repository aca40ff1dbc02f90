use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::models::FoundItem;
use crate::services::claim::ClaimService;
use crate::services::notifier::Notifier;
use crate::store::ItemStore;
use crate::utils::email::{validate_email_pattern, validate_not_blank};
use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClaimRequest {
    /// Found item being claimed
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub item_id: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub claimer_name: String,
    /// Claimer email (local@domain.tld)
    #[serde(default)]
    #[validate(custom(function = "validate_email_pattern"))]
    pub claimer_email: String,
    /// How the claimer can prove ownership
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub claim_description: String,
    /// Where the claimer lost it
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub claim_location: String,
    /// When the claimer lost it
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub claim_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub message: String,
    pub found_item: FoundItem,
}

#[utoipa::path(
    post,
    path = "/api/item-claim",
    request_body = ClaimRequest,
    responses(
        (status = 201, description = "Claim filed, item marked claimed", body = ClaimResponse),
        (status = 400, description = "Validation error", body = AppError),
        (status = 404, description = "No found item with that ID", body = AppError),
    ),
    tag = "lifecycle"
)]
pub async fn file_claim(
    Extension(store): Extension<ItemStore>,
    Extension(notifier): Extension<Notifier>,
    AppJson(payload): AppJson<ClaimRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ClaimService::new(store, notifier);
    let found_item = service.file_claim(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ClaimResponse {
            message: "Claim submitted successfully".to_string(),
            found_item,
        }),
    ))
}
