use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, ItemType, LostStatus};

/// Who found a lost item and how to get it back. Attached to a lost item
/// when it is marked found.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinderDetails {
    pub name: String,
    pub contact: String,
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reunion_date: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LostItem {
    pub id: String,
    pub status: LostStatus,
    pub item_name: String,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub date_lost: String,
    #[serde(default)]
    pub time_lost: String,
    #[serde(default)]
    pub description: String,
    /// Free text; only email-shaped values receive notifications.
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    #[serde(rename = "type", default)]
    pub item_type: ItemType,
    pub date_posted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_found: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_details: Option<FinderDetails>,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
}
