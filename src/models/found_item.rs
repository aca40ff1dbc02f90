use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Category, FoundStatus, ItemType};

/// Finder columns of a found item. Filled on reunion records; a finder who
/// posts an item directly may leave them empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinderFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finder_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reunion_date: Option<String>,
}

/// Ownership claim filed against a found item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_notes: Option<String>,
    /// `pending` when filed; anything after that is set by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_status: Option<String>,
}

pub const CLAIM_PENDING: &str = "pending";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    pub id: String,
    pub status: FoundStatus,
    pub item_name: String,
    pub category: Category,
    pub location: String,
    #[serde(default)]
    pub date_found: String,
    #[serde(default)]
    pub description: String,
    pub contact: String,
    #[serde(default)]
    pub current_location: String,
    /// Set only on reunion records created by mark-found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_lost_item_id: Option<String>,
    #[serde(rename = "type", default = "found_type")]
    pub item_type: ItemType,
    pub date_posted: String,
    #[serde(flatten)]
    pub finder: FinderFields,
    #[serde(flatten)]
    pub claim: ClaimFields,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
}

fn found_type() -> ItemType {
    ItemType::Found
}

impl FoundItem {
    pub fn is_reunion_record(&self) -> bool {
        self.original_lost_item_id.is_some()
    }
}
