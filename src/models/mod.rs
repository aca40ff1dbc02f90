pub mod category;
pub mod found_item;
pub mod lost_item;
pub mod status;

pub use category::Category;
pub use found_item::{ClaimFields, FinderFields, FoundItem, CLAIM_PENDING};
pub use lost_item::{FinderDetails, LostItem};
pub use status::{FoundStatus, ItemType, LostStatus};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Both collections, as held in the store and returned by the list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSnapshot {
    #[serde(default)]
    pub lost_items: Vec<LostItem>,
    #[serde(default)]
    pub found_items: Vec<FoundItem>,
}

impl ItemSnapshot {
    pub fn lost_mut(&mut self, id: &str) -> Option<&mut LostItem> {
        self.lost_items.iter_mut().find(|item| item.id == id)
    }

    pub fn found_mut(&mut self, id: &str) -> Option<&mut FoundItem> {
        self.found_items.iter_mut().find(|item| item.id == id)
    }

    /// Drop archived records; every list endpoint serves this view.
    pub fn without_archived(self) -> Self {
        Self {
            lost_items: self
                .lost_items
                .into_iter()
                .filter(|i| i.status != LostStatus::Archived)
                .collect(),
            found_items: self
                .found_items
                .into_iter()
                .filter(|i| i.status != FoundStatus::Archived)
                .collect(),
        }
    }

    pub fn for_college(self, college: &str) -> Self {
        Self {
            lost_items: self
                .lost_items
                .into_iter()
                .filter(|i| i.college == college)
                .collect(),
            found_items: self
                .found_items
                .into_iter()
                .filter(|i| i.college == college)
                .collect(),
        }
    }

    /// Merge both collections into one feed, lost items first.
    pub fn board_items(&self) -> Vec<BoardItem> {
        self.lost_items
            .iter()
            .cloned()
            .map(BoardItem::Lost)
            .chain(self.found_items.iter().cloned().map(BoardItem::Found))
            .collect()
    }
}

/// A lost or found record viewed through the fields the feed cares about.
///
/// Serialize-only: the variants share enough fields that untagged decoding
/// cannot tell them apart, so callers decode by collection instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoardItem {
    Lost(LostItem),
    Found(FoundItem),
}

impl BoardItem {
    pub fn id(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.id,
            BoardItem::Found(i) => &i.id,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            BoardItem::Lost(_) => ItemType::Lost,
            BoardItem::Found(_) => ItemType::Found,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            BoardItem::Lost(i) => i.status.as_str(),
            BoardItem::Found(i) => i.status.as_str(),
        }
    }

    pub fn original_lost_item_id(&self) -> Option<&str> {
        match self {
            BoardItem::Lost(_) => None,
            BoardItem::Found(i) => i.original_lost_item_id.as_deref(),
        }
    }

    pub fn item_name(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.item_name,
            BoardItem::Found(i) => &i.item_name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.description,
            BoardItem::Found(i) => &i.description,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.location,
            BoardItem::Found(i) => &i.location,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            BoardItem::Lost(i) => i.category,
            BoardItem::Found(i) => i.category,
        }
    }

    pub fn date_posted(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.date_posted,
            BoardItem::Found(i) => &i.date_posted,
        }
    }

    pub fn college(&self) -> &str {
        match self {
            BoardItem::Lost(i) => &i.college,
            BoardItem::Found(i) => &i.college,
        }
    }
}
