use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Which collection a record lives in. Serialized as the record's `type`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            other => Err(format!("item type must be 'lost' or 'found', got '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LostStatus {
    #[default]
    Active,
    Found,
    Archived,
}

impl LostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LostStatus::Active => "active",
            LostStatus::Found => "found",
            LostStatus::Archived => "archived",
        }
    }

    /// Whether the generic status update may move a lost item from `self`
    /// to `next`. `found` is one-way; `archived` is terminal.
    pub fn can_become(self, next: LostStatus) -> bool {
        use LostStatus::*;
        match (self, next) {
            (a, b) if a == b => true,
            (Archived, _) => false,
            (_, Archived) => true,
            (Active, Found) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(LostStatus::Active),
            "found" => Ok(LostStatus::Found),
            "archived" => Ok(LostStatus::Archived),
            other => Err(format!(
                "status for a lost item must be one of: active, found, archived (got '{other}')"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FoundStatus {
    #[default]
    Active,
    Reunited,
    Claimed,
    Archived,
}

impl FoundStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FoundStatus::Active => "active",
            FoundStatus::Reunited => "reunited",
            FoundStatus::Claimed => "claimed",
            FoundStatus::Archived => "archived",
        }
    }

    /// `reunited` and `claimed` are only reachable through mark-found and
    /// claim, so the generic status update may only archive.
    pub fn can_become(self, next: FoundStatus) -> bool {
        match (self, next) {
            (a, b) if a == b => true,
            (FoundStatus::Archived, _) => false,
            (_, FoundStatus::Archived) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(FoundStatus::Active),
            "reunited" => Ok(FoundStatus::Reunited),
            "claimed" => Ok(FoundStatus::Claimed),
            "archived" => Ok(FoundStatus::Archived),
            other => Err(format!(
                "status for a found item must be one of: active, reunited, claimed, archived (got '{other}')"
            )),
        }
    }
}
