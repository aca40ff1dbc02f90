use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Books,
    Clothing,
    Jewelry,
    Bags,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Books,
        Category::Clothing,
        Category::Jewelry,
        Category::Bags,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Books => "books",
            Category::Clothing => "clothing",
            Category::Jewelry => "jewelry",
            Category::Bags => "bags",
            Category::Other => "other",
        }
    }

    /// Human-facing label used in notification bodies.
    pub fn label(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Books => "Books & Stationery",
            Category::Clothing => "Clothing & Accessories",
            Category::Jewelry => "Jewelry & Watches",
            Category::Bags => "Bags & Wallets",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                format!(
                    "category must be one of: {}",
                    Category::ALL.map(Category::as_str).join(", ")
                )
            })
    }
}
