//! Spreadsheet-style layout of the backing file: named sheets, each with a
//! fixed column list and rows of string cells.
//!
//! Reads are lenient the way a hand-edited spreadsheet needs: unknown
//! columns are ignored, missing columns read as empty strings, non-string
//! cells are stringified, and rows without an id are skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::models::{
    Category, ClaimFields, FinderDetails, FinderFields, FoundItem, FoundStatus, ItemSnapshot,
    ItemType, LostItem, LostStatus,
};

pub const LOST_SHEET: &str = "lostItems";
pub const FOUND_SHEET: &str = "foundItems";

pub const LOST_COLUMNS: &[&str] = &[
    "id",
    "status",
    "itemName",
    "category",
    "location",
    "dateLost",
    "timeLost",
    "description",
    "contact",
    "reward",
    "type",
    "datePosted",
    "dateFound",
    "finderDetails",
    "college",
    "studentName",
    "studentEmail",
];

pub const FOUND_COLUMNS: &[&str] = &[
    "id",
    "status",
    "itemName",
    "category",
    "location",
    "dateFound",
    "description",
    "contact",
    "currentLocation",
    "originalLostItemId",
    "type",
    "datePosted",
    "finderName",
    "finderContact",
    "finderLocation",
    "finderNotes",
    "pickupTime",
    "reunionDate",
    "claimerName",
    "claimerEmail",
    "claimDescription",
    "claimLocation",
    "claimDate",
    "claimNotes",
    "claimStatus",
    "college",
    "studentName",
    "studentEmail",
];

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

/// One decoded row, addressed by column name.
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> String {
        self.cells.get(column).cloned().unwrap_or_default()
    }

    /// Empty cells read as `None`.
    pub fn opt(&self, column: &str) -> Option<String> {
        self.cells
            .get(column)
            .filter(|v| !v.is_empty())
            .cloned()
    }
}

pub trait SheetRow: Sized {
    const SHEET: &'static str;
    const COLUMNS: &'static [&'static str];

    /// Cells in `COLUMNS` order.
    fn to_cells(&self) -> Vec<String>;

    fn from_row(row: &Row) -> Self;
}

impl Workbook {
    pub fn from_snapshot(snapshot: &ItemSnapshot) -> Self {
        Self {
            sheets: vec![
                Sheet::from_records(&snapshot.lost_items),
                Sheet::from_records(&snapshot.found_items),
            ],
        }
    }

    pub fn into_snapshot(self) -> ItemSnapshot {
        let mut snapshot = ItemSnapshot::default();
        for sheet in self.sheets {
            match sheet.name.as_str() {
                LOST_SHEET => snapshot.lost_items = sheet.records(),
                FOUND_SHEET => snapshot.found_items = sheet.records(),
                other => tracing::warn!("Ignoring unknown sheet '{}'", other),
            }
        }
        snapshot
    }
}

impl Sheet {
    pub fn from_records<R: SheetRow>(records: &[R]) -> Self {
        Self {
            name: R::SHEET.to_string(),
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records
                .iter()
                .map(|r| r.to_cells().into_iter().map(Value::String).collect())
                .collect(),
        }
    }

    pub fn records<R: SheetRow>(&self) -> Vec<R> {
        self.rows
            .iter()
            .map(|cells| Row {
                cells: self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| (col.clone(), cells.get(i).map(cell_text).unwrap_or_default()))
                    .collect(),
            })
            .filter(|row| !row.get("id").trim().is_empty())
            .map(|row| R::from_row(&row))
            .collect()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_or<T: FromStr + Default>(raw: &str, column: &str, id: &str) -> T {
    if raw.trim().is_empty() {
        return T::default();
    }
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!("Row {}: unreadable {} '{}', using default", id, column, raw);
        T::default()
    })
}

fn category_cell(raw: &str, id: &str) -> Category {
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!("Row {}: unknown category '{}', filing under other", id, raw);
        Category::Other
    })
}

fn opt_cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

impl SheetRow for LostItem {
    const SHEET: &'static str = LOST_SHEET;
    const COLUMNS: &'static [&'static str] = LOST_COLUMNS;

    fn to_cells(&self) -> Vec<String> {
        let finder_details = self
            .finder_details
            .as_ref()
            .and_then(|d| serde_json::to_string(d).ok())
            .unwrap_or_default();
        vec![
            self.id.clone(),
            self.status.as_str().to_string(),
            self.item_name.clone(),
            self.category.as_str().to_string(),
            self.location.clone(),
            self.date_lost.clone(),
            self.time_lost.clone(),
            self.description.clone(),
            self.contact.clone(),
            opt_cell(&self.reward),
            ItemType::Lost.as_str().to_string(),
            self.date_posted.clone(),
            opt_cell(&self.date_found),
            finder_details,
            self.college.clone(),
            self.student_name.clone(),
            self.student_email.clone(),
        ]
    }

    fn from_row(row: &Row) -> Self {
        let id = row.get("id");
        let finder_details = row.opt("finderDetails").and_then(|raw| {
            serde_json::from_str::<FinderDetails>(&raw)
                .map_err(|e| tracing::warn!("Row {}: unreadable finderDetails: {}", id, e))
                .ok()
        });
        Self {
            status: parse_or::<LostStatus>(&row.get("status"), "status", &id),
            item_name: row.get("itemName"),
            category: category_cell(&row.get("category"), &id),
            location: row.get("location"),
            date_lost: row.get("dateLost"),
            time_lost: row.get("timeLost"),
            description: row.get("description"),
            contact: row.get("contact"),
            reward: row.opt("reward"),
            item_type: ItemType::Lost,
            date_posted: row.get("datePosted"),
            date_found: row.opt("dateFound"),
            finder_details,
            college: row.get("college"),
            student_name: row.get("studentName"),
            student_email: row.get("studentEmail"),
            id,
        }
    }
}

impl SheetRow for FoundItem {
    const SHEET: &'static str = FOUND_SHEET;
    const COLUMNS: &'static [&'static str] = FOUND_COLUMNS;

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.status.as_str().to_string(),
            self.item_name.clone(),
            self.category.as_str().to_string(),
            self.location.clone(),
            self.date_found.clone(),
            self.description.clone(),
            self.contact.clone(),
            self.current_location.clone(),
            opt_cell(&self.original_lost_item_id),
            ItemType::Found.as_str().to_string(),
            self.date_posted.clone(),
            opt_cell(&self.finder.finder_name),
            opt_cell(&self.finder.finder_contact),
            opt_cell(&self.finder.finder_location),
            opt_cell(&self.finder.finder_notes),
            opt_cell(&self.finder.pickup_time),
            opt_cell(&self.finder.reunion_date),
            opt_cell(&self.claim.claimer_name),
            opt_cell(&self.claim.claimer_email),
            opt_cell(&self.claim.claim_description),
            opt_cell(&self.claim.claim_location),
            opt_cell(&self.claim.claim_date),
            opt_cell(&self.claim.claim_notes),
            opt_cell(&self.claim.claim_status),
            self.college.clone(),
            self.student_name.clone(),
            self.student_email.clone(),
        ]
    }

    fn from_row(row: &Row) -> Self {
        let id = row.get("id");
        Self {
            status: parse_or::<FoundStatus>(&row.get("status"), "status", &id),
            item_name: row.get("itemName"),
            category: category_cell(&row.get("category"), &id),
            location: row.get("location"),
            date_found: row.get("dateFound"),
            description: row.get("description"),
            contact: row.get("contact"),
            current_location: row.get("currentLocation"),
            original_lost_item_id: row.opt("originalLostItemId"),
            item_type: ItemType::Found,
            date_posted: row.get("datePosted"),
            finder: FinderFields {
                finder_name: row.opt("finderName"),
                finder_contact: row.opt("finderContact"),
                finder_location: row.opt("finderLocation"),
                finder_notes: row.opt("finderNotes"),
                pickup_time: row.opt("pickupTime"),
                reunion_date: row.opt("reunionDate"),
            },
            claim: ClaimFields {
                claimer_name: row.opt("claimerName"),
                claimer_email: row.opt("claimerEmail"),
                claim_description: row.opt("claimDescription"),
                claim_location: row.opt("claimLocation"),
                claim_date: row.opt("claimDate"),
                claim_notes: row.opt("claimNotes"),
                claim_status: row.opt("claimStatus"),
            },
            college: row.get("college"),
            student_name: row.get("studentName"),
            student_email: row.get("studentEmail"),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_lost() -> LostItem {
        LostItem {
            id: "l1".into(),
            status: LostStatus::Found,
            item_name: "Blue Backpack".into(),
            category: Category::Bags,
            location: "Library".into(),
            date_lost: "2024-05-01".into(),
            time_lost: "10:00".into(),
            description: "Has a keychain".into(),
            contact: "a@b.com".into(),
            reward: None,
            item_type: ItemType::Lost,
            date_posted: "2024-05-01T10:00:00.000Z".into(),
            date_found: Some("2024-05-02".into()),
            finder_details: Some(FinderDetails {
                name: "Ravi".into(),
                contact: "c@d.com".into(),
                location: "Front desk".into(),
                notes: String::new(),
                pickup_time: "5pm".into(),
                reunion_date: "2024-05-02T08:00:00.000Z".into(),
            }),
            college: "gitam-university".into(),
            student_name: "Asha".into(),
            student_email: "a@b.com".into(),
        }
    }

    #[test]
    fn lost_rows_keep_nested_finder_details() {
        let snapshot = ItemSnapshot {
            lost_items: vec![sample_lost()],
            found_items: vec![],
        };
        let restored = Workbook::from_snapshot(&snapshot).into_snapshot();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let wb: Workbook = serde_json::from_value(json!({
            "sheets": [{
                "name": "foundItems",
                "columns": ["id", "itemName", "category", "datePosted"],
                "rows": [["f1", "Umbrella", "other", "2024-05-01T00:00:00.000Z"]]
            }]
        }))
        .unwrap();
        let snapshot = wb.into_snapshot();
        let item = &snapshot.found_items[0];
        assert_eq!(item.status, FoundStatus::Active);
        assert_eq!(item.contact, "");
        assert_eq!(item.original_lost_item_id, None);
        assert_eq!(item.claim, ClaimFields::default());
        assert!(snapshot.lost_items.is_empty());
    }

    #[test]
    fn rows_without_id_are_skipped() {
        let wb: Workbook = serde_json::from_value(json!({
            "sheets": [{
                "name": "lostItems",
                "columns": ["id", "itemName"],
                "rows": [["", "ghost"], ["l2", "Keys"], []]
            }]
        }))
        .unwrap();
        let lost = wb.into_snapshot().lost_items;
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].item_name, "Keys");
    }

    #[test]
    fn hand_edited_cells_are_tolerated() {
        let wb: Workbook = serde_json::from_value(json!({
            "sheets": [{
                "name": "lostItems",
                "columns": ["id", "status", "category", "reward", "extra"],
                "rows": [["l3", "misplaced", "furniture", 500, "ignored"]]
            }]
        }))
        .unwrap();
        let item = &wb.into_snapshot().lost_items[0];
        assert_eq!(item.status, LostStatus::Active);
        assert_eq!(item.category, Category::Other);
        assert_eq!(item.reward.as_deref(), Some("500"));
    }

    #[test]
    fn writes_fixed_column_order() {
        let sheet = Sheet::from_records(&[sample_lost()]);
        assert_eq!(sheet.name, LOST_SHEET);
        assert_eq!(sheet.columns.len(), LOST_COLUMNS.len());
        assert_eq!(sheet.rows[0].len(), LOST_COLUMNS.len());
        assert_eq!(sheet.rows[0][10], Value::String("lost".into()));
    }
}
