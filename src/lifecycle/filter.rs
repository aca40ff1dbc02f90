use crate::models::{BoardItem, Category, ItemType};

/// Search box plus the category and type dropdowns. Empty fields do not
/// restrict; set fields are AND-combined.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub term: String,
    pub category: Option<Category>,
    pub item_type: Option<ItemType>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.category.is_none() && self.item_type.is_none()
    }

    /// Case-insensitive substring match over name, description and location.
    pub fn matches(&self, item: &BoardItem) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = term.is_empty()
            || [item.item_name(), item.description(), item.location()]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));

        matches_term
            && self.category.map_or(true, |c| item.category() == c)
            && self.item_type.map_or(true, |t| item.item_type() == t)
    }

    /// Matching items in their original order.
    pub fn apply(&self, items: &[BoardItem]) -> Vec<BoardItem> {
        if self.is_empty() {
            return items.to_vec();
        }
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::fixtures::{found, lost};
    use crate::models::{FoundStatus, LostStatus};
    use chrono::Utc;

    fn board() -> Vec<BoardItem> {
        let now = Utc::now();
        let mut laptop = lost("l1", LostStatus::Active, now);
        if let BoardItem::Lost(l) = &mut laptop {
            l.item_name = "Dell Laptop".into();
            l.description = "Silver, sticker on lid".into();
        }
        let mut novel = found("f1", FoundStatus::Active, now);
        if let BoardItem::Found(f) = &mut novel {
            f.item_name = "Novel".into();
            f.location = "Main LIBRARY steps".into();
        }
        vec![laptop, novel, lost("l2", LostStatus::Active, now)]
    }

    #[test]
    fn empty_filter_is_identity() {
        let items = board();
        assert_eq!(ItemFilter::default().apply(&items), items);
    }

    #[test]
    fn term_is_case_insensitive_across_fields() {
        let items = board();
        let by_name = ItemFilter {
            term: "laptop".into(),
            ..Default::default()
        };
        assert_eq!(by_name.apply(&items).len(), 1);

        let by_location = ItemFilter {
            term: "library".into(),
            ..Default::default()
        };
        // Both lost fixtures are at "Library", plus the novel's steps.
        assert_eq!(by_location.apply(&items).len(), 3);

        let by_description = ItemFilter {
            term: "STICKER".into(),
            ..Default::default()
        };
        assert_eq!(by_description.apply(&items)[0].id(), "l1");
    }

    #[test]
    fn term_whitespace_is_part_of_the_match() {
        let items = board();
        let blank = ItemFilter {
            term: "   ".into(),
            ..Default::default()
        };
        assert!(!blank.is_empty());
        assert!(blank.apply(&items).is_empty());

        // Only "Main LIBRARY steps" has a space before the word.
        let leading_space = ItemFilter {
            term: " library".into(),
            ..Default::default()
        };
        let out = leading_space.apply(&items);
        assert_eq!(out.iter().map(|i| i.id()).collect::<Vec<_>>(), vec!["f1"]);
    }

    #[test]
    fn unmatched_term_yields_nothing() {
        let filter = ItemFilter {
            term: "umbrella".into(),
            ..Default::default()
        };
        assert!(filter.apply(&board()).is_empty());
    }

    #[test]
    fn dropdowns_and_term_combine() {
        let items = board();
        let filter = ItemFilter {
            term: "library".into(),
            category: Some(Category::Electronics),
            item_type: Some(ItemType::Lost),
        };
        let out = filter.apply(&items);
        assert_eq!(out.iter().map(|i| i.id()).collect::<Vec<_>>(), vec!["l1", "l2"]);

        let found_only = ItemFilter {
            item_type: Some(ItemType::Found),
            ..Default::default()
        };
        assert_eq!(found_only.apply(&items).len(), 1);
    }
}
