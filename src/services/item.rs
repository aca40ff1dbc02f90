use crate::{
    error::{AppError, AppResult},
    handlers::item::{CreateFoundItemRequest, CreateLostItemRequest, FinderDetailsInput},
    models::{
        BoardItem, FinderDetails, FoundItem, FoundStatus, ItemSnapshot, ItemType, LostItem,
        LostStatus,
    },
    store::ItemStore,
    utils::{generate_id, now_timestamp, parse_timestamp, time::today},
};

pub struct ItemService {
    store: ItemStore,
}

/// Use the client's `datePosted` when it sent a readable one, otherwise
/// stamp the current time.
fn posted_at(date_posted: Option<String>) -> AppResult<String> {
    match date_posted.filter(|d| !d.trim().is_empty()) {
        Some(d) if parse_timestamp(&d).is_some() => Ok(d),
        Some(d) => Err(AppError::Validation(format!(
            "datePosted '{}' is not a valid timestamp",
            d
        ))),
        None => Ok(now_timestamp()),
    }
}

fn expect_type(given: Option<ItemType>, expected: ItemType) -> AppResult<()> {
    match given {
        Some(t) if t != expected => Err(AppError::Validation(format!(
            "type must be '{}' for this endpoint",
            expected
        ))),
        _ => Ok(()),
    }
}

impl FinderDetailsInput {
    fn into_details(self) -> FinderDetails {
        FinderDetails {
            name: self.name,
            contact: self.contact,
            location: self.location,
            notes: self.notes,
            pickup_time: self.pickup_time,
            reunion_date: self
                .reunion_date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(now_timestamp),
        }
    }
}

impl ItemService {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }

    /// Every non-archived item, optionally narrowed to one college.
    pub async fn list(&self, college: Option<&str>) -> AppResult<ItemSnapshot> {
        let snapshot = self.store.load().await?.without_archived();
        Ok(match college {
            Some(c) => snapshot.for_college(c),
            None => snapshot,
        })
    }

    pub async fn create_lost(&self, req: CreateLostItemRequest) -> AppResult<LostItem> {
        expect_type(req.item_type, ItemType::Lost)?;

        let item = LostItem {
            id: generate_id(),
            status: LostStatus::Active,
            item_name: req.item_name,
            category: req.category,
            location: req.location,
            date_lost: req.date_lost,
            time_lost: req.time_lost,
            description: req.description,
            contact: req.contact,
            reward: req.reward.filter(|r| !r.is_empty()),
            item_type: ItemType::Lost,
            date_posted: posted_at(req.date_posted)?,
            date_found: None,
            finder_details: None,
            college: req.college,
            student_name: req.student_name,
            student_email: req.student_email,
        };

        let saved = item.clone();
        self.store
            .update(move |s| {
                s.lost_items.push(item);
                Ok(())
            })
            .await?;

        tracing::info!(id = %saved.id, college = %saved.college, "Lost item reported");
        Ok(saved)
    }

    pub async fn create_found(&self, req: CreateFoundItemRequest) -> AppResult<FoundItem> {
        expect_type(req.item_type, ItemType::Found)?;

        let item = FoundItem {
            id: generate_id(),
            status: FoundStatus::Active,
            item_name: req.item_name,
            category: req.category,
            location: req.location,
            date_found: req.date_found,
            description: req.description,
            contact: req.contact,
            current_location: req.current_location,
            original_lost_item_id: None,
            item_type: ItemType::Found,
            date_posted: posted_at(req.date_posted)?,
            finder: Default::default(),
            claim: Default::default(),
            college: req.college,
            student_name: req.student_name,
            student_email: req.student_email,
        };

        let saved = item.clone();
        self.store
            .update(move |s| {
                s.found_items.push(item);
                Ok(())
            })
            .await?;

        tracing::info!(id = %saved.id, college = %saved.college, "Found item posted");
        Ok(saved)
    }

    /// Generic status change. Marking a lost item found here attaches the
    /// optional finder details but creates no reunion record; that is
    /// mark-found's job.
    pub async fn update_status(
        &self,
        item_type: ItemType,
        id: &str,
        status: &str,
        finder_details: Option<FinderDetailsInput>,
    ) -> AppResult<BoardItem> {
        let updated = match item_type {
            ItemType::Lost => {
                let next: LostStatus = status.parse().map_err(AppError::Validation)?;
                self.store
                    .update(|s| {
                        let item = s
                            .lost_mut(id)
                            .ok_or_else(|| AppError::NotFound("Item not found.".to_string()))?;
                        apply_lost_status(item, next, finder_details)?;
                        Ok(BoardItem::Lost(item.clone()))
                    })
                    .await?
            }
            ItemType::Found => {
                if finder_details.is_some() {
                    return Err(AppError::Validation(
                        "finderDetails can only be supplied for lost items".to_string(),
                    ));
                }
                let next: FoundStatus = status.parse().map_err(AppError::Validation)?;
                self.store
                    .update(|s| {
                        let item = s
                            .found_mut(id)
                            .ok_or_else(|| AppError::NotFound("Item not found.".to_string()))?;
                        if !item.status.can_become(next) {
                            return Err(AppError::Validation(format!(
                                "A found item cannot move from '{}' to '{}' through a status update",
                                item.status, next
                            )));
                        }
                        item.status = next;
                        Ok(BoardItem::Found(item.clone()))
                    })
                    .await?
            }
        };

        tracing::info!(%item_type, id, status, "Item status updated");
        Ok(updated)
    }
}

fn apply_lost_status(
    item: &mut LostItem,
    next: LostStatus,
    finder_details: Option<FinderDetailsInput>,
) -> AppResult<()> {
    if !item.status.can_become(next) {
        return Err(AppError::Validation(format!(
            "A lost item cannot move from '{}' to '{}'",
            item.status, next
        )));
    }
    if item.status == LostStatus::Active && next == LostStatus::Found {
        if let Some(details) = finder_details {
            item.finder_details = Some(details.into_details());
        }
        item.date_found = Some(today());
    }
    item.status = next;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn lost(status: LostStatus) -> LostItem {
        LostItem {
            id: "l1".into(),
            status,
            item_name: "Keys".into(),
            category: Category::Other,
            location: "Canteen".into(),
            date_lost: String::new(),
            time_lost: String::new(),
            description: String::new(),
            contact: "a@b.com".into(),
            reward: None,
            item_type: ItemType::Lost,
            date_posted: now_timestamp(),
            date_found: None,
            finder_details: None,
            college: "gitam-university".into(),
            student_name: String::new(),
            student_email: String::new(),
        }
    }

    #[test]
    fn found_transition_stamps_details_and_date() {
        let mut item = lost(LostStatus::Active);
        let input = FinderDetailsInput {
            name: "Ravi".into(),
            contact: "c@d.com".into(),
            ..Default::default()
        };
        apply_lost_status(&mut item, LostStatus::Found, Some(input)).unwrap();

        assert_eq!(item.status, LostStatus::Found);
        assert_eq!(item.date_found.as_deref(), Some(today().as_str()));
        let details = item.finder_details.unwrap();
        assert_eq!(details.name, "Ravi");
        assert!(parse_timestamp(&details.reunion_date).is_some());
    }

    #[test]
    fn archiving_a_found_item_keeps_finder_details() {
        let mut item = lost(LostStatus::Active);
        apply_lost_status(&mut item, LostStatus::Found, Some(Default::default())).unwrap();
        apply_lost_status(
            &mut item,
            LostStatus::Archived,
            Some(FinderDetailsInput {
                name: "Someone else".into(),
                ..Default::default()
            }),
        )
        .unwrap();

        assert_eq!(item.status, LostStatus::Archived);
        assert_eq!(item.finder_details.unwrap().name, "");
    }

    #[test]
    fn unfinding_is_rejected() {
        let mut item = lost(LostStatus::Found);
        let err = apply_lost_status(&mut item, LostStatus::Active, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(item.status, LostStatus::Found);
    }

    #[test]
    fn posted_at_rejects_garbage_and_defaults_to_now() {
        assert!(posted_at(Some("last tuesday".into())).is_err());
        assert!(parse_timestamp(&posted_at(None).unwrap()).is_some());
        assert_eq!(
            posted_at(Some("2024-05-01T10:00:00.000Z".into())).unwrap(),
            "2024-05-01T10:00:00.000Z"
        );
    }

    #[test]
    fn type_mismatch_is_rejected() {
        assert!(expect_type(Some(ItemType::Found), ItemType::Lost).is_err());
        assert!(expect_type(None, ItemType::Lost).is_ok());
    }
}
