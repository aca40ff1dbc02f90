use crate::{
    error::{AppError, AppResult},
    handlers::finder::MarkFoundRequest,
    models::{
        Category, FinderDetails, FinderFields, FoundItem, FoundStatus, ItemType, LostItem,
        LostStatus,
    },
    services::notifier::{Notification, Notifier},
    store::ItemStore,
    utils::{generate_id, non_empty, now_timestamp, time::today},
};

pub struct FinderService {
    store: ItemStore,
    notifier: Notifier,
}

fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Reunion record created when `lost` is marked found by `finder`.
fn reunion_record(lost: &LostItem, finder: &FinderDetails) -> FoundItem {
    FoundItem {
        id: generate_id(),
        status: FoundStatus::Reunited,
        item_name: lost.item_name.clone(),
        category: lost.category,
        location: lost.location.clone(),
        date_found: today(),
        description: format!(
            "This item was reunited via the portal. Original description: {}",
            lost.description
        ),
        contact: finder.contact.clone(),
        current_location: finder.location.clone(),
        original_lost_item_id: Some(lost.id.clone()),
        item_type: ItemType::Found,
        date_posted: now_timestamp(),
        finder: FinderFields {
            finder_name: non_empty(&finder.name),
            finder_contact: non_empty(&finder.contact),
            finder_location: non_empty(&finder.location),
            finder_notes: non_empty(&finder.notes),
            pickup_time: non_empty(&finder.pickup_time),
            reunion_date: non_empty(&finder.reunion_date),
        },
        claim: Default::default(),
        college: lost.college.clone(),
        student_name: lost.student_name.clone(),
        student_email: lost.student_email.clone(),
    }
}

impl FinderService {
    pub fn new(store: ItemStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Mark an active lost item found: attach the finder's details, stamp
    /// `dateFound`, and insert a reunited found record pointing back at it.
    /// The owner is emailed afterwards if their contact is an address.
    pub async fn mark_found(&self, req: MarkFoundRequest) -> AppResult<(LostItem, FoundItem)> {
        let finder = FinderDetails {
            name: req.finder_name,
            contact: req.finder_contact.trim().to_string(),
            location: req.finder_location,
            notes: req.finder_notes.unwrap_or_default(),
            pickup_time: req.pickup_time.unwrap_or_default(),
            reunion_date: now_timestamp(),
        };
        let item_id = req.item_id;

        let (lost, reunion) = self
            .store
            .update(|s| {
                let lost = s
                    .lost_mut(&item_id)
                    .filter(|item| item.status == LostStatus::Active)
                    .ok_or_else(|| AppError::NotFound("Lost item not found.".to_string()))?;

                lost.status = LostStatus::Found;
                lost.finder_details = Some(finder.clone());
                lost.date_found = Some(today());
                let lost = lost.clone();

                let reunion = reunion_record(&lost, &finder);
                s.found_items.push(reunion.clone());
                Ok((lost, reunion))
            })
            .await?;

        tracing::info!(
            lost_id = %lost.id,
            reunion_id = %reunion.id,
            "Lost item marked found"
        );

        self.notifier.dispatch(Notification::item_found(&lost, &finder));

        Ok((lost, reunion))
    }

    /// Finder details for an item: a found lost item's attached details
    /// first, otherwise a found item's finder columns with display defaults.
    /// Read-only, so it needs the store and nothing else.
    pub async fn finder_details(
        store: &ItemStore,
        item_id: &str,
    ) -> AppResult<(FinderDetails, String, Category)> {
        let snapshot = store.load().await?;

        let from_lost = snapshot
            .lost_items
            .iter()
            .find(|i| i.id == item_id && i.status == LostStatus::Found)
            .and_then(|i| {
                i.finder_details
                    .clone()
                    .map(|d| (d, i.item_name.clone(), i.category))
            });
        if let Some(found) = from_lost {
            return Ok(found);
        }

        let item = snapshot
            .found_items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| {
                AppError::NotFound("Item not found or no finder details available.".to_string())
            })?;

        let f = &item.finder;
        let details = FinderDetails {
            name: or_default(f.finder_name.as_deref(), "Unknown"),
            contact: or_default(f.finder_contact.as_deref(), "Not provided"),
            location: or_default(f.finder_location.as_deref(), "Not specified"),
            notes: f.finder_notes.clone().unwrap_or_default(),
            pickup_time: or_default(f.pickup_time.as_deref(), "Not specified"),
            reunion_date: f.reunion_date.clone().unwrap_or_default(),
        };
        Ok((details, item.item_name.clone(), item.category))
    }
}
