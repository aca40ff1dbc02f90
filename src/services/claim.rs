use crate::{
    error::{AppError, AppResult},
    handlers::claim::ClaimRequest,
    models::{ClaimFields, FoundItem, FoundStatus, CLAIM_PENDING},
    services::notifier::{Notification, Notifier},
    store::ItemStore,
    utils::non_empty,
};

pub struct ClaimService {
    store: ItemStore,
    notifier: Notifier,
}

impl ClaimService {
    pub fn new(store: ItemStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// File an ownership claim: the found item becomes `claimed` with a
    /// `pending` claim. Both the claimer and the finder are emailed.
    pub async fn file_claim(&self, req: ClaimRequest) -> AppResult<FoundItem> {
        let claim = ClaimFields {
            claimer_name: Some(req.claimer_name),
            claimer_email: Some(req.claimer_email.trim().to_string()),
            claim_description: Some(req.claim_description),
            claim_location: Some(req.claim_location),
            claim_date: Some(req.claim_date),
            claim_notes: req.claim_notes.as_deref().and_then(non_empty),
            claim_status: Some(CLAIM_PENDING.to_string()),
        };
        let item_id = req.item_id;

        let item = self
            .store
            .update(move |s| {
                let item = s
                    .found_mut(&item_id)
                    .ok_or_else(|| AppError::NotFound("Found item not found.".to_string()))?;
                if item.status == FoundStatus::Archived {
                    return Err(AppError::Validation(
                        "Archived items cannot be claimed".to_string(),
                    ));
                }
                item.status = FoundStatus::Claimed;
                item.claim = claim;
                Ok(item.clone())
            })
            .await?;

        tracing::info!(id = %item.id, "Claim filed on found item");

        self.notifier.dispatch(Notification::item_claimed(&item));
        if let Some(n) = Notification::finder_notified(&item) {
            self.notifier.dispatch(n);
        }

        Ok(item)
    }
}
