use crate::error::NotificationError;
use crate::models::{ClaimFields, FinderDetails, FoundItem, LostItem};
use crate::services::email::Mailer;
use crate::utils::is_valid_email;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Template {
    /// To a lost item's owner, when someone marks it found.
    ItemFound,
    /// To a claimer, confirming their claim was filed.
    ItemClaimed,
    /// To the finder of a found item, when someone claims it.
    FinderNotified,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub template: Template,
    pub to: String,
    pub subject: String,
    pub body: String,
}

fn or_unspecified(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not specified"
    } else {
        value
    }
}

fn claim_lines(claim: &ClaimFields) -> String {
    let mut lines = format!(
        "Claimer's name: {}\nClaimer's email: {}\nClaim description: {}\nLost location: {}\nLost date: {}",
        claim.claimer_name.as_deref().unwrap_or_default(),
        claim.claimer_email.as_deref().unwrap_or_default(),
        claim.claim_description.as_deref().unwrap_or_default(),
        claim.claim_location.as_deref().unwrap_or_default(),
        claim.claim_date.as_deref().unwrap_or_default(),
    );
    if let Some(notes) = claim.claim_notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push_str(&format!("\nAdditional proof: {notes}"));
    }
    lines
}

impl Notification {
    pub fn item_found(lost: &LostItem, finder: &FinderDetails) -> Self {
        let mut body = format!(
            "Great news! Your item has been found.\n\n\
             Item: {}\nCategory: {}\nDescription: {}\nLast seen: {}\n\n\
             Finder's name: {}\nContact email: {}\nPickup location: {}\nPreferred time: {}",
            lost.item_name,
            lost.category.label(),
            lost.description,
            lost.location,
            finder.name,
            finder.contact,
            finder.location,
            or_unspecified(&finder.pickup_time),
        );
        if !finder.notes.is_empty() {
            body.push_str(&format!("\nAdditional notes: {}", finder.notes));
        }
        body.push_str(
            "\n\nNext steps: contact the finder at the email above, arrange a pickup time \
             and bring identification when collecting your item.",
        );

        Self {
            template: Template::ItemFound,
            to: lost.contact.clone(),
            subject: format!("Great News! Your {} Has Been Found!", lost.item_name),
            body,
        }
    }

    pub fn item_claimed(found: &FoundItem) -> Self {
        let body = format!(
            "Your claim has been submitted.\n\n\
             Item: {}\nCategory: {}\nFound location: {}\n\n{}\n\n\
             Status: pending verification. The finder will review your claim and contact you.",
            found.item_name,
            found.category.label(),
            found.location,
            claim_lines(&found.claim),
        );

        Self {
            template: Template::ItemClaimed,
            to: found.claim.claimer_email.clone().unwrap_or_default(),
            subject: format!("Claim Submitted for {}", found.item_name),
            body,
        }
    }

    pub fn finder_notified(found: &FoundItem) -> Option<Self> {
        let to = found.finder.finder_contact.clone()?;
        let body = format!(
            "Someone wants to claim an item you found.\n\n\
             Item: {}\nCategory: {}\nFound location: {}\nDate found: {}\n\n{}\n\n\
             Please verify ownership before arranging pickup.",
            found.item_name,
            found.category.label(),
            found.location,
            found.date_found,
            claim_lines(&found.claim),
        );

        Some(Self {
            template: Template::FinderNotified,
            to,
            subject: format!("Someone Wants to Claim Your Found Item: {}", found.item_name),
            body,
        })
    }
}

/// A notification the worker could not deliver.
#[derive(Debug)]
pub struct DeliveryFailure {
    pub template: Template,
    pub to: String,
    pub error: NotificationError,
}

/// Handle to the detached notification worker. Dispatch never blocks and
/// never fails the caller; delivery problems are logged and, when a failure
/// sink is attached, forwarded there.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    pub fn spawn<M: Mailer>(
        mailer: M,
        failures: Option<mpsc::UnboundedSender<DeliveryFailure>>,
    ) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();

        tokio::spawn(async move {
            while let Some(n) = rx.recv().await {
                match mailer.send(&n.to, &n.subject, &n.body).await {
                    Ok(()) => {
                        tracing::debug!(template = ?n.template, to = %n.to, "Notification handed off");
                    }
                    Err(error) => {
                        tracing::warn!(
                            template = ?n.template,
                            to = %n.to,
                            "Failed to send notification: {error}"
                        );
                        if let Some(sink) = &failures {
                            let _ = sink.send(DeliveryFailure {
                                template: n.template,
                                to: n.to,
                                error,
                            });
                        }
                    }
                }
            }
            tracing::debug!("Notification queue closed");
        });

        Self { tx }
    }

    /// Queue a notification. Recipients that are not email-shaped are
    /// skipped. Returns whether the notification was queued.
    pub fn dispatch(&self, notification: Notification) -> bool {
        if !is_valid_email(&notification.to) {
            tracing::debug!(
                template = ?notification.template,
                "Recipient '{}' is not an email address, skipping notification",
                notification.to
            );
            return false;
        }
        match self.tx.send(notification) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    template = ?e.0.template,
                    "Notification worker is gone, dropping notification"
                );
                false
            }
        }
    }
}
