use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;

use crate::models::{BoardItem, FoundItem, FoundStatus, LostStatus};
use crate::utils::{is_valid_email, parse_timestamp};

/// Reunions stay on the success-stories board this long.
pub const SUCCESS_STORY_DAYS: i64 = 14;

/// The one action a card offers, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemAction {
    /// "I found this": opens mark-found for an unresolved lost item.
    MarkFound,
    /// Show the finder's details for a lost item that has been found.
    ContactFinder,
    /// "This belongs to me": opens a claim on a found item.
    Claim,
}

impl ItemAction {
    pub fn label(self) -> &'static str {
        match self {
            ItemAction::MarkFound => "I Found This!",
            ItemAction::ContactFinder => "Contact Finder",
            ItemAction::Claim => "This Belongs to Me!",
        }
    }
}

pub fn available_action(item: &BoardItem) -> Option<ItemAction> {
    match item {
        BoardItem::Lost(i) => match i.status {
            LostStatus::Active => Some(ItemAction::MarkFound),
            LostStatus::Found => Some(ItemAction::ContactFinder),
            LostStatus::Archived => None,
        },
        BoardItem::Found(i) => match i.status {
            FoundStatus::Claimed | FoundStatus::Archived => None,
            FoundStatus::Active | FoundStatus::Reunited => Some(ItemAction::Claim),
        },
    }
}

/// How a contact value can be used. Contacts are free text, so only
/// email-shaped ones get a mail link; anything else is shown as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactChannel {
    Email(String),
    DisplayOnly(String),
}

impl ContactChannel {
    pub fn for_contact(contact: &str) -> Self {
        let contact = contact.trim();
        if is_valid_email(contact) {
            ContactChannel::Email(contact.to_string())
        } else {
            ContactChannel::DisplayOnly(contact.to_string())
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, ContactChannel::Email(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContactChannel::Email(s) | ContactChannel::DisplayOnly(s) => s,
        }
    }
}

fn reunited_at(item: &FoundItem) -> Option<DateTime<Utc>> {
    item.finder
        .reunion_date
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| parse_timestamp(&item.date_posted))
}

/// Reunited found items, newest reunion first. Reunions older than
/// [`SUCCESS_STORY_DAYS`] drop off; records without a readable reunion date
/// are kept.
pub fn success_stories(found_items: &[FoundItem], now: DateTime<Utc>) -> Vec<FoundItem> {
    let cutoff = now - Duration::days(SUCCESS_STORY_DAYS);
    let mut stories: Vec<FoundItem> = found_items
        .iter()
        .filter(|item| item.status == FoundStatus::Reunited)
        .filter(|item| {
            match item.finder.reunion_date.as_deref().and_then(parse_timestamp) {
                Some(at) => at > cutoff,
                None => true,
            }
        })
        .cloned()
        .collect();

    stories.sort_by_key(|item| Reverse(reunited_at(item)));
    stories
}
