//! Board-side item lifecycle: which items belong in the main feed, which are
//! resolved, what a viewer can do with each one, and which are old enough to
//! archive. Everything here is a pure function of the items and a clock
//! reading; nothing touches the store.

pub mod actions;
pub mod filter;

pub use actions::{available_action, success_stories, ContactChannel, ItemAction};
pub use filter::ItemFilter;

use chrono::{DateTime, Duration, Utc};
use std::cmp::Ordering;

use crate::models::{BoardItem, FoundStatus, ItemType, LostStatus};
use crate::utils::parse_timestamp;

/// Unclaimed found posts drop out of the main feed after this long.
pub const UNCLAIMED_FOUND_WINDOW_DAYS: i64 = 3;
/// Resolved items become archive candidates after this long.
pub const ARCHIVE_AFTER_DAYS: i64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Resolved,
}

/// The board split into the main feed and the history feed, each newest
/// first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classified {
    pub active: Vec<BoardItem>,
    pub resolved: Vec<BoardItem>,
}

/// First matching rule wins: a found lost item, a reunion record, then an
/// unclaimed found post older than the window. Everything else is active.
pub fn classify_item(item: &BoardItem, now: DateTime<Utc>) -> Lifecycle {
    if item.status() == LostStatus::Found.as_str() && item.item_type() == ItemType::Lost {
        return Lifecycle::Resolved;
    }
    if item.original_lost_item_id().is_some() {
        return Lifecycle::Resolved;
    }
    if item.item_type() == ItemType::Found
        && posted_before(item, now - Duration::days(UNCLAIMED_FOUND_WINDOW_DAYS))
    {
        return Lifecycle::Resolved;
    }
    Lifecycle::Active
}

pub fn classify(items: &[BoardItem], now: DateTime<Utc>) -> Classified {
    let (mut active, mut resolved): (Vec<_>, Vec<_>) = items
        .iter()
        .cloned()
        .partition(|item| classify_item(item, now) == Lifecycle::Active);

    sort_newest_first(&mut active);
    sort_newest_first(&mut resolved);
    Classified { active, resolved }
}

/// Stable sort on `datePosted`, newest first. Unreadable timestamps go last
/// in their original order.
pub fn sort_newest_first(items: &mut [BoardItem]) {
    items.sort_by(|a, b| {
        match (parse_timestamp(a.date_posted()), parse_timestamp(b.date_posted())) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Resolved items (found lost items and reunion records) posted more than
/// [`ARCHIVE_AFTER_DAYS`] ago. Already archived items are never candidates.
pub fn archive_candidates(items: &[BoardItem], now: DateTime<Utc>) -> Vec<BoardItem> {
    let cutoff = now - Duration::days(ARCHIVE_AFTER_DAYS);
    items
        .iter()
        .filter(|item| !is_archived(item))
        .filter(|item| {
            item.status() == LostStatus::Found.as_str() || item.original_lost_item_id().is_some()
        })
        .filter(|item| posted_before(item, cutoff))
        .cloned()
        .collect()
}

fn is_archived(item: &BoardItem) -> bool {
    match item {
        BoardItem::Lost(i) => i.status == LostStatus::Archived,
        BoardItem::Found(i) => i.status == FoundStatus::Archived,
    }
}

fn posted_before(item: &BoardItem, cutoff: DateTime<Utc>) -> bool {
    parse_timestamp(item.date_posted()).is_some_and(|posted| posted < cutoff)
}
