use chrono::{DateTime, Utc};

use super::prefs::{ClientPrefs, Student};
use crate::lifecycle::{classify, success_stories, Classified, ItemFilter};
use crate::models::{BoardItem, FoundItem, ItemSnapshot, LostItem};

/// Everything the board shows, held explicitly. Transitions take the old
/// state by value and return the new one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    pub college: Option<String>,
    pub student: Option<Student>,
    pub lost_items: Vec<LostItem>,
    pub found_items: Vec<FoundItem>,
    /// Main feed, newest first.
    pub active: Vec<BoardItem>,
    /// History feed, newest first.
    pub resolved: Vec<BoardItem>,
}

impl AppState {
    pub fn from_prefs(prefs: &ClientPrefs) -> Self {
        Self {
            college: prefs.selected_college.clone(),
            student: prefs.current_student.clone(),
            ..Default::default()
        }
    }

    pub fn prefs(&self) -> ClientPrefs {
        ClientPrefs {
            selected_college: self.college.clone(),
            current_student: self.student.clone(),
        }
    }

    pub fn needs_college(&self) -> bool {
        self.college.is_none()
    }

    /// Switching college drops the previous college's items.
    pub fn select_college(self, college: String, student: Student) -> Self {
        Self {
            college: Some(college),
            student: Some(student),
            ..Default::default()
        }
    }

    /// Replace the items with a fresh fetch and reclassify. Archived records
    /// are dropped even if the server sent them.
    pub fn refresh(self, snapshot: ItemSnapshot, now: DateTime<Utc>) -> Self {
        let snapshot = snapshot.without_archived();
        let Classified { active, resolved } = classify(&snapshot.board_items(), now);
        Self {
            lost_items: snapshot.lost_items,
            found_items: snapshot.found_items,
            active,
            resolved,
            ..self
        }
    }

    pub fn all_items(&self) -> Vec<BoardItem> {
        self.active.iter().chain(&self.resolved).cloned().collect()
    }

    /// The main feed narrowed by the search box and dropdowns.
    pub fn search(&self, filter: &ItemFilter) -> Vec<BoardItem> {
        filter.apply(&self.active)
    }

    pub fn success_stories(&self, now: DateTime<Utc>) -> Vec<FoundItem> {
        success_stories(&self.found_items, now)
    }
}
