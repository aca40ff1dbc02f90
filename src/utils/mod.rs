pub mod email;
pub mod time;

pub use email::is_valid_email;
pub use time::{now_timestamp, parse_timestamp};

/// Optional cell value: empty strings are stored as absent, matching how
/// empty cells read back.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Fresh record identifier: 32 lowercase hex characters.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
