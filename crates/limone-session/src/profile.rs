//! Typed profile state.
//!
//! Internal logic works on real booleans and structured records; the
//! `"true"`/`"false"` string encoding the key-value store uses exists only
//! at this crate's adapter edge ([`encode_bool`] / [`decode_bool`]).

use serde::{Deserialize, Serialize};

/// Email notification preferences, one independent toggle per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

/// A user profile as edited on the profile screen.
///
/// Every field defaults to empty/false when its key is missing from the
/// store, so a fresh install loads cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar_url: String,
    pub notifications: NotificationPrefs,
}

impl Profile {
    /// The single-letter avatar placeholder shown when no avatar URL is set.
    pub fn avatar_initial(&self) -> char {
        self.first_name.chars().next().unwrap_or('U')
    }
}

// ── adapter-edge encoding ────────────────────────────────────────────

/// Encode a boolean as the literal string the key-value store expects.
pub(crate) fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Decode a stored value: only the literal `"true"` is true; a missing key
/// or any other value is false.
pub(crate) fn decode_bool(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}

/// Decode a stored string, defaulting a missing key to empty.
pub(crate) fn decode_string(value: Option<String>) -> String {
    value.unwrap_or_default()
}

// ── name splitting ───────────────────────────────────────────────────

/// Split a full name at the first whitespace boundary.
///
/// Everything before the first whitespace is the first name; everything
/// after it (internal spaces included) is the last name. A name with no
/// whitespace yields an empty last name.
pub fn split_name(name: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.to_string()),
        None => (name.to_string(), String::new()),
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_two_parts() {
        assert_eq!(
            split_name("Ada Lovelace"),
            ("Ada".to_string(), "Lovelace".to_string())
        );
    }

    #[test]
    fn split_name_single_word() {
        assert_eq!(split_name("Plato"), ("Plato".to_string(), String::new()));
    }

    #[test]
    fn split_name_keeps_internal_spaces_in_last_name() {
        assert_eq!(
            split_name("Ada King Lovelace"),
            ("Ada".to_string(), "King Lovelace".to_string())
        );
    }

    #[test]
    fn split_name_trims_outer_whitespace() {
        assert_eq!(
            split_name("  Ada Lovelace  "),
            ("Ada".to_string(), "Lovelace".to_string())
        );
    }

    #[test]
    fn bool_encoding_round_trip() {
        assert_eq!(encode_bool(true), "true");
        assert_eq!(encode_bool(false), "false");
        assert!(decode_bool(Some("true".to_string())));
        assert!(!decode_bool(Some("false".to_string())));
        assert!(!decode_bool(Some("TRUE".to_string())));
        assert!(!decode_bool(None));
    }

    #[test]
    fn avatar_initial_defaults() {
        let mut profile = Profile::default();
        assert_eq!(profile.avatar_initial(), 'U');
        profile.first_name = "Ada".to_string();
        assert_eq!(profile.avatar_initial(), 'A');
    }
}
