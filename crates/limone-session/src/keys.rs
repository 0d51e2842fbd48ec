//! The fixed set of key-value store keys owned by the session layer.
//!
//! Keys are plain strings with no enforced namespacing; this module is the
//! single place they are spelled out.

pub const LOGGED_IN: &str = "logged_in";
pub const NAME: &str = "name";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const AVATAR_URL: &str = "avatar_url";

// Email notification preferences, one key per toggle.
pub const NOTIFY_ORDER_STATUSES: &str = "notify_order_statuses";
pub const NOTIFY_PASSWORD_CHANGES: &str = "notify_password_changes";
pub const NOTIFY_SPECIAL_OFFERS: &str = "notify_special_offers";
pub const NOTIFY_NEWSLETTER: &str = "notify_newsletter";
