//! Session lifecycle: onboarding, login state, profile load/save, logout.
//!
//! [`SessionManager`] owns no state of its own: everything derives from
//! the key-value store it wraps. Profile reads and writes fan out
//! concurrently; the keys are disjoint, so this is safe.

use tracing::{debug, info, instrument};

use limone_store::KvStore;

use crate::error::{SessionResult, ValidationError};
use crate::keys;
use crate::profile::{Profile, decode_bool, decode_string, encode_bool, split_name};

/// Derives login and profile state from the key-value store.
#[derive(Clone)]
pub struct SessionManager {
    kv: KvStore,
}

impl SessionManager {
    /// Create a new session manager backed by `kv`.
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// True iff the login flag reads the literal string `"true"`.
    #[instrument(skip(self))]
    pub async fn is_logged_in(&self) -> SessionResult<bool> {
        let value = self.kv.get(keys::LOGGED_IN).await?;
        Ok(decode_bool(value))
    }

    /// Validate and persist the onboarding form.
    ///
    /// On success writes the full name, the derived first/last name, the
    /// email, and the login flag. On a [`ValidationError`] nothing is
    /// written.
    #[instrument(skip(self, name, email))]
    pub async fn complete_onboarding(&self, name: &str, email: &str) -> SessionResult<()> {
        let name = name.trim();
        let email = email.trim();
        validate_onboarding(name, email)?;

        let (first_name, last_name) = split_name(name);
        tokio::try_join!(
            self.kv.set(keys::NAME, name),
            self.kv.set(keys::FIRST_NAME, &first_name),
            self.kv.set(keys::LAST_NAME, &last_name),
            self.kv.set(keys::EMAIL, email),
            self.kv.set(keys::LOGGED_IN, "true"),
        )?;

        info!("onboarding complete, session started");
        Ok(())
    }

    /// Load the full profile, reading all fields concurrently.
    ///
    /// Individually missing keys decode to their defaults rather than
    /// failing the load.
    #[instrument(skip(self))]
    pub async fn load_profile(&self) -> SessionResult<Profile> {
        let (
            first_name,
            last_name,
            email,
            phone,
            avatar_url,
            order_statuses,
            password_changes,
            special_offers,
            newsletter,
        ) = tokio::try_join!(
            self.kv.get(keys::FIRST_NAME),
            self.kv.get(keys::LAST_NAME),
            self.kv.get(keys::EMAIL),
            self.kv.get(keys::PHONE),
            self.kv.get(keys::AVATAR_URL),
            self.kv.get(keys::NOTIFY_ORDER_STATUSES),
            self.kv.get(keys::NOTIFY_PASSWORD_CHANGES),
            self.kv.get(keys::NOTIFY_SPECIAL_OFFERS),
            self.kv.get(keys::NOTIFY_NEWSLETTER),
        )?;

        let profile = Profile {
            first_name: decode_string(first_name),
            last_name: decode_string(last_name),
            email: decode_string(email),
            phone: decode_string(phone),
            avatar_url: decode_string(avatar_url),
            notifications: crate::profile::NotificationPrefs {
                order_statuses: decode_bool(order_statuses),
                password_changes: decode_bool(password_changes),
                special_offers: decode_bool(special_offers),
                newsletter: decode_bool(newsletter),
            },
        };

        debug!("profile loaded");
        Ok(profile)
    }

    /// Persist the profile, writing all fields concurrently.
    ///
    /// Each key-write is independent; a partial failure is not rolled back.
    /// Note that the store skips empty values, so clearing a text field
    /// does not erase a previously saved value.
    #[instrument(skip(self, profile))]
    pub async fn save_profile(&self, profile: &Profile) -> SessionResult<()> {
        let prefs = profile.notifications;
        let results = tokio::join!(
            self.kv.set(keys::FIRST_NAME, &profile.first_name),
            self.kv.set(keys::LAST_NAME, &profile.last_name),
            self.kv.set(keys::EMAIL, &profile.email),
            self.kv.set(keys::PHONE, &profile.phone),
            self.kv.set(keys::AVATAR_URL, &profile.avatar_url),
            self.kv
                .set(keys::NOTIFY_ORDER_STATUSES, encode_bool(prefs.order_statuses)),
            self.kv.set(
                keys::NOTIFY_PASSWORD_CHANGES,
                encode_bool(prefs.password_changes)
            ),
            self.kv
                .set(keys::NOTIFY_SPECIAL_OFFERS, encode_bool(prefs.special_offers)),
            self.kv
                .set(keys::NOTIFY_NEWSLETTER, encode_bool(prefs.newsletter)),
        );

        let (r0, r1, r2, r3, r4, r5, r6, r7, r8) = results;
        r0?;
        r1?;
        r2?;
        r3?;
        r4?;
        r5?;
        r6?;
        r7?;
        r8?;

        debug!("profile saved");
        Ok(())
    }

    /// End the session: clears the entire key-value store.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> SessionResult<()> {
        self.kv.clear_all().await?;
        info!("session cleared, logged out");
        Ok(())
    }
}

/// Check the onboarding form: name non-empty, email non-empty and
/// containing `'@'`.
fn validate_onboarding(name: &str, email: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !email.contains('@') {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(())
}

// ── tests ────────────────────────────────────────────────────────────
