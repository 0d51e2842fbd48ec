//! # limone-session
//!
//! Typed session and profile state for limone.
//!
//! The underlying storage is a flat string key-value namespace
//! ([`limone_store::KvStore`]); this crate gives it a typed surface:
//! [`Profile`] with real booleans, a [`ValidationError`] for onboarding
//! input, and a [`SessionManager`] that derives login state, loads and
//! saves the profile with concurrent key fan-out, and clears everything on
//! logout. String encoding (`"true"`/`"false"`) happens only at this
//! crate's adapter edge.

pub mod error;
pub mod keys;
pub mod profile;
pub mod session;

// ── re-exports ───────────────────────────────────────────────────────

pub use error::{SessionError, SessionResult, ValidationError};
pub use profile::{NotificationPrefs, Profile, split_name};
pub use session::SessionManager;
