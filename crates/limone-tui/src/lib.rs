//! # limone-tui
//!
//! Terminal UI for limone: an onboarding screen, the searchable menu, and
//! the profile editor, rendered with `ratatui` over `crossterm`.
//!
//! Screen flow: onboarding -> menu (successful submit, or an existing
//! session found at startup), menu -> profile (Ctrl+P), profile ->
//! onboarding (logout). Storage work runs in background tasks; the menu
//! load is aborted when its screen is left.

pub mod app;
pub mod error;
pub mod run;
pub mod ui;

// ── re-exports ───────────────────────────────────────────────────────

pub use app::{App, AppAction, Screen};
pub use error::{Result, TuiError};
pub use run::run_tui;
