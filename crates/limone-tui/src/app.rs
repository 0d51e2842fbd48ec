//! Application state and input handling.
//!
//! [`App`] holds the active screen, the per-screen view state, and the
//! injected stores. Storage work runs in background tokio tasks that
//! report back through an [`AppEvent`] channel; the menu screen's load
//! task is tracked so it can be aborted when the user navigates away
//! mid-load.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use limone_menu::{FALLBACK_CATEGORIES, ensure_selection, filter_items, resolve_categories};
use limone_session::{Profile, SessionManager};
use limone_store::{Database, KvStore, MenuItem, MenuStore};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The three screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Menu,
    Profile,
}

/// Actions the UI loop should take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Continue the main loop.
    Continue,
    /// Exit the application.
    Quit,
}

/// Events sent from background storage tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// The menu load sequence finished.
    MenuLoaded {
        categories: Vec<String>,
        items: Vec<MenuItem>,
    },
    /// The menu load sequence failed.
    MenuLoadFailed(String),
    /// Onboarding input was accepted and the session started.
    OnboardingAccepted,
    /// Onboarding input was rejected with the given message.
    OnboardingRejected(String),
    /// The profile finished loading.
    ProfileLoaded(Profile),
    /// The profile load or save failed.
    ProfileFailed(String),
    /// The profile was saved.
    ProfileSaved,
    /// The session was cleared.
    LoggedOut,
    /// Logout failed.
    LogoutFailed(String),
}

// ---------------------------------------------------------------------------
// Per-screen view state
// ---------------------------------------------------------------------------

/// Which onboarding form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardField {
    Name,
    Email,
}

/// State of the onboarding form.
#[derive(Debug)]
pub struct OnboardingForm {
    pub name: String,
    pub email: String,
    pub focus: OnboardField,
    /// Validation or storage error to show inline.
    pub error: Option<String>,
    /// A submit is in flight.
    pub submitting: bool,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            focus: OnboardField::Name,
            error: None,
            submitting: false,
        }
    }
}

/// Load state of the menu screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Loading,
    Failed(String),
    Ready,
}

/// State of the menu screen.
#[derive(Debug)]
pub struct MenuView {
    pub state: MenuState,
    pub all_items: Vec<MenuItem>,
    pub categories: Vec<String>,
    pub selected_category: String,
    pub search: String,
}

impl Default for MenuView {
    fn default() -> Self {
        Self {
            state: MenuState::Loading,
            all_items: Vec::new(),
            // Shown until the live set arrives.
            categories: FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            selected_category: "Starters".to_string(),
            search: String::new(),
        }
    }
}

impl MenuView {
    /// The items currently visible given the category and search inputs.
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        filter_items(&self.all_items, &self.selected_category, &self.search)
    }

    /// A search is active (non-whitespace text entered).
    pub fn is_searching(&self) -> bool {
        !self.search.trim().is_empty()
    }

    fn select_offset(&mut self, offset: isize) {
        if self.categories.is_empty() {
            return;
        }
        let len = self.categories.len() as isize;
        let current = self
            .categories
            .iter()
            .position(|c| *c == self.selected_category)
            .unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        self.selected_category = self.categories[next].clone();
        // Selecting a category always clears the search.
        self.search.clear();
    }
}

/// The editable fields of the profile screen, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Email,
    Phone,
    AvatarUrl,
    OrderStatuses,
    PasswordChanges,
    SpecialOffers,
    Newsletter,
}

impl ProfileField {
    const ALL: [ProfileField; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::AvatarUrl,
        Self::OrderStatuses,
        Self::PasswordChanges,
        Self::SpecialOffers,
        Self::Newsletter,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Text input fields accept characters; the rest are toggles.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::Email | Self::Phone | Self::AvatarUrl
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::AvatarUrl => "Avatar URL",
            Self::OrderStatuses => "Order statuses",
            Self::PasswordChanges => "Password changes",
            Self::SpecialOffers => "Special offers",
            Self::Newsletter => "Newsletter",
        }
    }
}

/// State of the profile screen.
#[derive(Debug)]
pub struct ProfileView {
    pub profile: Profile,
    pub focus: ProfileField,
    /// Feedback line ("Changes saved", error text, ...).
    pub status: Option<String>,
    pub loading: bool,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            focus: ProfileField::FirstName,
            status: None,
            loading: true,
        }
    }
}

impl ProfileView {
    fn field_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        match field {
            ProfileField::FirstName => Some(&mut self.profile.first_name),
            ProfileField::LastName => Some(&mut self.profile.last_name),
            ProfileField::Email => Some(&mut self.profile.email),
            ProfileField::Phone => Some(&mut self.profile.phone),
            ProfileField::AvatarUrl => Some(&mut self.profile.avatar_url),
            _ => None,
        }
    }

    fn toggle(&mut self, field: ProfileField) {
        let prefs = &mut self.profile.notifications;
        match field {
            ProfileField::OrderStatuses => prefs.order_statuses = !prefs.order_statuses,
            ProfileField::PasswordChanges => prefs.password_changes = !prefs.password_changes,
            ProfileField::SpecialOffers => prefs.special_offers = !prefs.special_offers,
            ProfileField::Newsletter => prefs.newsletter = !prefs.newsletter,
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The top-level application state machine.
pub struct App {
    screen: Screen,
    pub onboarding: OnboardingForm,
    pub menu: MenuView,
    pub profile: ProfileView,
    db: Database,
    kv: KvStore,
    store: MenuStore,
    session: SessionManager,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// The menu screen's in-flight load task, if any.
    load_handle: Option<JoinHandle<()>>,
}

impl App {
    /// Create the application, starting on the menu screen when a session
    /// already exists, otherwise on onboarding.
    pub fn new(
        db: Database,
        kv: KvStore,
        store: MenuStore,
        session: SessionManager,
        logged_in: bool,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            screen: if logged_in {
                Screen::Menu
            } else {
                Screen::Onboarding
            },
            onboarding: OnboardingForm::default(),
            menu: MenuView::default(),
            profile: ProfileView::default(),
            db,
            kv,
            store,
            session,
            event_rx,
            event_tx,
            load_handle: None,
        };

        if logged_in {
            app.spawn_menu_load();
        }
        app
    }

    /// The currently active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Abort any in-flight background load. Called on shutdown and when
    /// leaving the menu screen, so a dead screen's task cannot keep
    /// mutating state.
    pub fn abort_background_tasks(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("menu load task aborted");
        }
    }

    // -- Key handling -------------------------------------------------------

    /// Handle a key event and return the action the UI should take.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match self.screen {
            Screen::Onboarding => self.handle_onboarding_key(key),
            Screen::Menu => self.handle_menu_key(key),
            Screen::Profile => self.handle_profile_key(key),
        }
    }

    fn handle_onboarding_key(&mut self, key: KeyEvent) -> AppAction {
        if key.code == KeyCode::Esc {
            return AppAction::Quit;
        }
        if self.onboarding.submitting {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => {
                self.onboarding.focus = match self.onboarding.focus {
                    OnboardField::Name => OnboardField::Email,
                    OnboardField::Email => OnboardField::Name,
                };
            }
            KeyCode::Enter => self.submit_onboarding(),
            KeyCode::Char(c) => {
                match self.onboarding.focus {
                    OnboardField::Name => self.onboarding.name.push(c),
                    OnboardField::Email => self.onboarding.email.push(c),
                }
                self.onboarding.error = None;
            }
            KeyCode::Backspace => {
                match self.onboarding.focus {
                    OnboardField::Name => self.onboarding.name.pop(),
                    OnboardField::Email => self.onboarding.email.pop(),
                };
                self.onboarding.error = None;
            }
            _ => {}
        }

        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        // Profile is reachable from any menu state, including mid-load;
        // go_to_profile aborts the in-flight load.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('p') {
                self.go_to_profile();
            }
            return AppAction::Continue;
        }
        if key.code == KeyCode::Esc {
            return AppAction::Quit;
        }

        match &self.menu.state {
            MenuState::Loading => {}
            MenuState::Failed(_) => {
                if key.code == KeyCode::Char('r') {
                    self.spawn_menu_load();
                }
            }
            MenuState::Ready => match key.code {
                KeyCode::Left => self.menu.select_offset(-1),
                KeyCode::Right => self.menu.select_offset(1),
                KeyCode::Backspace => {
                    self.menu.search.pop();
                }
                KeyCode::Char(c) => self.menu.search.push(c),
                _ => {}
            },
        }

        AppAction::Continue
    }

    fn handle_profile_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.save_profile(),
                KeyCode::Char('d') => self.discard_profile_changes(),
                KeyCode::Char('l') => self.logout(),
                _ => {}
            }
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Tab | KeyCode::Down => {
                self.profile.focus = self.profile.focus.next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.profile.focus = self.profile.focus.prev();
            }
            KeyCode::Char(' ') | KeyCode::Enter if !self.profile.focus.is_text() => {
                let field = self.profile.focus;
                self.profile.toggle(field);
                self.profile.status = None;
            }
            KeyCode::Char(c) => {
                let field = self.profile.focus;
                if let Some(text) = self.profile.field_mut(field) {
                    text.push(c);
                    self.profile.status = None;
                }
            }
            KeyCode::Backspace => {
                let field = self.profile.focus;
                if let Some(text) = self.profile.field_mut(field) {
                    text.pop();
                    self.profile.status = None;
                }
            }
            _ => {}
        }

        AppAction::Continue
    }

    // -- Screen transitions -------------------------------------------------

    fn go_to_profile(&mut self) {
        // The menu screen is going away; its load must not outlive it.
        self.abort_background_tasks();
        self.screen = Screen::Profile;
        self.profile = ProfileView::default();
        self.spawn_profile_load();
    }

    fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        if self.menu.state != MenuState::Ready {
            self.spawn_menu_load();
        }
    }

    // -- Background tasks ---------------------------------------------------

    /// Run the full menu initialization sequence in the background:
    /// migrate, seed, load categories, load items.
    fn spawn_menu_load(&mut self) {
        self.abort_background_tasks();
        self.menu.state = MenuState::Loading;

        let db = self.db.clone();
        let kv = self.kv.clone();
        let store = self.store.clone();
        let tx = self.event_tx.clone();

        self.load_handle = Some(tokio::spawn(async move {
            let result = async {
                db.run_migrations().await?;
                store.seed(&kv).await?;
                let categories = store.distinct_categories().await;
                let items = store.list_all().await?;
                Ok::<_, limone_store::StoreError>((categories, items))
            }
            .await;

            match result {
                Ok((categories, items)) => {
                    let categories = resolve_categories(categories);
                    let _ = tx.send(AppEvent::MenuLoaded { categories, items });
                }
                Err(err) => {
                    tracing::warn!(%err, "menu load failed");
                    let _ = tx.send(AppEvent::MenuLoadFailed(format!(
                        "failed to load menu data: {err}"
                    )));
                }
            }
        }));
    }

    fn submit_onboarding(&mut self) {
        self.onboarding.submitting = true;
        self.onboarding.error = None;

        let session = self.session.clone();
        let name = self.onboarding.name.clone();
        let email = self.onboarding.email.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match session.complete_onboarding(&name, &email).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::OnboardingAccepted);
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::OnboardingRejected(err.to_string()));
                }
            }
        });
    }

    fn spawn_profile_load(&mut self) {
        let session = self.session.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match session.load_profile().await {
                Ok(profile) => {
                    let _ = tx.send(AppEvent::ProfileLoaded(profile));
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::ProfileFailed(format!(
                        "failed to load profile: {err}"
                    )));
                }
            }
        });
    }

    fn save_profile(&mut self) {
        let session = self.session.clone();
        let profile = self.profile.profile.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match session.save_profile(&profile).await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::ProfileSaved);
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::ProfileFailed(format!(
                        "failed to save changes: {err}"
                    )));
                }
            }
        });
    }

    fn discard_profile_changes(&mut self) {
        self.profile.loading = true;
        self.profile.status = None;
        self.spawn_profile_load();
    }

    fn logout(&mut self) {
        let session = self.session.clone();
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match session.logout().await {
                Ok(()) => {
                    let _ = tx.send(AppEvent::LoggedOut);
                }
                Err(err) => {
                    let _ = tx.send(AppEvent::LogoutFailed(format!("failed to log out: {err}")));
                }
            }
        });
    }

    // -- Event polling ------------------------------------------------------

    /// Drain the background event channel and update state accordingly.
    ///
    /// Called on every iteration of the main UI loop.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::MenuLoaded { categories, items } => {
                    self.menu.selected_category =
                        ensure_selection(&categories, &self.menu.selected_category);
                    self.menu.categories = categories;
                    self.menu.all_items = items;
                    self.menu.state = MenuState::Ready;
                }
                AppEvent::MenuLoadFailed(msg) => {
                    self.menu.state = MenuState::Failed(msg);
                }
                AppEvent::OnboardingAccepted => {
                    self.onboarding.submitting = false;
                    self.screen = Screen::Menu;
                    self.menu = MenuView::default();
                    self.spawn_menu_load();
                }
                AppEvent::OnboardingRejected(msg) => {
                    self.onboarding.submitting = false;
                    self.onboarding.error = Some(msg);
                }
                AppEvent::ProfileLoaded(profile) => {
                    self.profile.profile = profile;
                    self.profile.loading = false;
                }
                AppEvent::ProfileFailed(msg) => {
                    self.profile.loading = false;
                    self.profile.status = Some(msg);
                }
                AppEvent::ProfileSaved => {
                    self.profile.status = Some("Changes saved".to_string());
                }
                AppEvent::LoggedOut => {
                    self.abort_background_tasks();
                    self.screen = Screen::Onboarding;
                    self.onboarding = OnboardingForm::default();
                    self.menu = MenuView::default();
                    self.profile = ProfileView::default();
                }
                AppEvent::LogoutFailed(msg) => {
                    self.profile.status = Some(msg);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::time::Duration;

    fn make_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(make_key(KeyCode::Char(c)));
        }
    }

    async fn make_app(logged_in: bool) -> App {
        let db = Database::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        let kv = KvStore::new(db.clone());
        let store = MenuStore::new(db.clone());
        let session = SessionManager::new(kv.clone());
        App::new(db, kv, store, session, logged_in)
    }

    /// Poll events until `done` returns true or a generous deadline passes.
    async fn wait_for(app: &mut App, mut done: impl FnMut(&App) -> bool) {
        for _ in 0..500 {
            app.poll_events();
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn starts_on_onboarding_when_logged_out() {
        let app = make_app(false).await;
        assert_eq!(app.screen(), Screen::Onboarding);
    }

    #[tokio::test]
    async fn starts_on_menu_and_loads_when_logged_in() {
        let mut app = make_app(true).await;
        assert_eq!(app.screen(), Screen::Menu);

        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;
        assert_eq!(app.menu.all_items.len(), 5);
        // Live categories replaced the fallback list (sample data has no Drinks).
        assert_eq!(app.menu.categories, vec!["Desserts", "Mains", "Starters"]);
        // "Starters" survived the switch to live categories.
        assert_eq!(app.menu.selected_category, "Starters");
    }

    #[tokio::test]
    async fn onboarding_submit_moves_to_menu() {
        let mut app = make_app(false).await;

        type_str(&mut app, "Ada Lovelace");
        app.handle_key(make_key(KeyCode::Tab));
        type_str(&mut app, "ada@example.com");
        app.handle_key(make_key(KeyCode::Enter));

        wait_for(&mut app, |a| a.screen() == Screen::Menu).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;
    }

    #[tokio::test]
    async fn onboarding_rejection_shows_error_and_stays() {
        let mut app = make_app(false).await;

        type_str(&mut app, "Ada");
        app.handle_key(make_key(KeyCode::Tab));
        type_str(&mut app, "not-an-email");
        app.handle_key(make_key(KeyCode::Enter));

        wait_for(&mut app, |a| a.onboarding.error.is_some()).await;
        assert_eq!(app.screen(), Screen::Onboarding);
        assert!(!app.onboarding.submitting);
    }

    #[tokio::test]
    async fn menu_typing_builds_search() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;

        type_str(&mut app, "greek");
        assert_eq!(app.menu.search, "greek");
        assert!(app.menu.is_searching());

        let visible = app.menu.visible_items();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Greek Salad");
    }

    #[tokio::test]
    async fn category_switch_clears_search() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;

        type_str(&mut app, "pasta");
        app.handle_key(make_key(KeyCode::Right));
        assert!(app.menu.search.is_empty());
        assert_ne!(app.menu.selected_category, "Starters");
    }

    #[tokio::test]
    async fn category_cycling_wraps() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;

        // Live categories: Desserts, Mains, Starters. Selected: Starters.
        app.handle_key(make_key(KeyCode::Right));
        assert_eq!(app.menu.selected_category, "Desserts");
        app.handle_key(make_key(KeyCode::Left));
        assert_eq!(app.menu.selected_category, "Starters");
    }

    #[tokio::test]
    async fn profile_roundtrip_via_keys() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;

        app.handle_key(ctrl('p'));
        assert_eq!(app.screen(), Screen::Profile);
        wait_for(&mut app, |a| !a.profile.loading).await;

        type_str(&mut app, "Ada");
        app.handle_key(make_key(KeyCode::Tab));
        type_str(&mut app, "Lovelace");
        app.handle_key(ctrl('s'));
        wait_for(&mut app, |a| a.profile.status.is_some()).await;
        assert_eq!(app.profile.status.as_deref(), Some("Changes saved"));

        // Back to menu and in again: the saved values load.
        app.handle_key(make_key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Menu);
        app.handle_key(ctrl('p'));
        wait_for(&mut app, |a| !a.profile.loading).await;
        assert_eq!(app.profile.profile.first_name, "Ada");
        assert_eq!(app.profile.profile.last_name, "Lovelace");
    }

    #[tokio::test]
    async fn profile_checkbox_toggles_with_space() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;
        app.handle_key(ctrl('p'));
        wait_for(&mut app, |a| !a.profile.loading).await;

        // Move focus to the first checkbox.
        for _ in 0..5 {
            app.handle_key(make_key(KeyCode::Tab));
        }
        assert_eq!(app.profile.focus, ProfileField::OrderStatuses);
        app.handle_key(make_key(KeyCode::Char(' ')));
        assert!(app.profile.profile.notifications.order_statuses);
    }

    #[tokio::test]
    async fn logout_returns_to_onboarding() {
        let mut app = make_app(true).await;
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;
        app.handle_key(ctrl('p'));
        wait_for(&mut app, |a| !a.profile.loading).await;

        app.handle_key(ctrl('l'));
        wait_for(&mut app, |a| a.screen() == Screen::Onboarding).await;
        assert!(app.onboarding.name.is_empty());
    }

    #[tokio::test]
    async fn leaving_menu_aborts_load_task() {
        let mut app = make_app(true).await;
        // Navigate away immediately, possibly mid-load.
        app.handle_key(ctrl('p'));
        assert!(app.load_handle.is_none());
        assert_eq!(app.screen(), Screen::Profile);
    }

    #[tokio::test]
    async fn returning_to_unloaded_menu_restarts_load() {
        let mut app = make_app(true).await;
        app.handle_key(ctrl('p'));
        wait_for(&mut app, |a| !a.profile.loading).await;

        app.handle_key(make_key(KeyCode::Esc));
        assert_eq!(app.screen(), Screen::Menu);
        wait_for(&mut app, |a| a.menu.state == MenuState::Ready).await;
        assert_eq!(app.menu.all_items.len(), 5);
    }

    #[tokio::test]
    async fn ctrl_c_quits_everywhere() {
        let mut app = make_app(false).await;
        assert_eq!(app.handle_key(ctrl('c')), AppAction::Quit);
    }

    #[tokio::test]
    async fn esc_quits_from_onboarding() {
        let mut app = make_app(false).await;
        assert_eq!(app.handle_key(make_key(KeyCode::Esc)), AppAction::Quit);
    }

    #[tokio::test]
    async fn profile_field_order_cycles() {
        let first = ProfileField::FirstName;
        let mut field = first;
        for _ in 0..ProfileField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, first);
        assert_eq!(first.prev(), ProfileField::Newsletter);
    }
}
