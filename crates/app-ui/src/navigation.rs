//! Navigation system for Rahasia Dapur
//!
//! This module provides:
//! - Route definitions with deep linking support
//! - Separate stacks for the auth screens and the app screens
//! - Drawer, search overlay, settings and logout-confirmation state
//! - Transient notices shown after logout and registration
//! - Replace-style redirects when the session appears or disappears
//! - Recipe detail tabs

use app_core::media::youtube_video_id;
use app_state::SessionStatus;
use recipe_client::{Recipe, User};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

// =============================================================================
// Route Parameters
// =============================================================================

/// Parameters for a route
pub type RouteParams = HashMap<String, String>;

// =============================================================================
// Route Definitions
// =============================================================================

/// All possible routes in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Login screen
    Login,
    /// Registration screen
    Register,
    /// Recipe feed
    Home,
    /// Signed-in user's profile
    Profile,
    /// Recipe detail
    RecipeDetail {
        /// Recipe ID
        id: String,
    },
    /// Unknown path
    NotFound,
}

impl Default for Route {
    fn default() -> Self {
        Route::Login
    }
}

impl Route {
    /// Convert route to URL path
    pub fn to_path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::RecipeDetail { id } => format!("/recipe/{}", urlencoding::encode(id)),
            Route::NotFound => "/not-found".to_string(),
        }
    }

    /// Check if this route needs a session
    pub fn requires_auth(&self) -> bool {
        self.area() == RootArea::App
    }

    /// Root area this route lives in
    pub fn area(&self) -> RootArea {
        match self {
            Route::Login | Route::Register | Route::NotFound => RootArea::Auth,
            Route::Home | Route::Profile | Route::RecipeDetail { .. } => RootArea::App,
        }
    }

    /// Header title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Masuk",
            Route::Register => "Daftar",
            Route::Home => "Beranda",
            Route::Profile => "Profil",
            Route::RecipeDetail { .. } => "Detail Resep",
            Route::NotFound => "Halaman Tidak Ditemukan",
        }
    }
}

/// Top-level navigator a route belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootArea {
    /// Login and registration
    Auth,
    /// Drawer screens and recipe detail
    App,
}

impl RootArea {
    /// Area matching a session status
    pub fn for_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Authenticated => RootArea::App,
            SessionStatus::Unauthenticated => RootArea::Auth,
        }
    }

    /// Route a fresh stack for this area starts at
    pub fn root_route(&self) -> Route {
        match self {
            RootArea::Auth => Route::Login,
            RootArea::App => Route::Home,
        }
    }
}

// =============================================================================
// Drawer Screens
// =============================================================================

/// Screens listed in the side drawer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerScreen {
    /// Recipe feed
    Home,
    /// Profile
    Profile,
}

impl DrawerScreen {
    /// Root route for this screen
    pub fn root_route(&self) -> Route {
        match self {
            DrawerScreen::Home => Route::Home,
            DrawerScreen::Profile => Route::Profile,
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            DrawerScreen::Home => "home-outline",
            DrawerScreen::Profile => "person-outline",
        }
    }

    /// Drawer label
    pub fn label(&self) -> &'static str {
        match self {
            DrawerScreen::Home => "Beranda",
            DrawerScreen::Profile => "Profil",
        }
    }

    /// All drawer screens in order
    pub fn all() -> [DrawerScreen; 2] {
        [DrawerScreen::Home, DrawerScreen::Profile]
    }
}

/// User block at the top of the drawer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerHeader {
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
}

impl DrawerHeader {
    /// Build from the signed-in user, with placeholders for missing fields
    pub fn from_user(user: Option<&User>) -> Self {
        fn pick(value: Option<&str>, fallback: &str) -> String {
            value.filter(|v| !v.is_empty()).unwrap_or(fallback).to_string()
        }

        Self {
            name: pick(user.map(|u| u.name.as_str()), "Pengguna"),
            email: pick(user.map(|u| u.email.as_str()), "user@example.com"),
        }
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// Navigation stack for one root area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Bottom entry
    root: StackEntry,
    /// Entries pushed above the root (bottom to top)
    pushed: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self { root: StackEntry::new(root), pushed: Vec::new() }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.pushed.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.pushed.pop().is_some()
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        match self.pushed.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.pushed.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.pushed.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.pushed.len() + 1
    }

    /// Get all routes, bottom to top
    pub fn routes(&self) -> Vec<&Route> {
        std::iter::once(&self.root.route)
            .chain(self.pushed.iter().map(|e| &e.route))
            .collect()
    }

    /// Discard everything and start over at `route`
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.pushed.clear();
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Complete navigation state
///
/// The drawer and the search overlay are independent flags: either can be
/// open regardless of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Area currently shown
    area: RootArea,
    /// Login/register stack
    auth_stack: NavigationStack,
    /// Drawer screens and detail stack
    app_stack: NavigationStack,
    /// Side drawer visibility
    drawer_open: bool,
    /// Search overlay visibility
    search_visible: bool,
    /// Settings modal visibility
    settings_visible: bool,
    /// Logout confirmation visibility
    logout_confirm_visible: bool,
    /// Notice currently shown
    notice: Option<Notice>,
    /// When the current notice was shown
    #[serde(skip)]
    notice_shown_at: Option<Instant>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(SessionStatus::Unauthenticated)
    }
}

impl NavigationState {
    /// Start in the area matching the session status
    pub fn new(status: SessionStatus) -> Self {
        Self {
            area: RootArea::for_status(status),
            auth_stack: NavigationStack::new(RootArea::Auth.root_route()),
            app_stack: NavigationStack::new(RootArea::App.root_route()),
            drawer_open: false,
            search_visible: false,
            settings_visible: false,
            logout_confirm_visible: false,
            notice: None,
            notice_shown_at: None,
        }
    }

    /// Area currently shown
    pub fn area(&self) -> RootArea {
        self.area
    }

    /// Get the stack for the active area
    pub fn current_stack(&self) -> &NavigationStack {
        match self.area {
            RootArea::Auth => &self.auth_stack,
            RootArea::App => &self.app_stack,
        }
    }

    fn current_stack_mut(&mut self) -> &mut NavigationStack {
        match self.area {
            RootArea::Auth => &mut self.auth_stack,
            RootArea::App => &mut self.app_stack,
        }
    }

    /// Get the current route
    pub fn current_route(&self) -> &Route {
        self.current_stack().current()
    }

    /// Push a route onto the active stack
    ///
    /// Returns false, leaving the state unchanged, if the route belongs to
    /// the other area. `NotFound` is reachable from either area.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route != Route::NotFound && route.area() != self.area {
            tracing::debug!(?route, area = ?self.area, "navigation blocked");
            return false;
        }
        self.drawer_open = false;
        self.current_stack_mut().push(route);
        true
    }

    /// Open a deep link
    pub fn open_path(&mut self, router: &Router, path: &str) -> bool {
        self.navigate(router.match_path(path))
    }

    /// Jump to a drawer screen and close the drawer
    pub fn select_drawer_screen(&mut self, screen: DrawerScreen) -> bool {
        if self.area != RootArea::App {
            return false;
        }
        self.app_stack.reset(screen.root_route());
        self.drawer_open = false;
        true
    }

    /// Go back
    ///
    /// Dismisses the topmost visible layer: a modal dialog, then the search
    /// overlay, then the drawer, and only then pops the stack.
    pub fn go_back(&mut self) -> bool {
        if self.logout_confirm_visible {
            self.logout_confirm_visible = false;
            return true;
        }
        if self.settings_visible {
            self.settings_visible = false;
            return true;
        }
        if self.search_visible {
            self.search_visible = false;
            return true;
        }
        if self.drawer_open {
            self.drawer_open = false;
            return true;
        }
        self.current_stack_mut().pop()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.logout_confirm_visible
            || self.settings_visible
            || self.search_visible
            || self.drawer_open
            || self.current_stack().can_go_back()
    }

    /// Redirect after a login or logout
    ///
    /// The stack for the new area is reset to its root and the stack being
    /// left is discarded, so back navigation cannot return across the
    /// boundary. Overlays are closed; a visible notice is kept.
    pub fn on_session_change(&mut self, status: SessionStatus) {
        let area = RootArea::for_status(status);

        self.auth_stack.reset(RootArea::Auth.root_route());
        self.app_stack.reset(RootArea::App.root_route());
        self.area = area;

        self.drawer_open = false;
        self.search_visible = false;
        self.settings_visible = false;
        self.logout_confirm_visible = false;

        tracing::debug!(?area, "session changed, navigation reset");
    }

    // -------------------------------------------------------------------------
    // Drawer
    // -------------------------------------------------------------------------

    /// Flip drawer visibility
    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    /// Open the drawer
    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    /// Close the drawer
    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    /// Check if the drawer is open
    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    // -------------------------------------------------------------------------
    // Search overlay
    // -------------------------------------------------------------------------

    /// Show the search overlay
    pub fn open_search(&mut self) {
        self.search_visible = true;
    }

    /// Hide the search overlay
    pub fn close_search(&mut self) {
        self.search_visible = false;
    }

    /// Check if the search overlay is visible
    pub fn is_search_visible(&self) -> bool {
        self.search_visible
    }

    /// Pick a search result: hide the overlay and open the recipe
    pub fn open_search_result(&mut self, recipe_id: impl Into<String>) -> bool {
        self.search_visible = false;
        self.navigate(Route::RecipeDetail { id: recipe_id.into() })
    }

    // -------------------------------------------------------------------------
    // Modals
    // -------------------------------------------------------------------------

    /// Show the settings modal
    pub fn open_settings(&mut self) {
        self.settings_visible = true;
    }

    /// Hide the settings modal
    pub fn close_settings(&mut self) {
        self.settings_visible = false;
    }

    /// Check if the settings modal is visible
    pub fn is_settings_visible(&self) -> bool {
        self.settings_visible
    }

    /// Ask for logout confirmation
    pub fn request_logout(&mut self) {
        self.logout_confirm_visible = true;
    }

    /// Dismiss the logout confirmation
    pub fn cancel_logout(&mut self) {
        self.logout_confirm_visible = false;
    }

    /// Check if the logout confirmation is visible
    pub fn is_logout_confirm_visible(&self) -> bool {
        self.logout_confirm_visible
    }

    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------

    /// Show a notice, replacing any notice already visible
    pub fn show_notice(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, "notice shown");
        self.notice = Some(notice);
        self.notice_shown_at = Some(Instant::now());
    }

    /// Notice for a logout confirmed from the current screen
    ///
    /// The drawer and the profile screen word it differently.
    pub fn logout_notice(&self) -> Notice {
        if !self.drawer_open && self.current_route() == &Route::Profile {
            Notice::logged_out_from_profile()
        } else {
            Notice::logged_out_from_drawer()
        }
    }

    /// Notice currently shown
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismiss the notice. Returns false if none was shown.
    pub fn dismiss_notice(&mut self) -> bool {
        self.notice_shown_at = None;
        self.notice.take().is_some()
    }

    /// Dismiss the notice once its visibility time has passed at `now`
    ///
    /// Returns true if a notice was dismissed.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        let expired = match (&self.notice, self.notice_shown_at) {
            (Some(notice), Some(shown_at)) => {
                now.saturating_duration_since(shown_at) >= notice.duration
            }
            (Some(_), None) => true,
            _ => false,
        };
        if expired {
            self.dismiss_notice();
        }
        expired
    }
}

// =============================================================================
// Notices
// =============================================================================

/// How long a notice stays visible
pub const NOTICE_DURATION: Duration = Duration::from_millis(5000);

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Completed action
    Success,
    /// Failed action
    Error,
    /// Neutral information
    Info,
}

impl NoticeKind {
    /// Background color of the notice
    pub fn background(&self) -> &'static str {
        match self {
            NoticeKind::Success => "#10B981",
            NoticeKind::Error => "#EF4444",
            NoticeKind::Info => "#3B82F6",
        }
    }

    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeKind::Success => "checkmark-circle",
            NoticeKind::Error => "alert-circle",
            NoticeKind::Info => "information-circle",
        }
    }
}

/// A transient message shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,
    /// Headline
    pub title: String,
    /// Second line, if any
    pub subtitle: Option<String>,
    /// Visibility time
    pub duration: Duration,
}

impl Notice {
    /// Create a notice with the default visibility time
    pub fn new(kind: NoticeKind, title: impl Into<String>, subtitle: Option<String>) -> Self {
        Self { kind, title: title.into(), subtitle, duration: NOTICE_DURATION }
    }

    /// Shown after logging out from the drawer
    pub fn logged_out_from_drawer() -> Self {
        Self::new(NoticeKind::Success, "Berhasil Keluar", Some("Sampai jumpa lagi!".to_string()))
    }

    /// Shown after logging out from the profile screen
    pub fn logged_out_from_profile() -> Self {
        Self::new(NoticeKind::Success, "Logout Berhasil", Some("Sampai jumpa lagi!".to_string()))
    }

    /// Shown after creating an account
    pub fn registered() -> Self {
        Self::new(
            NoticeKind::Success,
            "Registrasi Berhasil",
            Some("Silakan login dengan akun baru Anda".to_string()),
        )
    }
}

// =============================================================================
// Recipe Detail Tabs
// =============================================================================

/// Sections of the recipe detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailTab {
    /// Ingredient list
    Ingredients,
    /// Cooking steps
    Steps,
    /// Cooking tips
    Tips,
    /// Video tutorial
    Video,
}

impl DetailTab {
    /// Section heading
    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Ingredients => "Bahan-bahan",
            DetailTab::Steps => "Cara Membuat",
            DetailTab::Tips => "Tips",
            DetailTab::Video => "Video Tutorial",
        }
    }
}

/// Tabs to show for a recipe
///
/// Tips appear only when the recipe has at least one tip, and Video only when
/// its video URL yields a valid YouTube id.
pub fn available_tabs(recipe: &Recipe) -> Vec<DetailTab> {
    let mut tabs = vec![DetailTab::Ingredients, DetailTab::Steps];

    if recipe.tips.as_ref().is_some_and(|tips| !tips.is_empty()) {
        tabs.push(DetailTab::Tips);
    }
    if recipe.video_url.as_deref().and_then(youtube_video_id).is_some() {
        tabs.push(DetailTab::Video);
    }

    tabs
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    /// Pattern segments
    segments: Vec<PatternSegment>,
    /// Route builder
    builder: fn(RouteParams) -> Option<Route>,
}

/// Segment type in a pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// URL Router for parsing paths to routes
pub struct Router {
    /// Route patterns
    patterns: Vec<RoutePattern>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self { patterns: Vec::new() };

        router.add_route("/", |_| Some(Route::Home));
        router.add_route("/profile", |_| Some(Route::Profile));
        router.add_route("/recipe/:id", |params| {
            let id = params.get("id")?;
            if id.is_empty() {
                return None;
            }
            Some(Route::RecipeDetail { id: id.clone() })
        });

        // Auth
        router.add_route("/login", |_| Some(Route::Login));
        router.add_route("/register", |_| Some(Route::Register));

        router
    }

    /// Add a route pattern
    fn add_route(&mut self, pattern: &str, builder: fn(RouteParams) -> Option<Route>) {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(param) = s.strip_prefix(':') {
                    PatternSegment::Param(param.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        self.patterns.push(RoutePattern { segments, builder });
    }

    /// Match a path to a route
    pub fn match_path(&self, path: &str) -> Route {
        let pathname = path.split_once('?').map_or(path, |(pathname, _)| pathname);

        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        for pattern in &self.patterns {
            if let Some(params) = Self::match_pattern(&pattern.segments, &path_segments) {
                if let Some(route) = (pattern.builder)(params) {
                    return route;
                }
            }
        }

        Route::NotFound
    }

    /// Match a pattern against path segments
    fn match_pattern(pattern: &[PatternSegment], path: &[&str]) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, actual) in pattern.iter().zip(path.iter()) {
            match segment {
                PatternSegment::Literal(expected) => {
                    if expected != actual {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.insert(name.clone(), urlencoding::decode(actual).ok()?.into_owned());
                }
            }
        }

        Some(params)
    }
}

// =============================================================================
// Tests
// =============================================================================
