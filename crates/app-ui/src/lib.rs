//! User interface state for Rahasia Dapur
//!
//! This crate holds the screen-facing state that sits above the core logic:
//! routing between the auth and app areas, the side drawer and its overlays,
//! recipe detail tabs, and the color palettes for each scheme.
//!
//! # Modules
//!
//! - [`navigation`] - Routes, stacks, drawer, overlay and notice state
//! - [`theme`] - Light and dark palettes
//!
//! # Example
//!
//! ```rust
//! use app_state::{ColorScheme, SessionStatus};
//! use app_ui::navigation::{NavigationState, Route};
//! use app_ui::theme::get_theme;
//!
//! let mut nav = NavigationState::new(SessionStatus::Unauthenticated);
//! assert_eq!(nav.current_route(), &Route::Login);
//!
//! nav.on_session_change(SessionStatus::Authenticated);
//! assert_eq!(nav.current_route(), &Route::Home);
//!
//! let theme = get_theme(ColorScheme::Light);
//! assert_eq!(theme.colors.background, "#fdf5f0");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod theme;

// Re-export commonly used types
pub use theme::{dark_theme, get_theme, light_theme, Theme, ThemeColors};

pub use navigation::{
    available_tabs, DetailTab, DrawerHeader, DrawerScreen, NavigationStack, NavigationState,
    Notice, NoticeKind, RootArea, Route, RouteParams, Router, StackEntry, NOTICE_DURATION,
};
