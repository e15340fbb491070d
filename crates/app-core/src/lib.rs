//! Core application logic for Rahasia Dapur
//!
//! This crate contains the business logic behind the screens: the recipe
//! feed and its filtered projection, the authentication flows, and recipe
//! media helpers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod media;
pub mod recipes;

pub use auth::{localize_auth_error, AuthError, AuthService, LoginForm, RegisterForm};
pub use media::{youtube_embed_url, youtube_video_id, ImageSource};
pub use recipes::{
    categories, project, FeedError, FeedState, FeedView, Projection, RecipeFeed, RefreshOutcome,
    ALL_CATEGORY,
};
