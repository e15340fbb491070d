//! Storage layer for Rahasia Dapur
//!
//! This crate provides the persisted key-value store that holds the session
//! record and the theme preference across app restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;

pub use kv::{KeyValueStore, KvConfig, KvError, KvStore, Result};
