//! # observable-config
//!
//! INI-backed application settings with typed access and change notifications.
//!
//! ## Overview
//!
//! `observable-config` provides a small settings store that combines:
//! - An ordered INI document model (sections, a `[DEFAULT]` fallback section,
//!   strict parsing, faithful write-back)
//! - Typed getters with caller-supplied fallbacks
//! - A per-instance publish/subscribe hub notifying listeners of every
//!   setting change and removal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use observable_config::prelude::*;
//! use observable_config::notify::SETTING_CHANGED;
//!
//! # fn example() -> observable_config::error::Result<()> {
//! let mut config = Config::open("app.ini")?;
//!
//! // React to changes from anywhere holding an Observable handle.
//! config.observable().subscribe(SETTING_CHANGED, |event| {
//!     println!("changed: {event:?}");
//! });
//!
//! // Lookups fall back to [DEFAULT], then to the caller's fallback.
//! let user = config.get_or("oracle", "user", "guest");
//! let retries: Option<u32> = config.get_parsed("oracle", "retries");
//!
//! // Mutations chain; persist explicitly.
//! config.set("common", "time", "now").save()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Design
//!
//! - **Strings in, strings out**: values are stored as strings; the typed
//!   getters parse on the way out and fall back on `None` when parsing fails.
//! - **Explicit persistence**: the in-memory store and the backing file are
//!   independent between [`Config::load`] and [`Config::save`] calls. There
//!   is no file watching and no automatic synchronization.
//! - **Lookup misses are not errors**: an unset key resolves to the fallback
//!   with a warning log; only malformed files and failing filesystems
//!   surface as [`error::ConfigError`].
//! - **Single-threaded**: operations are synchronous and blocking. Racing
//!   writers on the same file are last-writer-wins.
//!
//! [`Config::load`]: core::Config::load
//! [`Config::save`]: core::Config::save

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod ini;
pub mod notify;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::Config;
    pub use crate::error::{ConfigError, Result};
    pub use crate::notify::{Observable, SettingEvent};
}
