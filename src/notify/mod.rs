//! Setting change notification system.
//!
//! Provides the per-instance event hub used to tell listeners about setting
//! changes and removals.

mod observable;

pub use observable::{Observable, SETTING_CHANGED, SETTING_REMOVED, SettingEvent};
