//! The settings store backed by an INI file.

use crate::error::{ConfigError, Result};
use crate::ini::{DEFAULT_SECTION, Document};
use crate::notify::{Observable, SETTING_CHANGED, SETTING_REMOVED, SettingEvent};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{error, info, warn};

/// Type alias for the optional change hook.
type ChangeHook = Box<dyn Fn(&str, &str, &str) + Send + Sync>;

/// Type alias for the optional remove hook.
type RemoveHook = Box<dyn Fn(&str, Option<&str>) + Send + Sync>;

/// Application settings loaded from an INI file.
///
/// `Config` owns the parsed document, the path it was loaded from, and an
/// [`Observable`] used to notify listeners. Mutations go through [`set`] and
/// [`remove`], which publish [`SETTING_CHANGED`] / [`SETTING_REMOVED`] events;
/// [`load`] and [`save`] synchronize the in-memory document with the backing
/// file. There is no automatic synchronization in between.
///
/// [`set`]: Config::set
/// [`remove`]: Config::remove
/// [`load`]: Config::load
/// [`save`]: Config::save
///
/// # Examples
///
/// ```rust,no_run
/// use observable_config::prelude::*;
///
/// # fn example() -> observable_config::error::Result<()> {
/// let mut config = Config::open("app.ini")?;
///
/// let user = config.get_or("oracle", "user", "guest");
/// println!("user: {user}");
///
/// config.set("common", "time", "now").save()?;
/// # Ok(())
/// # }
/// ```
pub struct Config {
    path: PathBuf,
    document: Document,
    observable: Observable,
    change_hook: Option<ChangeHook>,
    remove_hook: Option<RemoveHook>,
}

impl Config {
    /// Open the configuration file at `path`.
    ///
    /// The file is loaded immediately; a malformed file or a failing
    /// filesystem fails construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] / [`ConfigError::MissingSectionHeader`]
    /// for malformed content and [`ConfigError::Io`] when the file cannot be
    /// read (including when it does not exist).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(path, Observable::new())
    }

    /// Open the configuration file at `path` with a caller-supplied
    /// [`Observable`].
    ///
    /// Use this to share one event hub between the config and listeners that
    /// subscribed before the config existed.
    ///
    /// # Errors
    ///
    /// Same as [`Config::open`].
    pub fn open_with(path: impl Into<PathBuf>, observable: Observable) -> Result<Self> {
        let mut config = Self {
            path: path.into(),
            document: Document::new(),
            observable,
            change_hook: None,
            remove_hook: None,
        };
        config.load()?;
        Ok(config)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A handle to this config's event hub, for subscribing to
    /// [`SETTING_CHANGED`] and [`SETTING_REMOVED`].
    pub fn observable(&self) -> Observable {
        self.observable.clone()
    }

    /// Get the value of a setting.
    ///
    /// A key absent from an existing `section` but present in the default
    /// section is found through the standard INI fallback. A missing section
    /// or key logs a warning and returns `None`; it is a normal
    /// "not configured yet" state, not an error.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        match self.document.get(section, key) {
            Some(value) => Some(value),
            None => {
                warn!("Setting not found: [{section}] {key}");
                None
            }
        }
    }

    /// Get the value of a setting, or `fallback` when it is not set.
    pub fn get_or<'a>(&'a self, section: &str, key: &str, fallback: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(fallback)
    }

    /// Get a setting parsed into `T`.
    ///
    /// An unset key or an unparsable value logs a warning and returns `None`.
    pub fn get_parsed<T>(&self, section: &str, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.get(section, key)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!("Setting not parsable: [{section}] {key} = {value}: {err}");
                None
            }
        }
    }

    /// Get a setting interpreted as a boolean.
    ///
    /// Accepts `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`, case
    /// insensitively. Anything else logs a warning and returns `None`.
    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        let value = self.get(section, key)?;
        match value.to_ascii_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Some(true),
            "0" | "no" | "false" | "off" => Some(false),
            _ => {
                warn!("Setting not a boolean: [{section}] {key} = {value}");
                None
            }
        }
    }

    /// Set the value of a setting.
    ///
    /// Auto-creates `section` when it does not exist (the default section
    /// always implicitly exists). Publishes [`SETTING_CHANGED`], invokes the
    /// change hook, and logs the change. Returns `&mut Self` so calls chain:
    /// `config.set("common", "time", "now").save()?`.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> &mut Self {
        self.document.set(section, key, value);
        self.observable
            .trigger(SETTING_CHANGED, &SettingEvent::changed(section, key, value));
        if let Some(hook) = &self.change_hook {
            hook(section, key, value);
        }
        info!("Setting changed: [{section}] {key} = {value}");
        self
    }

    /// Remove a setting or an entire section.
    ///
    /// With `key: None` the whole section is deleted; with a key only that
    /// key is deleted, leaving the section in place even when now empty.
    /// Returns whether anything was removed; a missing target logs a warning
    /// and returns `false` with no state change. Removal never fails.
    ///
    /// Publishes [`SETTING_REMOVED`] and invokes the remove hook on success
    /// only.
    pub fn remove(&mut self, section: &str, key: Option<&str>) -> bool {
        match key {
            None => {
                if self.document.remove_section(section) {
                    self.observable
                        .trigger(SETTING_REMOVED, &SettingEvent::removed(section, None));
                    if let Some(hook) = &self.remove_hook {
                        hook(section, None);
                    }
                    info!("Removed section: [{section}]");
                    true
                } else {
                    warn!("Section not found: [{section}]");
                    false
                }
            }
            Some(key) => {
                if self.document.remove_key(section, key) {
                    self.observable
                        .trigger(SETTING_REMOVED, &SettingEvent::removed(section, Some(key)));
                    if let Some(hook) = &self.remove_hook {
                        hook(section, Some(key));
                    }
                    info!("Removed setting: [{section}] {key}");
                    true
                } else {
                    warn!("Setting not found: [{section}] {key}");
                    false
                }
            }
        }
    }

    /// Load settings from the backing file.
    ///
    /// Re-reading merges at key level: sections absent from the file and
    /// keys absent from a re-read section survive, matching incremental-read
    /// INI semantics. No events are published for loaded settings.
    ///
    /// # Errors
    ///
    /// Parse and IO failures are logged at error level and propagated;
    /// continuing with a partially loaded config would be unsafe.
    pub fn load(&mut self) -> Result<()> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            error!("Failed to load config from {}: {err}", self.path.display());
            ConfigError::Io(err)
        })?;
        let incoming = Document::parse(&text).inspect_err(|err| {
            error!("Failed to load config from {}: {err}", self.path.display());
        })?;
        self.document.merge(incoming);
        info!("Settings loaded from {}", self.path.display());
        Ok(())
    }

    /// Save settings to the backing file, overwriting it in full.
    ///
    /// # Errors
    ///
    /// IO failures are logged at error level and propagated.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, self.document.render()).map_err(|err| {
            error!("Failed to save config to {}: {err}", self.path.display());
            ConfigError::Io(err)
        })?;
        info!("Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Snapshot the full store as section name -> key -> value.
    ///
    /// Each section's map contains only its directly-set keys; default
    /// values are not merged in. The default section appears under its
    /// reserved name when non-empty.
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<String, String>> {
        let mut out = BTreeMap::new();
        if !self.document.defaults().is_empty() {
            out.insert(
                DEFAULT_SECTION.to_string(),
                section_map(self.document.defaults().iter()),
            );
        }
        for (name, section) in self.document.sections() {
            out.insert(name.to_string(), section_map(section.iter()));
        }
        out
    }

    /// Snapshot a single section, or `None` when it does not exist.
    pub fn section_snapshot(&self, section: &str) -> Option<BTreeMap<String, String>> {
        self.document
            .section(section)
            .map(|s| section_map(s.iter()))
    }

    /// Get a setting from the default section.
    pub fn get_default(&self, key: &str) -> Option<&str> {
        self.get(DEFAULT_SECTION, key)
    }

    /// Get a setting from the default section, or `fallback` when unset.
    pub fn get_default_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get_or(DEFAULT_SECTION, key, fallback)
    }

    /// Set a setting in the default section.
    pub fn set_default(&mut self, key: &str, value: &str) -> &mut Self {
        self.set(DEFAULT_SECTION, key, value)
    }

    /// Look up a setting through a combined `section_key` name, split on the
    /// first `_` only: `"oracle_user"` reads `[oracle] user`,
    /// `"DEFAULT_postal_code"` reads `[DEFAULT] postal_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKeyPath`] when `name` contains no
    /// separator.
    pub fn lookup(&self, name: &str) -> Result<Option<&str>> {
        let (section, key) = split_key_path(name)?;
        Ok(self.get(section, key))
    }

    /// Write a setting through a combined `section_key` name, with the same
    /// split rule as [`Config::lookup`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKeyPath`] when `name` contains no
    /// separator.
    pub fn assign(&mut self, name: &str, value: &str) -> Result<&mut Self> {
        let (section, key) = split_key_path(name)?;
        Ok(self.set(section, key, value))
    }

    /// Register a hook invoked after every successful [`Config::set`], with
    /// `(section, key, value)`. Replaces any previously registered hook.
    ///
    /// The hook fires alongside the [`SETTING_CHANGED`] event; use whichever
    /// suits the caller, or both.
    pub fn on_change<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str, &str, &str) + Send + Sync + 'static,
    {
        self.change_hook = Some(Box::new(hook));
        self
    }

    /// Register a hook invoked after every successful [`Config::remove`],
    /// with `(section, removed_key_or_none)`. Replaces any previously
    /// registered hook.
    pub fn on_remove<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str, Option<&str>) + Send + Sync + 'static,
    {
        self.remove_hook = Some(Box::new(hook));
        self
    }
}

fn section_map<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    entries
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn split_key_path(name: &str) -> Result<(&str, &str)> {
    name.split_once('_')
        .filter(|(section, _)| !section.is_empty())
        .ok_or_else(|| ConfigError::InvalidKeyPath(name.to_string()))
}
