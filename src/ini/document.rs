//! The in-memory representation of an INI file.

/// Reserved name of the default section.
///
/// Keys set here are visible as fallback values when looking up a key in any
/// existing section. The name is a sentinel: it never collides with a user
/// section, and the default section always implicitly exists.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A named group of key/value settings.
///
/// Keys are case-sensitive and case-preserving. Insertion order is kept and
/// is the order keys are written back to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    /// Get the value for `key`, if directly set in this section.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True if `key` is directly set in this section.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, replacing an existing entry in place or
    /// appending a new one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove `key` from this section. Returns whether it existed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of keys directly set in this section.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if this section holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A full INI document: the default section plus user sections in read order.
///
/// The default section is held separately under the reserved
/// [`DEFAULT_SECTION`] name. User sections keep the order they were read or
/// created in, which is also their serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    defaults: Section,
    sections: Vec<(String, Section)>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Look up a user section by name. The default section is reachable
    /// under [`DEFAULT_SECTION`].
    pub fn section(&self, name: &str) -> Option<&Section> {
        if name == DEFAULT_SECTION {
            return Some(&self.defaults);
        }
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// True if `name` names an existing user section.
    ///
    /// The default section is not a user section; `has_section(DEFAULT_SECTION)`
    /// is `false`, matching the sentinel's implicit-existence semantics.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.iter().any(|(n, _)| n == name)
    }

    /// Iterate over user sections in held order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Look up `(section, key)` with default-section fallback.
    ///
    /// A key absent from an existing section but present in the default
    /// section IS found. A missing section is never found, even when the key
    /// exists in the default section.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        if section == DEFAULT_SECTION {
            return self.defaults.get(key);
        }
        let sect = self.section(section)?;
        sect.get(key).or_else(|| self.defaults.get(key))
    }

    /// Create an empty user section if `name` does not already exist.
    ///
    /// [`DEFAULT_SECTION`] is a no-op: the default section always exists.
    pub fn add_section(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name == DEFAULT_SECTION || self.has_section(&name) {
            return;
        }
        self.sections.push((name, Section::default()));
    }

    /// Write `(section, key) = value`, creating the section if needed.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let section = section.into();
        if section == DEFAULT_SECTION {
            self.defaults.set(key, value);
            return;
        }
        match self.sections.iter_mut().find(|(n, _)| *n == section) {
            Some((_, sect)) => sect.set(key, value),
            None => {
                let mut sect = Section::default();
                sect.set(key, value);
                self.sections.push((section, sect));
            }
        }
    }

    /// Delete a whole user section. Returns whether it existed.
    ///
    /// The default section is not removable as a section; its keys go away
    /// one at a time via [`Document::remove_key`].
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|(n, _)| n != name);
        self.sections.len() != before
    }

    /// Delete a single directly-set key. Returns whether it existed.
    ///
    /// The section is left in place even if it is now empty. Keys only
    /// visible through default fallback are not removable through another
    /// section's name.
    pub fn remove_key(&mut self, section: &str, key: &str) -> bool {
        if section == DEFAULT_SECTION {
            return self.defaults.remove(key);
        }
        match self.sections.iter_mut().find(|(n, _)| *n == section) {
            Some((_, sect)) => sect.remove(key),
            None => false,
        }
    }

    /// Key-level merge of `other` into `self`.
    ///
    /// Keys from `other` update or extend existing sections; sections and
    /// keys absent from `other` survive. This is the incremental-read INI
    /// semantics used by repeated loads.
    pub fn merge(&mut self, other: Document) {
        for (key, value) in other.defaults.entries {
            self.defaults.set(key, value);
        }
        for (name, sect) in other.sections {
            self.add_section(name.clone());
            for (key, value) in sect.entries {
                self.set(name.clone(), key, value);
            }
        }
    }
}
