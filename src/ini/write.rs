//! Serializing a document back to INI text.

use super::document::{DEFAULT_SECTION, Document, Section};
use std::fmt::{self, Write};

fn write_section(out: &mut impl Write, name: &str, section: &Section) -> fmt::Result {
    writeln!(out, "[{name}]")?;
    for (key, value) in section.iter() {
        writeln!(out, "{key} = {value}")?;
    }
    writeln!(out)
}

impl Document {
    /// Write the document as INI text.
    ///
    /// The default section is written first under its `[DEFAULT]` header
    /// (when non-empty), then user sections in held order. Each section ends
    /// with a blank line.
    pub fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        if !self.defaults().is_empty() {
            write_section(out, DEFAULT_SECTION, self.defaults())?;
        }
        for (name, section) in self.sections() {
            write_section(out, name, section)?;
        }
        Ok(())
    }

    /// Render the document as an INI string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }
}
