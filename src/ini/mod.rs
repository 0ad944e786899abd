//! INI document model: ordered sections, strict parsing, write-back.

mod document;
mod parse;
mod write;

pub use document::{DEFAULT_SECTION, Document, Section};
