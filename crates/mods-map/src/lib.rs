//! Dataset-to-MODS field mapping.
//!
//! A spreadsheet's control row carries one *mapping path* per mapped column:
//! a string of pseudo-tags describing where that column's data belongs in
//! the output MODS record, for example
//!
//! ```text
//! <mods:name type="personal"><mods:namePart>#<mods:namePart type="date">
//! ```
//!
//! This crate parses those paths ([`MappingPath`]), splits raw cell values
//! into repeated entries and `#`-separated divisions ([`split_entries`],
//! [`split_divisions`]), and applies each (path, value) pair to an
//! in-progress [`mods_model::Mods`] document ([`Mapper`]). [`assemble`]
//! drives a whole record, optionally starting from a copy of a parent
//! record's document.

mod categories;
mod error;
mod mapper;
mod path;
mod record;
mod split;

pub use error::MapError;
pub use mapper::{Category, ClearedFields, Mapper, ValueGroup};
pub use path::{ElementSpec, MappingPath};
pub use record::{FieldAssignment, Record, assemble};
pub use split::{
    DEFAULT_ENTRY_SEPARATOR, ESCAPE_CHAR, SECTION_DIVIDER, split_divisions, split_entries,
};
