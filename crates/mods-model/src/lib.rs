//! MODS document model.
//!
//! This crate provides an in-memory model for MODS (Metadata Object
//! Description Schema) records, covering the element set produced by the
//! dataset mapper:
//!
//! - **titleInfo**, **name** (with nameParts and roles), **subject**
//! - **originInfo** (dates, places, publisher), **physicalDescription**
//! - **genre**, **language**, **note**, **identifier**, **location**,
//!   **relatedItem**, **typeOfResource**, **abstract**
//!
//! Documents serialize to MODS v3 XML via [`Mods::to_xml`] and can be read
//! back with [`Mods::from_xml`], which is used when child records extend a
//! previously written parent record.

mod document;
mod error;
mod parse;
mod xml;

pub use document::{
    DateKind, Genre, HierarchicalGeographic, Identifier, Language, LanguageTerm, Location, Mods,
    Name, NamePart, Note, OriginDate, OriginInfo, PhysicalDescription, Place, RelatedItem, Role,
    Subject, TitleInfo,
};
pub use error::ModelError;

/// MODS v3 namespace URI.
pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";
/// XML Schema instance namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Schema location pinning the MODS 3.4 schema.
pub const MODS_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/mods/ http://www.loc.gov/standards/mods/v3/mods-3-4.xsd";
