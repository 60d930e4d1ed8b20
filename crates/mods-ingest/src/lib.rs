//! Dataset ingestion for the MODS generator.
//!
//! A dataset is a delimited-text file where one designated row (the
//! *control row*, row 2 by convention) holds a mapping path per mapped
//! column, and every row after it is one record. This crate loads the
//! file, finds the id / mods-id / file-name columns, normalizes
//! date-like cell text, and produces [`mods_map::Record`]s ready for
//! assembly.

mod dataset;
mod dates;
mod error;

pub use dataset::{Dataset, DatasetOptions, RecordKind};
pub use dates::normalize_text_date;
pub use error::IngestError;
