//! Per-record assembly of a finished document.

use mods_model::Mods;
use tracing::debug;

use crate::error::MapError;
use crate::mapper::Mapper;

/// One column's (path, value) pair, in original column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub path: String,
    pub value: String,
}

impl FieldAssignment {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }
}

/// One dataset row ready for mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Ties a child record to its parent.
    pub id: String,
    /// This record's own identifier, from a column or synthesized.
    pub mapped_id: String,
    /// Mapped columns in original column order. Order matters: it fixes
    /// first-touch reset order and which name a bare namePart extends.
    pub fields: Vec<FieldAssignment>,
    /// Associated data file references.
    pub attached_files: Vec<String>,
}

impl Record {
    /// Output file name for this record.
    pub fn output_name(&self) -> String {
        format!("{}.mods", self.mapped_id)
    }

    /// Output file name of this record's parent.
    pub fn parent_output_name(&self) -> String {
        format!("{}.mods", self.id)
    }
}

/// Build one record's document.
///
/// Starts from a copy of `parent` when given (merge mode), feeds each
/// non-empty field through the mapper in column order, and returns the
/// finished, still-unserialized document.
pub fn assemble(
    record: &Record,
    parent: Option<Mods>,
    separator: &str,
) -> Result<Mods, MapError> {
    let merged = parent.is_some();
    let mut mapper = match parent {
        Some(parent) => Mapper::with_parent(parent),
        None => Mapper::new(),
    }
    .with_separator(separator);
    debug!(
        record = %record.mapped_id,
        merged,
        columns = record.fields.len(),
        "assembling record"
    );
    for field in &record.fields {
        if field.value.trim().is_empty() {
            continue;
        }
        mapper.add_data(&field.path, &field.value)?;
    }
    Ok(mapper.into_mods())
}
