//! The field mapper: applies (path, value) pairs to a MODS document.

use std::collections::BTreeSet;

use mods_model::Mods;
use tracing::debug;

use crate::categories;
use crate::error::MapError;
use crate::path::MappingPath;
use crate::split::{DEFAULT_ENTRY_SEPARATOR, split_divisions, split_entries};

/// The ordered divisions of one repeated entry. A single-element group when
/// the path is not sectioned.
pub type ValueGroup = Vec<String>;

/// The recognized mapping categories, keyed by a path's base element name.
///
/// This is a closed world: a base element outside this set is a mapping
/// configuration bug and fails with [`MapError::UnhandledElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    /// `mods:mods` with an `ID` attribute: the document-level identifier.
    DocumentId,
    Name,
    /// Bare `mods:namePart` appending to the most recent name.
    NamePart,
    TitleInfo,
    Language,
    Genre,
    OriginInfo,
    PhysicalDescription,
    TypeOfResource,
    Abstract,
    Note,
    Subject,
    Identifier,
    Location,
    RelatedItem,
}

impl Category {
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "mods:mods" => Some(Self::DocumentId),
            "mods:name" => Some(Self::Name),
            "mods:namePart" => Some(Self::NamePart),
            "mods:titleInfo" => Some(Self::TitleInfo),
            "mods:language" => Some(Self::Language),
            "mods:genre" => Some(Self::Genre),
            "mods:originInfo" => Some(Self::OriginInfo),
            "mods:physicalDescription" => Some(Self::PhysicalDescription),
            "mods:typeOfResource" => Some(Self::TypeOfResource),
            "mods:abstract" => Some(Self::Abstract),
            "mods:note" => Some(Self::Note),
            "mods:subject" => Some(Self::Subject),
            "mods:identifier" => Some(Self::Identifier),
            "mods:location" => Some(Self::Location),
            "mods:relatedItem" => Some(Self::RelatedItem),
            _ => None,
        }
    }
}

/// Tracks which categories have been reset during this build.
///
/// A repeatable category is cleared exactly once per [`Mapper`] instance,
/// on the first call that touches it. Later calls append, so several
/// spreadsheet columns can feed the same category without wiping each
/// other out, while a merge-mode build discards inherited entries for any
/// category the child record writes to.
#[derive(Debug, Default)]
pub struct ClearedFields(BTreeSet<Category>);

impl ClearedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true on the first touch of `category`, false afterwards.
    pub fn first_touch(&mut self, category: Category) -> bool {
        self.0.insert(category)
    }
}

/// Maps dataset cells into one MODS document.
///
/// Each instance owns exactly one document for one record. In merge mode
/// the instance starts from a deep copy of the parent's document and
/// mutates only the copy.
#[derive(Debug)]
pub struct Mapper {
    mods: Mods,
    cleared: ClearedFields,
    entry_separator: String,
}

impl Mapper {
    /// A mapper starting from an empty document.
    pub fn new() -> Self {
        Self::from_document(Mods::new())
    }

    /// A mapper starting from a copy of `parent` (merge mode).
    pub fn with_parent(parent: Mods) -> Self {
        Self::from_document(parent)
    }

    fn from_document(mods: Mods) -> Self {
        Self {
            mods,
            cleared: ClearedFields::new(),
            entry_separator: DEFAULT_ENTRY_SEPARATOR.to_string(),
        }
    }

    /// Override the repeat-separator (default `||`).
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.entry_separator = separator.into();
        self
    }

    pub fn mods(&self) -> &Mods {
        &self.mods
    }

    pub fn into_mods(self) -> Mods {
        self.mods
    }

    /// Apply one column's data to the document.
    ///
    /// The path is parsed, the value split into entry groups (and, for
    /// sectioned paths, per-section divisions), and the result dispatched
    /// to the rule for the base element's category.
    pub fn add_data(&mut self, path: &str, value: &str) -> Result<(), MapError> {
        let parsed = MappingPath::parse(path)?;
        let groups: Vec<ValueGroup> = split_entries(value, &self.entry_separator)
            .iter()
            .map(|entry| split_divisions(entry, parsed.has_sectioned_data))
            .collect();
        if groups.is_empty() {
            debug!(path, "cell is empty after splitting, nothing to map");
            return Ok(());
        }
        let category = Category::from_element_name(&parsed.base.name).ok_or_else(|| {
            MapError::UnhandledElement {
                element: parsed.base.name.clone(),
            }
        })?;
        debug!(path, ?category, entries = groups.len(), "mapping column");
        categories::apply(category, &parsed, &groups, &mut self.mods, &mut self.cleared)
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}
