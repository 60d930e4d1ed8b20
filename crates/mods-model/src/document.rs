//! In-memory MODS record types.
//!
//! Fields named `type_attr` and `label` correspond to the MODS `type` and
//! `displayLabel` attributes. Repeatable elements are plain `Vec`s so the
//! mapper can clear and rebuild them when a child record overrides data
//! inherited from its parent.

/// A MODS record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mods {
    /// Value of the `ID` attribute on the `mods:mods` root.
    pub id: Option<String>,
    pub title_infos: Vec<TitleInfo>,
    pub names: Vec<Name>,
    pub resource_type: Option<String>,
    pub genres: Vec<Genre>,
    pub origin_info: Option<OriginInfo>,
    pub languages: Vec<Language>,
    pub physical_description: Option<PhysicalDescription>,
    pub abstract_text: Option<String>,
    pub notes: Vec<Note>,
    pub subjects: Vec<Subject>,
    pub identifiers: Vec<Identifier>,
    pub locations: Vec<Location>,
    pub related_items: Vec<RelatedItem>,
}

impl Mods {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no element or attribute has been set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleInfo {
    pub title: Option<String>,
    pub non_sort: Option<String>,
    pub part_name: Option<String>,
    pub part_number: Option<String>,
    pub type_attr: Option<String>,
    pub label: Option<String>,
}

/// A name entry with its parts and roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Name {
    pub type_attr: Option<String>,
    pub parts: Vec<NamePart>,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePart {
    pub text: String,
    pub type_attr: Option<String>,
}

impl NamePart {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            type_attr: None,
        }
    }
}

/// Serializes as `<mods:role><mods:roleTerm>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Role {
    pub text: String,
    pub type_attr: Option<String>,
    pub authority: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Language {
    pub term: LanguageTerm,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTerm {
    pub text: String,
    pub authority: Option<String>,
    pub type_attr: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Genre {
    pub text: String,
    pub authority: Option<String>,
}

/// The singleton `mods:originInfo` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginInfo {
    pub label: Option<String>,
    pub dates: Vec<OriginDate>,
    pub places: Vec<Place>,
    pub publisher: Option<String>,
}

/// Which MODS date element an [`OriginDate`] serializes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    Created,
    Issued,
    Captured,
    Valid,
    Modified,
    Copyright,
    Other,
}

impl DateKind {
    /// The qualified MODS element name for this date kind.
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Created => "mods:dateCreated",
            Self::Issued => "mods:dateIssued",
            Self::Captured => "mods:dateCaptured",
            Self::Valid => "mods:dateValid",
            Self::Modified => "mods:dateModified",
            Self::Copyright => "mods:copyrightDate",
            Self::Other => "mods:dateOther",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "mods:dateCreated" => Some(Self::Created),
            "mods:dateIssued" => Some(Self::Issued),
            "mods:dateCaptured" => Some(Self::Captured),
            "mods:dateValid" => Some(Self::Valid),
            "mods:dateModified" => Some(Self::Modified),
            "mods:copyrightDate" => Some(Self::Copyright),
            "mods:dateOther" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginDate {
    pub kind: DateKind,
    pub value: String,
    pub encoding: Option<String>,
    pub point: Option<String>,
    pub key_date: Option<String>,
}

impl OriginDate {
    pub fn new(kind: DateKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            encoding: None,
            point: None,
            key_date: None,
        }
    }
}

/// Serializes as `<mods:place><mods:placeTerm>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicalDescription {
    pub extent: Option<String>,
    pub digital_origin: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    pub type_attr: Option<String>,
    pub label: Option<String>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            type_attr: None,
            label: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    pub authority: Option<String>,
    pub topics: Vec<String>,
    pub temporals: Vec<String>,
    pub geographic: Option<String>,
    pub hierarchical_geographic: Option<HierarchicalGeographic>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchicalGeographic {
    pub country: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub text: String,
    pub type_attr: Option<String>,
    pub label: Option<String>,
}

/// A `mods:location` entry.
///
/// `copy_note` serializes as the nested
/// `holdingSimple/copyInformation/note` structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub url: Option<String>,
    pub physical: Option<String>,
    pub copy_note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelatedItem {
    pub type_attr: Option<String>,
    pub label: Option<String>,
    pub title: Option<String>,
}
