use thiserror::Error;

/// Errors from parsing mapping paths or applying data to a document.
///
/// All of these are data-correctness failures in the mapping configuration,
/// never transient faults; they abort the current column's `add_data` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The mapping-path string is not valid pseudo-tag syntax.
    #[error("malformed mapping path {path:?}: {reason}")]
    MalformedPath { path: String, reason: String },
    /// The path's base element is not one of the recognized categories.
    #[error("unhandled base element {element:?}")]
    UnhandledElement { element: String },
    /// A section element inside `mods:originInfo` is not recognized.
    #[error("unhandled originInfo element {element:?}")]
    UnhandledOriginInfoElement { element: String },
    /// A bare `mods:namePart` column appeared before any `mods:name` column.
    #[error("mods:namePart with no preceding mods:name entry")]
    NoCurrentName,
}

impl MapError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
