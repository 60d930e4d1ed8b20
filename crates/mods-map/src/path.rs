//! Mapping-path parsing.
//!
//! A path is one base pseudo-tag, optionally followed by sections separated
//! by `#`. Each section is a run of pseudo-tags with optional trailing
//! literal text; closing tags (`</...>`) carry no information and are
//! skipped. Example with three sections:
//!
//! ```text
//! <mods:name type="personal"><mods:namePart>#<mods:namePart type="date">#<mods:role><mods:roleTerm type="text">creator
//! ```

use crate::error::MapError;
use crate::split::SECTION_DIVIDER;

/// One pseudo-tag from a mapping path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSpec {
    /// Qualified element name, e.g. `mods:namePart`.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<(String, String)>,
    /// Literal text embedded in the path after this tag. Takes precedence
    /// over dataset values wherever a construction rule consults it.
    pub inline_data: Option<String>,
}

impl ElementSpec {
    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// True if the attribute is present, regardless of its value.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|(key, _)| key == name)
    }
}

/// A parsed mapping path: base element plus ordered sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPath {
    pub base: ElementSpec,
    /// One ordered element list per `#`-separated section.
    pub sections: Vec<Vec<ElementSpec>>,
    /// True iff the path contained at least one `#` outside the base tag,
    /// which means cell entries are split into divisions as well.
    pub has_sectioned_data: bool,
}

impl MappingPath {
    /// Parse a mapping-path string.
    pub fn parse(path: &str) -> Result<Self, MapError> {
        let trimmed = path.trim();
        if !trimmed.starts_with('<') {
            return Err(MapError::malformed(path, "must start with '<'"));
        }
        let (base, rest) = take_tag(trimmed).map_err(|reason| MapError::malformed(path, reason))?;
        let base = match base {
            Some(base) => base,
            None => return Err(MapError::malformed(path, "base element is a closing tag")),
        };

        let mut sections = Vec::new();
        let mut has_sectioned_data = false;
        if !rest.is_empty() {
            let pieces: Vec<&str> = rest.split(SECTION_DIVIDER).collect();
            if pieces.len() > 1 {
                has_sectioned_data = true;
            }
            for piece in pieces {
                let section =
                    parse_section(piece).map_err(|reason| MapError::malformed(path, reason))?;
                // A piece that parses to no elements is dropped, not an error.
                if !section.is_empty() {
                    sections.push(section);
                }
            }
        }

        Ok(Self {
            base,
            sections,
            has_sectioned_data,
        })
    }
}

/// Parse one `#`-separated piece into its ordered element list.
fn parse_section(piece: &str) -> Result<Vec<ElementSpec>, String> {
    let mut section = Vec::new();
    let mut rest = piece.trim();
    while !rest.is_empty() {
        let (element, after_tag) = take_tag(rest)?;
        rest = after_tag;
        let Some(mut element) = element else {
            continue; // closing tag
        };
        // Literal text between this tag and the next one (or the end of the
        // piece) is inline data for this element.
        if !rest.is_empty() {
            match rest.find('<') {
                Some(0) => {}
                Some(pos) => {
                    element.inline_data = Some(rest[..pos].to_string());
                    rest = &rest[pos..];
                }
                None => {
                    element.inline_data = Some(rest.to_string());
                    rest = "";
                }
            }
        }
        section.push(element);
    }
    Ok(section)
}

/// Extract the next tag. Returns `None` for a closing tag, and the text
/// remaining after the tag's `>`.
fn take_tag(input: &str) -> Result<(Option<ElementSpec>, &str), String> {
    let start = input.find('<').ok_or_else(|| missing_tag(input))?;
    let end = input.find('>').ok_or_else(|| missing_tag(input))?;
    if end < start {
        return Err(missing_tag(input));
    }
    let tag = &input[start + 1..end];
    let rest = &input[end + 1..];
    if tag.starts_with('/') {
        return Ok((None, rest));
    }
    let (name, attr_text) = match tag.find(' ') {
        Some(space) => (&tag[..space], &tag[space..]),
        None => (tag, ""),
    };
    if !name.chars().next().is_some_and(char::is_alphabetic) {
        return Err(format!("invalid element name {name:?}"));
    }
    let attributes = parse_attributes(attr_text)?;
    Ok((
        Some(ElementSpec {
            name: name.to_string(),
            attributes,
            inline_data: None,
        }),
        rest,
    ))
}

/// Parse `name="value"` pairs in source order.
fn parse_attributes(text: &str) -> Result<Vec<(String, String)>, String> {
    let mut attributes = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let equals = rest
            .find('=')
            .ok_or_else(|| format!("expected '=' in attribute list {rest:?}"))?;
        let name = rest[..equals].trim();
        let after_equals = &rest[equals + 1..];
        let open = after_equals
            .find('"')
            .ok_or_else(|| format!("attribute {name:?} has no quoted value"))?;
        let value_text = &after_equals[open + 1..];
        let close = value_text
            .find('"')
            .ok_or_else(|| format!("unterminated quote in attribute {name:?}"))?;
        attributes.push((name.to_string(), value_text[..close].to_string()));
        rest = value_text[close + 1..].trim();
    }
    Ok(attributes)
}

fn missing_tag(input: &str) -> String {
    format!("unterminated tag in {input:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_element_only() {
        let path = MappingPath::parse("<mods:identifier type=\"local\" displayLabel=\"PN_DB_id\">")
            .unwrap();
        assert_eq!(path.base.name, "mods:identifier");
        assert_eq!(path.base.attribute("type"), Some("local"));
        assert_eq!(path.base.attribute("displayLabel"), Some("PN_DB_id"));
        assert!(path.sections.is_empty());
        assert!(!path.has_sectioned_data);
    }

    #[test]
    fn attributes_keep_source_order() {
        let path = MappingPath::parse("<mods:note displayLabel=\"x\" type=\"y\">").unwrap();
        let keys: Vec<&str> = path
            .base
            .attributes
            .iter()
            .map(|(key, _)| key.as_str())
            .collect();
        assert_eq!(keys, vec!["displayLabel", "type"]);
    }

    #[test]
    fn sections_split_on_divider() {
        let path = MappingPath::parse(
            "<mods:name type=\"personal\"><mods:namePart>#<mods:namePart type=\"date\">#<mods:namePart type=\"termsOfAddress\">",
        )
        .unwrap();
        assert!(path.has_sectioned_data);
        assert_eq!(path.sections.len(), 3);
        assert_eq!(path.sections[0][0].name, "mods:namePart");
        assert_eq!(path.sections[1][0].attribute("type"), Some("date"));
        assert_eq!(
            path.sections[2][0].attribute("type"),
            Some("termsOfAddress")
        );
    }

    #[test]
    fn single_section_is_not_sectioned() {
        let path = MappingPath::parse("<mods:titleInfo><mods:title>").unwrap();
        assert!(!path.has_sectioned_data);
        assert_eq!(path.sections.len(), 1);
        assert_eq!(path.sections[0][0].name, "mods:title");
    }

    #[test]
    fn inline_data_and_closing_tags() {
        let path = MappingPath::parse(
            "<mods:name><mods:role><mods:roleTerm type=\"text\">creator</mods:roleTerm></mods:role>",
        )
        .unwrap();
        let section = &path.sections[0];
        assert_eq!(section.len(), 2);
        assert_eq!(section[0].name, "mods:role");
        assert_eq!(section[1].name, "mods:roleTerm");
        assert_eq!(section[1].inline_data.as_deref(), Some("creator"));
    }

    #[test]
    fn nested_section_elements() {
        let path = MappingPath::parse(
            "<mods:location><mods:holdingSimple><mods:copyInformation><mods:note>",
        )
        .unwrap();
        let names: Vec<&str> = path.sections[0].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["mods:holdingSimple", "mods:copyInformation", "mods:note"]
        );
    }

    #[test]
    fn rejects_path_without_tag_opener() {
        let err = MappingPath::parse("asdf1234").unwrap_err();
        assert!(matches!(err, MapError::MalformedPath { .. }));
    }

    #[test]
    fn rejects_unterminated_tag() {
        let err = MappingPath::parse("<mods:titleInfo><mods:title").unwrap_err();
        assert!(matches!(err, MapError::MalformedPath { .. }));
    }

    #[test]
    fn rejects_unterminated_attribute_quote() {
        let err = MappingPath::parse("<mods:identifier type=\"local>").unwrap_err();
        let MapError::MalformedPath { reason, .. } = err else {
            panic!("wrong error variant");
        };
        assert!(reason.contains("unterminated quote"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let path = MappingPath::parse("  <mods:genre authority=\"aat\">  ").unwrap();
        assert_eq!(path.base.name, "mods:genre");
        // Trailing whitespace after the base tag parses to no section.
        assert!(path.sections.is_empty() || path.sections[0].is_empty());
    }
}
