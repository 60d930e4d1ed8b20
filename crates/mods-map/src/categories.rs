//! Per-category construction rules.
//!
//! Each rule is a standalone function taking the parsed path, the split
//! value groups, the document under construction, and the cleared-fields
//! set, so rules can be unit-tested independently and new categories added
//! without touching existing ones.
//!
//! Missing or empty divisions are skipped rather than treated as errors;
//! whether that silently drops a sub-field or just leaves it unset is up
//! to the individual rule.

use mods_model::{
    DateKind, Genre, HierarchicalGeographic, Identifier, Language, LanguageTerm, Location, Mods,
    Name, NamePart, Note, OriginDate, OriginInfo, PhysicalDescription, Place, RelatedItem, Role,
    Subject, TitleInfo,
};

use crate::error::MapError;
use crate::mapper::{Category, ClearedFields, ValueGroup};
use crate::path::{ElementSpec, MappingPath};

pub(crate) fn apply(
    category: Category,
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) -> Result<(), MapError> {
    match category {
        Category::DocumentId => document_id(path, groups, mods),
        Category::Name => names(path, groups, mods, cleared),
        Category::NamePart => return bare_name_part(path, groups, mods),
        Category::TitleInfo => title_infos(path, groups, mods, cleared),
        Category::Language => languages(path, groups, mods, cleared),
        Category::Genre => genres(path, groups, mods, cleared),
        Category::OriginInfo => return origin_info(path, groups, mods, cleared),
        Category::PhysicalDescription => physical_description(path, groups, mods, cleared),
        Category::TypeOfResource => type_of_resource(groups, mods, cleared),
        Category::Abstract => abstract_text(groups, mods, cleared),
        Category::Note => notes(path, groups, mods, cleared),
        Category::Subject => subjects(path, groups, mods, cleared),
        Category::Identifier => identifiers(path, groups, mods, cleared),
        Category::Location => locations(path, groups, mods, cleared),
        Category::RelatedItem => related_items(path, groups, mods, cleared),
    }
    Ok(())
}

/// `<mods:mods ID="">`: document-level identifier from the first division
/// of the first group. Only meaningful when the base tag carries `ID`.
fn document_id(path: &MappingPath, groups: &[ValueGroup], mods: &mut Mods) {
    if path.base.has_attribute("ID") {
        if let Some(value) = first_value(groups) {
            mods.id = Some(value.to_string());
        }
    }
}

fn names(path: &MappingPath, groups: &[ValueGroup], mods: &mut Mods, cleared: &mut ClearedFields) {
    if cleared.first_touch(Category::Name) {
        mods.names.clear();
    }
    for group in groups {
        let mut name = Name {
            type_attr: owned_attr(&path.base, "type"),
            ..Name::default()
        };
        for (index, section) in path.sections.iter().enumerate() {
            let division = group
                .get(index)
                .map(|d| d.trim())
                .filter(|d| !d.is_empty());
            // A role may be declared entirely in the path (inline roleTerm
            // text), so the role section applies even without data.
            let is_role_section = section.first().is_some_and(|e| e.name == "mods:role");
            if division.is_none() && !is_role_section {
                continue;
            }
            for element in section {
                match element.name.as_str() {
                    "mods:namePart" => {
                        if let Some(text) = division {
                            name.parts.push(NamePart {
                                text: text.to_string(),
                                type_attr: owned_attr(element, "type"),
                            });
                        }
                    }
                    "mods:roleTerm" => {
                        let Some(text) = element.inline_data.as_deref().or(division) else {
                            continue;
                        };
                        name.roles.push(Role {
                            text: text.to_string(),
                            type_attr: owned_attr(element, "type"),
                            authority: owned_attr(element, "authority"),
                        });
                    }
                    _ => {}
                }
            }
        }
        mods.names.push(name);
    }
}

/// Bare `<mods:namePart>` column: appends to the most recently added name.
fn bare_name_part(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
) -> Result<(), MapError> {
    let Some(text) = first_value(groups) else {
        return Ok(());
    };
    let name = mods.names.last_mut().ok_or(MapError::NoCurrentName)?;
    name.parts.push(NamePart {
        text: text.to_string(),
        type_attr: owned_attr(&path.base, "type"),
    });
    Ok(())
}

fn title_infos(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::TitleInfo) {
        mods.title_infos.clear();
    }
    for group in groups {
        let mut title = TitleInfo {
            type_attr: owned_attr(&path.base, "type"),
            label: owned_attr(&path.base, "displayLabel"),
            ..TitleInfo::default()
        };
        for (section, division) in path.sections.iter().zip(group.iter()) {
            if division.is_empty() {
                continue;
            }
            for element in section {
                match element.name.as_str() {
                    "mods:title" => title.title = Some(division.clone()),
                    "mods:nonSort" => title.non_sort = Some(division.clone()),
                    "mods:partName" => title.part_name = Some(division.clone()),
                    "mods:partNumber" => title.part_number = Some(division.clone()),
                    _ => {}
                }
            }
        }
        mods.title_infos.push(title);
    }
}

/// Sectioning is ignored for languages: one term per group, attributes
/// from the first section's languageTerm element.
fn languages(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::Language) {
        mods.languages.clear();
    }
    let term_spec = path.sections.first().and_then(|section| section.first());
    for group in groups {
        let Some(text) = group.first().filter(|t| !t.is_empty()) else {
            continue;
        };
        let mut term = LanguageTerm {
            text: text.clone(),
            ..LanguageTerm::default()
        };
        if let Some(spec) = term_spec {
            term.authority = owned_attr(spec, "authority");
            term.type_attr = owned_attr(spec, "type");
        }
        mods.languages.push(Language { term });
    }
}

fn genres(path: &MappingPath, groups: &[ValueGroup], mods: &mut Mods, cleared: &mut ClearedFields) {
    if cleared.first_touch(Category::Genre) {
        mods.genres.clear();
    }
    for group in groups {
        let Some(text) = group.first().filter(|t| !t.is_empty()) else {
            continue;
        };
        mods.genres.push(Genre {
            text: text.clone(),
            authority: owned_attr(&path.base, "authority"),
        });
    }
}

fn origin_info(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) -> Result<(), MapError> {
    if cleared.first_touch(Category::OriginInfo) {
        // Discard any inherited block; the singleton is rebuilt from here.
        mods.origin_info = Some(OriginInfo::default());
    }
    let origin = mods.origin_info.get_or_insert_with(OriginInfo::default);
    if let Some(label) = path.base.attribute("displayLabel") {
        origin.label = Some(label.to_string());
    }
    for group in groups {
        for (index, section) in path.sections.iter().enumerate() {
            let Some(division) = group.get(index).filter(|d| !d.is_empty()) else {
                continue;
            };
            let Some(head) = section.first() else {
                continue;
            };
            if let Some(kind) = DateKind::from_element_name(&head.name) {
                origin.dates.push(OriginDate {
                    kind,
                    value: division.clone(),
                    encoding: owned_attr(head, "encoding"),
                    point: owned_attr(head, "point"),
                    key_date: owned_attr(head, "keyDate"),
                });
            } else if head.name == "mods:place" {
                origin.places.push(Place {
                    term: division.clone(),
                });
            } else if head.name == "mods:publisher" {
                origin.publisher = Some(division.clone());
            } else {
                return Err(MapError::UnhandledOriginInfoElement {
                    element: head.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Singleton block; only the first group is consulted.
fn physical_description(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::PhysicalDescription) {
        mods.physical_description = Some(PhysicalDescription::default());
    }
    let physical = mods
        .physical_description
        .get_or_insert_with(PhysicalDescription::default);
    let Some(group) = groups.first() else { return };
    for (index, section) in path.sections.iter().enumerate() {
        let Some(division) = group.get(index).filter(|d| !d.is_empty()) else {
            continue;
        };
        match section.first().map(|e| e.name.as_str()) {
            Some("mods:extent") => physical.extent = Some(division.clone()),
            Some("mods:digitalOrigin") => physical.digital_origin = Some(division.clone()),
            Some("mods:note") => physical.note = Some(division.clone()),
            _ => {}
        }
    }
}

fn type_of_resource(groups: &[ValueGroup], mods: &mut Mods, cleared: &mut ClearedFields) {
    cleared.first_touch(Category::TypeOfResource);
    if let Some(value) = first_value(groups) {
        mods.resource_type = Some(value.to_string());
    }
}

fn abstract_text(groups: &[ValueGroup], mods: &mut Mods, cleared: &mut ClearedFields) {
    cleared.first_touch(Category::Abstract);
    if let Some(value) = first_value(groups) {
        mods.abstract_text = Some(value.to_string());
    }
}

fn notes(path: &MappingPath, groups: &[ValueGroup], mods: &mut Mods, cleared: &mut ClearedFields) {
    if cleared.first_touch(Category::Note) {
        mods.notes.clear();
    }
    for group in groups {
        let Some(text) = group.first().filter(|t| !t.is_empty()) else {
            continue;
        };
        mods.notes.push(Note {
            text: text.clone(),
            type_attr: owned_attr(&path.base, "type"),
            label: owned_attr(&path.base, "displayLabel"),
        });
    }
}

fn subjects(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::Subject) {
        mods.subjects.clear();
    }
    for group in groups {
        let mut subject = Subject {
            authority: owned_attr(&path.base, "authority"),
            ..Subject::default()
        };
        for (section, division) in path.sections.iter().zip(group.iter()) {
            let Some(head) = section.first() else {
                continue;
            };
            match head.name.as_str() {
                "mods:topic" => {
                    if !division.is_empty() {
                        subject.topics.push(division.clone());
                    }
                }
                "mods:temporal" => {
                    if !division.is_empty() {
                        subject.temporals.push(division.clone());
                    }
                }
                "mods:geographic" => {
                    // Inline path data wins; with neither inline data nor an
                    // aligned division the value is silently skipped.
                    let text = head
                        .inline_data
                        .clone()
                        .or_else(|| (!division.is_empty()).then(|| division.clone()));
                    if let Some(text) = text {
                        subject.geographic = Some(text);
                    }
                }
                "mods:hierarchicalGeographic" => {
                    subject.hierarchical_geographic =
                        Some(hierarchical_geographic(section, division));
                }
                _ => {}
            }
        }
        mods.subjects.push(subject);
    }
}

/// Country prefers inline path data; the state slot is only filled from
/// the division when the country was inline and a state element follows.
/// Otherwise the division is the country and state stays unset.
fn hierarchical_geographic(section: &[ElementSpec], division: &str) -> HierarchicalGeographic {
    let mut hg = HierarchicalGeographic::default();
    let Some(country) = section.get(1).filter(|e| e.name == "mods:country") else {
        return hg;
    };
    match &country.inline_data {
        Some(inline) => {
            hg.country = Some(inline.clone());
            let has_state = section.get(2).is_some_and(|e| e.name == "mods:state");
            if has_state && !division.is_empty() {
                hg.state = Some(division.to_string());
            }
        }
        None => {
            if !division.is_empty() {
                hg.country = Some(division.to_string());
            }
        }
    }
    hg
}

fn identifiers(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::Identifier) {
        mods.identifiers.clear();
    }
    for group in groups {
        let Some(text) = group.first().filter(|t| !t.is_empty()) else {
            continue;
        };
        mods.identifiers.push(Identifier {
            text: text.clone(),
            type_attr: owned_attr(&path.base, "type"),
            label: owned_attr(&path.base, "displayLabel"),
        });
    }
}

fn locations(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::Location) {
        mods.locations.clear();
    }
    for group in groups {
        let mut location = Location::default();
        for (section, division) in path.sections.iter().zip(group.iter()) {
            let Some(head) = section.first() else {
                continue;
            };
            let from_division = || (!division.is_empty()).then(|| division.clone());
            match head.name.as_str() {
                "mods:url" => {
                    if let Some(url) = head.inline_data.clone().or_else(from_division) {
                        location.url = Some(url);
                    }
                }
                "mods:physicalLocation" => {
                    if let Some(physical) = head.inline_data.clone().or_else(from_division) {
                        location.physical = Some(physical);
                    }
                }
                "mods:holdingSimple" => {
                    let nested_note = section
                        .get(1)
                        .is_some_and(|e| e.name == "mods:copyInformation")
                        && section.get(2).is_some_and(|e| e.name == "mods:note");
                    if nested_note && !division.is_empty() {
                        location.copy_note = Some(division.clone());
                    }
                }
                _ => {}
            }
        }
        mods.locations.push(location);
    }
}

fn related_items(
    path: &MappingPath,
    groups: &[ValueGroup],
    mods: &mut Mods,
    cleared: &mut ClearedFields,
) {
    if cleared.first_touch(Category::RelatedItem) {
        mods.related_items.clear();
    }
    let titled = path.sections.first().is_some_and(|section| {
        section.first().is_some_and(|e| e.name == "mods:titleInfo")
            && section.get(1).is_some_and(|e| e.name == "mods:title")
    });
    for group in groups {
        let mut related = RelatedItem {
            type_attr: owned_attr(&path.base, "type"),
            label: owned_attr(&path.base, "displayLabel"),
            title: None,
        };
        if titled {
            related.title = group.first().filter(|t| !t.is_empty()).cloned();
        }
        mods.related_items.push(related);
    }
}

/// First division of the first group, if non-empty.
fn first_value(groups: &[ValueGroup]) -> Option<&str> {
    groups
        .first()
        .and_then(|group| group.first())
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}

fn owned_attr(element: &ElementSpec, name: &str) -> Option<String> {
    element.attribute(name).map(ToString::to_string)
}
