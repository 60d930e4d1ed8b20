//! Event-driven parsing of previously written MODS files.
//!
//! The reader handles exactly the element shapes [`Mods::to_xml`] emits.
//! Unknown elements inside `mods:mods` are skipped with a debug log so a
//! hand-edited parent file does not abort a child build.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::document::{
    DateKind, Genre, HierarchicalGeographic, Identifier, Language, Location, Mods, Name, NamePart,
    Note, OriginDate, OriginInfo, PhysicalDescription, Place, RelatedItem, Role, Subject,
    TitleInfo,
};
use crate::error::ModelError;

impl Mods {
    /// Parse a MODS document from XML text.
    ///
    /// Text content is taken verbatim. Whitespace between elements is
    /// ignored by the per-element loops, but inside a leaf element even
    /// leading or trailing spaces are significant (a `nonSort` of
    /// `"The "` keeps its trailing space).
    pub fn from_xml(text: &str) -> Result<Mods, ModelError> {
        let mut reader = Reader::from_str(text);
        let mut mods = Mods::new();
        let mut seen_root = false;
        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = tag_name(&e);
                    if seen_root {
                        parse_child(&mut reader, &mut mods, &name, &e)?;
                    } else {
                        if name != "mods:mods" {
                            return Err(ModelError::Structure(format!(
                                "expected mods:mods root, found {name}"
                            )));
                        }
                        mods.id = get_attr(&e, "ID");
                        seen_root = true;
                    }
                }
                Event::Empty(e) => {
                    let name = tag_name(&e);
                    if seen_root {
                        parse_empty_child(&mut mods, &name, &e);
                    } else {
                        if name != "mods:mods" {
                            return Err(ModelError::Structure(format!(
                                "expected mods:mods root, found {name}"
                            )));
                        }
                        mods.id = get_attr(&e, "ID");
                        seen_root = true;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }
        if !seen_root {
            return Err(ModelError::Structure("missing mods:mods root".into()));
        }
        Ok(mods)
    }
}

fn parse_child(
    reader: &mut Reader<&[u8]>,
    mods: &mut Mods,
    name: &str,
    start: &BytesStart<'_>,
) -> Result<(), ModelError> {
    match name {
        "mods:titleInfo" => {
            let title = parse_title_info(reader, start)?;
            mods.title_infos.push(title);
        }
        "mods:name" => {
            let entry = parse_name(reader, start)?;
            mods.names.push(entry);
        }
        "mods:typeOfResource" => mods.resource_type = Some(read_text(reader, name)?),
        "mods:genre" => {
            let authority = get_attr(start, "authority");
            let text = read_text(reader, name)?;
            mods.genres.push(Genre { text, authority });
        }
        "mods:originInfo" => {
            let origin = parse_origin_info(reader, start)?;
            mods.origin_info = Some(origin);
        }
        "mods:language" => {
            let language = parse_language(reader)?;
            mods.languages.push(language);
        }
        "mods:physicalDescription" => {
            let physical = parse_physical_description(reader)?;
            mods.physical_description = Some(physical);
        }
        "mods:abstract" => mods.abstract_text = Some(read_text(reader, name)?),
        "mods:note" => {
            let note = Note {
                type_attr: get_attr(start, "type"),
                label: get_attr(start, "displayLabel"),
                text: read_text(reader, name)?,
            };
            mods.notes.push(note);
        }
        "mods:subject" => {
            let subject = parse_subject(reader, start)?;
            mods.subjects.push(subject);
        }
        "mods:identifier" => {
            let identifier = Identifier {
                type_attr: get_attr(start, "type"),
                label: get_attr(start, "displayLabel"),
                text: read_text(reader, name)?,
            };
            mods.identifiers.push(identifier);
        }
        "mods:location" => {
            let location = parse_location(reader)?;
            mods.locations.push(location);
        }
        "mods:relatedItem" => {
            let mut related = related_item_from_attrs(start);
            parse_related_item_children(reader, &mut related)?;
            mods.related_items.push(related);
        }
        _ => {
            debug!(element = name, "skipping unrecognized element");
            skip_element(reader, name)?;
        }
    }
    Ok(())
}

fn parse_empty_child(mods: &mut Mods, name: &str, start: &BytesStart<'_>) {
    match name {
        "mods:relatedItem" => mods.related_items.push(related_item_from_attrs(start)),
        _ => debug!(element = name, "skipping unrecognized empty element"),
    }
}

fn related_item_from_attrs(start: &BytesStart<'_>) -> RelatedItem {
    RelatedItem {
        type_attr: get_attr(start, "type"),
        label: get_attr(start, "displayLabel"),
        title: None,
    }
}

fn parse_title_info(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<TitleInfo, ModelError> {
    let mut title = TitleInfo {
        type_attr: get_attr(start, "type"),
        label: get_attr(start, "displayLabel"),
        ..TitleInfo::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:title" => title.title = Some(read_text(reader, &child)?),
                    "mods:nonSort" => title.non_sort = Some(read_text(reader, &child)?),
                    "mods:partName" => title.part_name = Some(read_text(reader, &child)?),
                    "mods:partNumber" => title.part_number = Some(read_text(reader, &child)?),
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:titleInfo" => return Ok(title),
            Event::Eof => return Err(unterminated("mods:titleInfo")),
            _ => {}
        }
    }
}

fn parse_name(reader: &mut Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Name, ModelError> {
    let mut name = Name {
        type_attr: get_attr(start, "type"),
        ..Name::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:namePart" => {
                        let type_attr = get_attr(&e, "type");
                        let text = read_text(reader, &child)?;
                        name.parts.push(NamePart { text, type_attr });
                    }
                    "mods:role" => {
                        if let Some(role) = parse_role(reader)? {
                            name.roles.push(role);
                        }
                    }
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:name" => return Ok(name),
            Event::Eof => return Err(unterminated("mods:name")),
            _ => {}
        }
    }
}

fn parse_role(reader: &mut Reader<&[u8]>) -> Result<Option<Role>, ModelError> {
    let mut role = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                if child == "mods:roleTerm" {
                    let type_attr = get_attr(&e, "type");
                    let authority = get_attr(&e, "authority");
                    let text = read_text(reader, &child)?;
                    role = Some(Role {
                        text,
                        type_attr,
                        authority,
                    });
                } else {
                    skip_element(reader, &child)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:role" => return Ok(role),
            Event::Eof => return Err(unterminated("mods:role")),
            _ => {}
        }
    }
}

fn parse_origin_info(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<OriginInfo, ModelError> {
    let mut origin = OriginInfo {
        label: get_attr(start, "displayLabel"),
        ..OriginInfo::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                if let Some(kind) = DateKind::from_element_name(&child) {
                    let encoding = get_attr(&e, "encoding");
                    let point = get_attr(&e, "point");
                    let key_date = get_attr(&e, "keyDate");
                    let value = read_text(reader, &child)?;
                    origin.dates.push(OriginDate {
                        kind,
                        value,
                        encoding,
                        point,
                        key_date,
                    });
                } else if child == "mods:place" {
                    if let Some(term) = parse_place_term(reader)? {
                        origin.places.push(Place { term });
                    }
                } else if child == "mods:publisher" {
                    origin.publisher = Some(read_text(reader, &child)?);
                } else {
                    skip_element(reader, &child)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:originInfo" => return Ok(origin),
            Event::Eof => return Err(unterminated("mods:originInfo")),
            _ => {}
        }
    }
}

fn parse_place_term(reader: &mut Reader<&[u8]>) -> Result<Option<String>, ModelError> {
    let mut term = None;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                if child == "mods:placeTerm" {
                    term = Some(read_text(reader, &child)?);
                } else {
                    skip_element(reader, &child)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:place" => return Ok(term),
            Event::Eof => return Err(unterminated("mods:place")),
            _ => {}
        }
    }
}

fn parse_language(reader: &mut Reader<&[u8]>) -> Result<Language, ModelError> {
    let mut language = Language::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                if child == "mods:languageTerm" {
                    language.term.authority = get_attr(&e, "authority");
                    language.term.type_attr = get_attr(&e, "type");
                    language.term.text = read_text(reader, &child)?;
                } else {
                    skip_element(reader, &child)?;
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:language" => return Ok(language),
            Event::Eof => return Err(unterminated("mods:language")),
            _ => {}
        }
    }
}

fn parse_physical_description(
    reader: &mut Reader<&[u8]>,
) -> Result<PhysicalDescription, ModelError> {
    let mut physical = PhysicalDescription::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:extent" => physical.extent = Some(read_text(reader, &child)?),
                    "mods:digitalOrigin" => {
                        physical.digital_origin = Some(read_text(reader, &child)?);
                    }
                    "mods:note" => physical.note = Some(read_text(reader, &child)?),
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:physicalDescription" => {
                return Ok(physical);
            }
            Event::Eof => return Err(unterminated("mods:physicalDescription")),
            _ => {}
        }
    }
}

fn parse_subject(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Subject, ModelError> {
    let mut subject = Subject {
        authority: get_attr(start, "authority"),
        ..Subject::default()
    };
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:topic" => subject.topics.push(read_text(reader, &child)?),
                    "mods:temporal" => subject.temporals.push(read_text(reader, &child)?),
                    "mods:geographic" => subject.geographic = Some(read_text(reader, &child)?),
                    "mods:hierarchicalGeographic" => {
                        subject.hierarchical_geographic =
                            Some(parse_hierarchical_geographic(reader)?);
                    }
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:subject" => return Ok(subject),
            Event::Eof => return Err(unterminated("mods:subject")),
            _ => {}
        }
    }
}

fn parse_hierarchical_geographic(
    reader: &mut Reader<&[u8]>,
) -> Result<HierarchicalGeographic, ModelError> {
    let mut hg = HierarchicalGeographic::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:country" => hg.country = Some(read_text(reader, &child)?),
                    "mods:state" => hg.state = Some(read_text(reader, &child)?),
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) if e.name().as_ref() == b"mods:hierarchicalGeographic" => return Ok(hg),
            Event::Eof => return Err(unterminated("mods:hierarchicalGeographic")),
            _ => {}
        }
    }
}

fn parse_location(reader: &mut Reader<&[u8]>) -> Result<Location, ModelError> {
    let mut location = Location::default();
    let mut depth = 0usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:url" => location.url = Some(read_text(reader, &child)?),
                    "mods:physicalLocation" => {
                        location.physical = Some(read_text(reader, &child)?);
                    }
                    // Descend through holdingSimple/copyInformation to the note.
                    "mods:holdingSimple" | "mods:copyInformation" => depth += 1,
                    "mods:note" if depth > 0 => {
                        location.copy_note = Some(read_text(reader, &child)?);
                    }
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"mods:location" => return Ok(location),
                b"mods:holdingSimple" | b"mods:copyInformation" => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => return Err(unterminated("mods:location")),
            _ => {}
        }
    }
}

fn parse_related_item_children(
    reader: &mut Reader<&[u8]>,
    related: &mut RelatedItem,
) -> Result<(), ModelError> {
    let mut in_title_info = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let child = tag_name(&e);
                match child.as_str() {
                    "mods:titleInfo" => in_title_info = true,
                    "mods:title" if in_title_info => {
                        related.title = Some(read_text(reader, &child)?);
                    }
                    _ => skip_element(reader, &child)?,
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"mods:relatedItem" => return Ok(()),
                b"mods:titleInfo" => in_title_info = false,
                _ => {}
            },
            Event::Eof => return Err(unterminated("mods:relatedItem")),
            _ => {}
        }
    }
}

/// Accumulate text content until the matching end tag.
fn read_text(reader: &mut Reader<&[u8]>, name: &str) -> Result<String, ModelError> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let chunk = e
                    .xml_content()
                    .map_err(|err| ModelError::Structure(format!("bad text in {name}: {err}")))?;
                text.push_str(&chunk);
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e
                    .resolve_char_ref()
                    .map_err(|err| ModelError::Structure(format!("bad text in {name}: {err}")))?
                {
                    text.push(ch);
                } else {
                    let entity = e.decode().map_err(|err| {
                        ModelError::Structure(format!("bad text in {name}: {err}"))
                    })?;
                    match resolve_predefined_entity(&entity) {
                        Some(resolved) => text.push_str(resolved),
                        None => {
                            return Err(ModelError::Structure(format!(
                                "unknown entity &{entity}; in {name}"
                            )));
                        }
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == name.as_bytes() => return Ok(text),
            Event::Eof => return Err(unterminated(name)),
            _ => {}
        }
    }
}

/// Skip a subtree we do not model, tracking nesting of the same name.
fn skip_element(reader: &mut Reader<&[u8]>, name: &str) -> Result<(), ModelError> {
    let mut depth = 1usize;
    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == name.as_bytes() => depth += 1,
            Event::End(e) if e.name().as_ref() == name.as_bytes() => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err(unterminated(name)),
            _ => {}
        }
    }
}

fn unterminated(name: &str) -> ModelError {
    ModelError::Structure(format!("unterminated element {name}"))
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

fn get_attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}
