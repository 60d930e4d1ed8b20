//! MODS XML serialization via quick-xml.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::document::{
    Location, Mods, Name, OriginInfo, PhysicalDescription, RelatedItem, Subject, TitleInfo,
};
use crate::error::ModelError;
use crate::{MODS_NS, MODS_SCHEMA_LOCATION, XSI_NS};

impl Mods {
    /// Serialize the document to MODS v3 XML.
    ///
    /// With `pretty` set, output is indented with two spaces, matching the
    /// layout of files this tool writes to disk.
    pub fn to_xml(&self, pretty: bool) -> Result<String, ModelError> {
        let mut xml = if pretty {
            Writer::new_with_indent(Vec::new(), b' ', 2)
        } else {
            Writer::new(Vec::new())
        };
        write_document(&mut xml, self)?;
        let mut out = String::from_utf8(xml.into_inner())?;
        out.push('\n');
        Ok(out)
    }
}

fn write_document<W: Write>(xml: &mut Writer<W>, mods: &Mods) -> Result<(), ModelError> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut root = BytesStart::new("mods:mods");
    root.push_attribute(("xmlns:mods", MODS_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute(("xsi:schemaLocation", MODS_SCHEMA_LOCATION));
    if let Some(id) = &mods.id {
        root.push_attribute(("ID", id.as_str()));
    }
    let bare = Mods {
        id: mods.id.clone(),
        ..Mods::default()
    };
    if *mods == bare {
        // Nothing but the root: emit a self-closing element.
        xml.write_event(Event::Empty(root))?;
        return Ok(());
    }
    xml.write_event(Event::Start(root))?;

    for title in &mods.title_infos {
        write_title_info(xml, title)?;
    }
    for name in &mods.names {
        write_name(xml, name)?;
    }
    if let Some(resource_type) = &mods.resource_type {
        text_element(xml, "mods:typeOfResource", &[], resource_type)?;
    }
    for genre in &mods.genres {
        text_element(
            xml,
            "mods:genre",
            &[("authority", genre.authority.as_deref())],
            &genre.text,
        )?;
    }
    if let Some(origin_info) = &mods.origin_info {
        write_origin_info(xml, origin_info)?;
    }
    for language in &mods.languages {
        xml.write_event(Event::Start(BytesStart::new("mods:language")))?;
        text_element(
            xml,
            "mods:languageTerm",
            &[
                ("authority", language.term.authority.as_deref()),
                ("type", language.term.type_attr.as_deref()),
            ],
            &language.term.text,
        )?;
        xml.write_event(Event::End(BytesEnd::new("mods:language")))?;
    }
    if let Some(physical) = &mods.physical_description {
        write_physical_description(xml, physical)?;
    }
    if let Some(abstract_text) = &mods.abstract_text {
        text_element(xml, "mods:abstract", &[], abstract_text)?;
    }
    for note in &mods.notes {
        text_element(
            xml,
            "mods:note",
            &[
                ("type", note.type_attr.as_deref()),
                ("displayLabel", note.label.as_deref()),
            ],
            &note.text,
        )?;
    }
    for subject in &mods.subjects {
        write_subject(xml, subject)?;
    }
    for identifier in &mods.identifiers {
        text_element(
            xml,
            "mods:identifier",
            &[
                ("type", identifier.type_attr.as_deref()),
                ("displayLabel", identifier.label.as_deref()),
            ],
            &identifier.text,
        )?;
    }
    for location in &mods.locations {
        write_location(xml, location)?;
    }
    for related in &mods.related_items {
        write_related_item(xml, related)?;
    }

    xml.write_event(Event::End(BytesEnd::new("mods:mods")))?;
    Ok(())
}

fn write_title_info<W: Write>(xml: &mut Writer<W>, title: &TitleInfo) -> Result<(), ModelError> {
    let mut start = BytesStart::new("mods:titleInfo");
    if let Some(type_attr) = &title.type_attr {
        start.push_attribute(("type", type_attr.as_str()));
    }
    if let Some(label) = &title.label {
        start.push_attribute(("displayLabel", label.as_str()));
    }
    xml.write_event(Event::Start(start))?;
    if let Some(non_sort) = &title.non_sort {
        text_element(xml, "mods:nonSort", &[], non_sort)?;
    }
    if let Some(text) = &title.title {
        text_element(xml, "mods:title", &[], text)?;
    }
    if let Some(part_number) = &title.part_number {
        text_element(xml, "mods:partNumber", &[], part_number)?;
    }
    if let Some(part_name) = &title.part_name {
        text_element(xml, "mods:partName", &[], part_name)?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:titleInfo")))?;
    Ok(())
}

fn write_name<W: Write>(xml: &mut Writer<W>, name: &Name) -> Result<(), ModelError> {
    let mut start = BytesStart::new("mods:name");
    if let Some(type_attr) = &name.type_attr {
        start.push_attribute(("type", type_attr.as_str()));
    }
    xml.write_event(Event::Start(start))?;
    for part in &name.parts {
        text_element(
            xml,
            "mods:namePart",
            &[("type", part.type_attr.as_deref())],
            &part.text,
        )?;
    }
    for role in &name.roles {
        xml.write_event(Event::Start(BytesStart::new("mods:role")))?;
        text_element(
            xml,
            "mods:roleTerm",
            &[
                ("type", role.type_attr.as_deref()),
                ("authority", role.authority.as_deref()),
            ],
            &role.text,
        )?;
        xml.write_event(Event::End(BytesEnd::new("mods:role")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:name")))?;
    Ok(())
}

fn write_origin_info<W: Write>(xml: &mut Writer<W>, origin: &OriginInfo) -> Result<(), ModelError> {
    let mut start = BytesStart::new("mods:originInfo");
    if let Some(label) = &origin.label {
        start.push_attribute(("displayLabel", label.as_str()));
    }
    xml.write_event(Event::Start(start))?;
    for date in &origin.dates {
        text_element(
            xml,
            date.kind.element_name(),
            &[
                ("encoding", date.encoding.as_deref()),
                ("point", date.point.as_deref()),
                ("keyDate", date.key_date.as_deref()),
            ],
            &date.value,
        )?;
    }
    for place in &origin.places {
        xml.write_event(Event::Start(BytesStart::new("mods:place")))?;
        text_element(xml, "mods:placeTerm", &[], &place.term)?;
        xml.write_event(Event::End(BytesEnd::new("mods:place")))?;
    }
    if let Some(publisher) = &origin.publisher {
        text_element(xml, "mods:publisher", &[], publisher)?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:originInfo")))?;
    Ok(())
}

fn write_physical_description<W: Write>(
    xml: &mut Writer<W>,
    physical: &PhysicalDescription,
) -> Result<(), ModelError> {
    xml.write_event(Event::Start(BytesStart::new("mods:physicalDescription")))?;
    if let Some(extent) = &physical.extent {
        text_element(xml, "mods:extent", &[], extent)?;
    }
    if let Some(digital_origin) = &physical.digital_origin {
        text_element(xml, "mods:digitalOrigin", &[], digital_origin)?;
    }
    if let Some(note) = &physical.note {
        text_element(xml, "mods:note", &[], note)?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:physicalDescription")))?;
    Ok(())
}

fn write_subject<W: Write>(xml: &mut Writer<W>, subject: &Subject) -> Result<(), ModelError> {
    let mut start = BytesStart::new("mods:subject");
    if let Some(authority) = &subject.authority {
        start.push_attribute(("authority", authority.as_str()));
    }
    xml.write_event(Event::Start(start))?;
    for topic in &subject.topics {
        text_element(xml, "mods:topic", &[], topic)?;
    }
    for temporal in &subject.temporals {
        text_element(xml, "mods:temporal", &[], temporal)?;
    }
    if let Some(geographic) = &subject.geographic {
        text_element(xml, "mods:geographic", &[], geographic)?;
    }
    if let Some(hg) = &subject.hierarchical_geographic {
        xml.write_event(Event::Start(BytesStart::new("mods:hierarchicalGeographic")))?;
        if let Some(country) = &hg.country {
            text_element(xml, "mods:country", &[], country)?;
        }
        if let Some(state) = &hg.state {
            text_element(xml, "mods:state", &[], state)?;
        }
        xml.write_event(Event::End(BytesEnd::new("mods:hierarchicalGeographic")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:subject")))?;
    Ok(())
}

fn write_location<W: Write>(xml: &mut Writer<W>, location: &Location) -> Result<(), ModelError> {
    xml.write_event(Event::Start(BytesStart::new("mods:location")))?;
    if let Some(physical) = &location.physical {
        text_element(xml, "mods:physicalLocation", &[], physical)?;
    }
    if let Some(url) = &location.url {
        text_element(xml, "mods:url", &[], url)?;
    }
    if let Some(copy_note) = &location.copy_note {
        xml.write_event(Event::Start(BytesStart::new("mods:holdingSimple")))?;
        xml.write_event(Event::Start(BytesStart::new("mods:copyInformation")))?;
        text_element(xml, "mods:note", &[], copy_note)?;
        xml.write_event(Event::End(BytesEnd::new("mods:copyInformation")))?;
        xml.write_event(Event::End(BytesEnd::new("mods:holdingSimple")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("mods:location")))?;
    Ok(())
}

fn write_related_item<W: Write>(xml: &mut Writer<W>, related: &RelatedItem) -> Result<(), ModelError> {
    let mut start = BytesStart::new("mods:relatedItem");
    if let Some(type_attr) = &related.type_attr {
        start.push_attribute(("type", type_attr.as_str()));
    }
    if let Some(label) = &related.label {
        start.push_attribute(("displayLabel", label.as_str()));
    }
    match &related.title {
        Some(title) => {
            xml.write_event(Event::Start(start))?;
            xml.write_event(Event::Start(BytesStart::new("mods:titleInfo")))?;
            text_element(xml, "mods:title", &[], title)?;
            xml.write_event(Event::End(BytesEnd::new("mods:titleInfo")))?;
            xml.write_event(Event::End(BytesEnd::new("mods:relatedItem")))?;
        }
        None => xml.write_event(Event::Empty(start))?,
    }
    Ok(())
}

/// Write `<name attr="...">text</name>`, skipping attributes that are `None`.
fn text_element<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, Option<&str>)],
    text: &str,
) -> Result<(), ModelError> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        if let Some(value) = value {
            start.push_attribute((*key, *value));
        }
    }
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
