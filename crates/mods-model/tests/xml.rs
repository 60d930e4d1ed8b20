//! Serialization and round-trip tests for the MODS document model.

use mods_model::{
    DateKind, Genre, HierarchicalGeographic, Identifier, Language, LanguageTerm, Location, Mods,
    Name, NamePart, Note, OriginDate, OriginInfo, PhysicalDescription, Place, RelatedItem, Role,
    Subject, TitleInfo,
};

#[test]
fn empty_document_serializes_to_bare_root() {
    let mods = Mods::new();
    let xml = mods.to_xml(true).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <mods:mods xmlns:mods=\"http://www.loc.gov/mods/v3\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://www.loc.gov/mods/ \
         http://www.loc.gov/standards/mods/v3/mods-3-4.xsd\"/>\n"
    );
}

#[test]
fn identifier_with_attributes() {
    let mut mods = Mods::new();
    mods.identifiers.push(Identifier {
        text: "1591".to_string(),
        type_attr: Some("local".to_string()),
        label: Some("Original no.".to_string()),
    });
    let xml = mods.to_xml(true).unwrap();
    assert!(
        xml.contains(
            "<mods:identifier type=\"local\" displayLabel=\"Original no.\">1591</mods:identifier>"
        ),
        "unexpected output: {xml}"
    );
}

#[test]
fn text_is_entity_escaped() {
    let mut mods = Mods::new();
    mods.notes.push(Note::new("Note 1&2"));
    mods.notes.push(Note::new("3<4"));
    let xml = mods.to_xml(true).unwrap();
    assert!(xml.contains("<mods:note>Note 1&amp;2</mods:note>"));
    assert!(xml.contains("<mods:note>3&lt;4</mods:note>"));
}

#[test]
fn name_with_role_nests_role_term() {
    let mut mods = Mods::new();
    mods.names.push(Name {
        type_attr: Some("personal".to_string()),
        parts: vec![NamePart::new("Smith")],
        roles: vec![Role {
            text: "creator".to_string(),
            type_attr: None,
            authority: None,
        }],
    });
    let xml = mods.to_xml(true).unwrap();
    assert!(xml.contains("<mods:name type=\"personal\">"));
    assert!(xml.contains("<mods:namePart>Smith</mods:namePart>"));
    assert!(xml.contains("<mods:role>"));
    assert!(xml.contains("<mods:roleTerm>creator</mods:roleTerm>"));
}

#[test]
fn origin_info_orders_dates_then_places_then_publisher() {
    let mut mods = Mods::new();
    mods.origin_info = Some(OriginInfo {
        label: Some("Publication".to_string()),
        dates: vec![OriginDate::new(DateKind::Other, "2010-01-31")],
        places: vec![Place {
            term: "Providence".to_string(),
        }],
        publisher: Some("Acme".to_string()),
    });
    let xml = mods.to_xml(true).unwrap();
    let date_pos = xml.find("<mods:dateOther>").unwrap();
    let place_pos = xml.find("<mods:place>").unwrap();
    let publisher_pos = xml.find("<mods:publisher>").unwrap();
    assert!(xml.contains("<mods:originInfo displayLabel=\"Publication\">"));
    assert!(date_pos < place_pos && place_pos < publisher_pos);
}

#[test]
fn location_copy_note_builds_holding_simple() {
    let mut mods = Mods::new();
    mods.locations.push(Location {
        url: None,
        physical: None,
        copy_note: Some("shelf 3".to_string()),
    });
    let xml = mods.to_xml(true).unwrap();
    let expected = "<mods:holdingSimple>\n      <mods:copyInformation>\n        \
                    <mods:note>shelf 3</mods:note>";
    assert!(xml.contains(expected), "unexpected output: {xml}");
}

fn full_document() -> Mods {
    let mut mods = Mods::new();
    mods.id = Some("test_1".to_string());
    mods.title_infos.push(TitleInfo {
        title: Some("Zen and the Art".to_string()),
        non_sort: Some("The".to_string()),
        part_name: Some("Part One".to_string()),
        part_number: Some("1".to_string()),
        type_attr: None,
        label: Some("Main".to_string()),
    });
    mods.names.push(Name {
        type_attr: Some("personal".to_string()),
        parts: vec![
            NamePart::new("Pirsig, Robert"),
            NamePart {
                text: "1928-2017".to_string(),
                type_attr: Some("date".to_string()),
            },
        ],
        roles: vec![Role {
            text: "author".to_string(),
            type_attr: Some("text".to_string()),
            authority: Some("marcrelator".to_string()),
        }],
    });
    mods.resource_type = Some("text".to_string());
    mods.genres.push(Genre {
        text: "memoir".to_string(),
        authority: Some("aat".to_string()),
    });
    mods.origin_info = Some(OriginInfo {
        label: None,
        dates: vec![{
            let mut date = OriginDate::new(DateKind::Created, "1974");
            date.encoding = Some("w3cdtf".to_string());
            date.key_date = Some("yes".to_string());
            date
        }],
        places: vec![Place {
            term: "New York".to_string(),
        }],
        publisher: Some("Morrow".to_string()),
    });
    mods.languages.push(Language {
        term: LanguageTerm {
            text: "eng".to_string(),
            authority: Some("iso639-2b".to_string()),
            type_attr: Some("code".to_string()),
        },
    });
    mods.physical_description = Some(PhysicalDescription {
        extent: Some("412 p.".to_string()),
        digital_origin: Some("born digital".to_string()),
        note: Some("hardcover".to_string()),
    });
    mods.abstract_text = Some("A road trip.".to_string());
    mods.notes.push(Note {
        text: "first edition".to_string(),
        type_attr: Some("provenance".to_string()),
        label: Some("Edition".to_string()),
    });
    mods.subjects.push(Subject {
        authority: Some("lcsh".to_string()),
        topics: vec!["Motorcycles".to_string(), "Philosophy".to_string()],
        temporals: vec!["1970s".to_string()],
        geographic: Some("United States".to_string()),
        hierarchical_geographic: Some(HierarchicalGeographic {
            country: Some("United States".to_string()),
            state: Some("Montana".to_string()),
        }),
    });
    mods.identifiers.push(Identifier {
        text: "321".to_string(),
        type_attr: Some("local".to_string()),
        label: Some("PN_DB_id".to_string()),
    });
    mods.locations.push(Location {
        url: Some("http://example.org/item/321".to_string()),
        physical: Some("Annex".to_string()),
        copy_note: Some("copy 2".to_string()),
    });
    mods.related_items.push(RelatedItem {
        type_attr: Some("series".to_string()),
        label: None,
        title: Some("Inquiry into Values".to_string()),
    });
    mods.related_items.push(RelatedItem {
        type_attr: Some("host".to_string()),
        label: Some("Collection".to_string()),
        title: None,
    });
    mods
}

#[test]
fn round_trip_preserves_full_document() {
    let mods = full_document();
    let xml = mods.to_xml(true).unwrap();
    let parsed = Mods::from_xml(&xml).unwrap();
    assert_eq!(parsed, mods);
}

#[test]
fn round_trip_compact_output() {
    let mods = full_document();
    let xml = mods.to_xml(false).unwrap();
    let parsed = Mods::from_xml(&xml).unwrap();
    assert_eq!(parsed, mods);
}

#[test]
fn round_trip_empty_document() {
    let xml = Mods::new().to_xml(true).unwrap();
    let parsed = Mods::from_xml(&xml).unwrap();
    assert_eq!(parsed, Mods::new());
}

#[test]
fn from_xml_decodes_entities() {
    let xml = "<mods:mods><mods:note>Note 1&amp;2 &lt;draft&gt;</mods:note></mods:mods>";
    let parsed = Mods::from_xml(xml).unwrap();
    assert_eq!(parsed.notes, vec![Note::new("Note 1&2 <draft>")]);
}

#[test]
fn round_trip_keeps_significant_whitespace() {
    // A nonSort particle carries its separating space in the data.
    let mut mods = Mods::new();
    mods.title_infos.push(TitleInfo {
        title: Some("Zen and the Art".to_string()),
        non_sort: Some("The ".to_string()),
        ..TitleInfo::default()
    });
    let xml = mods.to_xml(true).unwrap();
    let parsed = Mods::from_xml(&xml).unwrap();
    assert_eq!(parsed, mods);
    assert_eq!(parsed.title_infos[0].non_sort.as_deref(), Some("The "));
}

#[test]
fn from_xml_rejects_non_mods_root() {
    let err = Mods::from_xml("<html><body/></html>").unwrap_err();
    assert!(err.to_string().contains("expected mods:mods root"));
}

#[test]
fn from_xml_skips_unknown_elements() {
    let xml = "<mods:mods><mods:extension><foo>x</foo></mods:extension>\
               <mods:note>kept</mods:note></mods:mods>";
    let parsed = Mods::from_xml(xml).unwrap();
    assert_eq!(parsed.notes, vec![Note::new("kept")]);
}
