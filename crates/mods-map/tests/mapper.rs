//! End-to-end mapping behavior, one column at a time.

use mods_map::{FieldAssignment, MapError, Mapper, Record, assemble};
use mods_model::{DateKind, Mods};

fn mapped(columns: &[(&str, &str)]) -> Mods {
    let mut mapper = Mapper::new();
    for (path, value) in columns {
        mapper.add_data(path, value).unwrap();
    }
    mapper.into_mods()
}

#[test]
fn identifier_with_type_and_label() {
    let mods = mapped(&[(
        "<mods:identifier type=\"local\" displayLabel=\"Original no.\">",
        "1591",
    )]);
    assert_eq!(mods.identifiers.len(), 1);
    let identifier = &mods.identifiers[0];
    assert_eq!(identifier.text, "1591");
    assert_eq!(identifier.type_attr.as_deref(), Some("local"));
    assert_eq!(identifier.label.as_deref(), Some("Original no."));
}

#[test]
fn document_id_requires_id_attribute() {
    let mods = mapped(&[("<mods:mods ID=\"\">", "ab123")]);
    assert_eq!(mods.id.as_deref(), Some("ab123"));

    let mods = mapped(&[("<mods:mods>", "ab123")]);
    assert_eq!(mods.id, None);
}

#[test]
fn name_with_role_section_multi_entry() {
    // First entry fills both sections, second entry has no role division.
    let mods = mapped(&[(
        "<mods:name type=\"personal\"><mods:namePart>#<mods:role><mods:roleTerm>",
        "Smith#creator||Jones, T.",
    )]);
    assert_eq!(mods.names.len(), 2);

    let smith = &mods.names[0];
    assert_eq!(smith.type_attr.as_deref(), Some("personal"));
    assert_eq!(smith.parts.len(), 1);
    assert_eq!(smith.parts[0].text, "Smith");
    assert_eq!(smith.roles.len(), 1);
    assert_eq!(smith.roles[0].text, "creator");

    let jones = &mods.names[1];
    assert_eq!(jones.parts[0].text, "Jones, T.");
    assert!(jones.roles.is_empty());
}

#[test]
fn role_from_inline_path_data_needs_no_division() {
    let mods = mapped(&[(
        "<mods:name><mods:namePart>#<mods:role><mods:roleTerm type=\"text\" authority=\"marcrelator\">creator",
        "Smith",
    )]);
    let name = &mods.names[0];
    assert_eq!(name.parts[0].text, "Smith");
    assert_eq!(name.roles.len(), 1);
    assert_eq!(name.roles[0].text, "creator");
    assert_eq!(name.roles[0].type_attr.as_deref(), Some("text"));
    assert_eq!(name.roles[0].authority.as_deref(), Some("marcrelator"));
}

#[test]
fn typed_name_parts_align_to_sections() {
    let mods = mapped(&[(
        "<mods:name type=\"personal\"><mods:namePart>#<mods:namePart type=\"date\">#<mods:namePart type=\"termsOfAddress\">",
        "Smith, Jan#1900-1980#Dr.",
    )]);
    let name = &mods.names[0];
    assert_eq!(name.parts.len(), 3);
    assert_eq!(name.parts[0].type_attr, None);
    assert_eq!(name.parts[1].type_attr.as_deref(), Some("date"));
    assert_eq!(name.parts[1].text, "1900-1980");
    assert_eq!(name.parts[2].type_attr.as_deref(), Some("termsOfAddress"));
}

#[test]
fn missing_trailing_division_skips_section() {
    let mods = mapped(&[(
        "<mods:name><mods:namePart>#<mods:namePart type=\"date\">",
        "Smith",
    )]);
    let name = &mods.names[0];
    assert_eq!(name.parts.len(), 1);
    assert_eq!(name.parts[0].text, "Smith");
}

#[test]
fn bare_name_part_appends_to_last_name() {
    let mods = mapped(&[
        ("<mods:name type=\"personal\"><mods:namePart>", "Smith"),
        ("<mods:namePart type=\"date\">", "1900-1980"),
    ]);
    let name = &mods.names[0];
    assert_eq!(name.parts.len(), 2);
    assert_eq!(name.parts[1].text, "1900-1980");
    assert_eq!(name.parts[1].type_attr.as_deref(), Some("date"));
}

#[test]
fn bare_name_part_without_name_fails() {
    let mut mapper = Mapper::new();
    let err = mapper.add_data("<mods:namePart>", "1900-1980").unwrap_err();
    assert_eq!(err, MapError::NoCurrentName);
}

#[test]
fn title_sections_fill_title_fields() {
    let mods = mapped(&[(
        "<mods:titleInfo displayLabel=\"Main\"><mods:title>#<mods:partName>#<mods:partNumber>",
        "Survey Records#Geology#3",
    )]);
    let title = &mods.title_infos[0];
    assert_eq!(title.label.as_deref(), Some("Main"));
    assert_eq!(title.title.as_deref(), Some("Survey Records"));
    assert_eq!(title.part_name.as_deref(), Some("Geology"));
    assert_eq!(title.part_number.as_deref(), Some("3"));
}

#[test]
fn unsectioned_title_keeps_divider_characters() {
    // No '#' in the path, so '#' in the data stays literal.
    let mods = mapped(&[("<mods:titleInfo><mods:title>", "é. #1 Test")]);
    assert_eq!(mods.title_infos[0].title.as_deref(), Some("é. #1 Test"));
}

#[test]
fn escaped_divider_in_sectioned_value() {
    let mods = mapped(&[(
        "<mods:titleInfo><mods:title>#<mods:partNumber>",
        "No. \\#1 Issue#3",
    )]);
    let title = &mods.title_infos[0];
    assert_eq!(title.title.as_deref(), Some("No. #1 Issue"));
    assert_eq!(title.part_number.as_deref(), Some("3"));
}

#[test]
fn language_term_attributes_from_path() {
    let mods = mapped(&[(
        "<mods:language><mods:languageTerm authority=\"iso639-2b\" type=\"code\">",
        "eng||fre",
    )]);
    assert_eq!(mods.languages.len(), 2);
    assert_eq!(mods.languages[0].term.text, "eng");
    assert_eq!(
        mods.languages[0].term.authority.as_deref(),
        Some("iso639-2b")
    );
    assert_eq!(mods.languages[1].term.text, "fre");
    assert_eq!(mods.languages[1].term.type_attr.as_deref(), Some("code"));
}

#[test]
fn genre_with_authority() {
    let mods = mapped(&[("<mods:genre authority=\"aat\">", "Programming Tests")]);
    assert_eq!(mods.genres[0].text, "Programming Tests");
    assert_eq!(mods.genres[0].authority.as_deref(), Some("aat"));
}

#[test]
fn origin_info_dates_places_publisher() {
    let mods = mapped(&[
        (
            "<mods:originInfo displayLabel=\"Publication\"><mods:dateCreated encoding=\"w3cdtf\" keyDate=\"yes\">#<mods:place>#<mods:publisher>",
            "1899-07-13#Providence#Hammond",
        ),
        ("<mods:originInfo><mods:dateOther>", "2010-01-31"),
    ]);
    let origin = mods.origin_info.as_ref().unwrap();
    assert_eq!(origin.label.as_deref(), Some("Publication"));
    assert_eq!(origin.dates.len(), 2);
    assert_eq!(origin.dates[0].kind, DateKind::Created);
    assert_eq!(origin.dates[0].value, "1899-07-13");
    assert_eq!(origin.dates[0].encoding.as_deref(), Some("w3cdtf"));
    assert_eq!(origin.dates[0].key_date.as_deref(), Some("yes"));
    assert_eq!(origin.dates[1].kind, DateKind::Other);
    assert_eq!(origin.places[0].term, "Providence");
    assert_eq!(origin.publisher.as_deref(), Some("Hammond"));
}

#[test]
fn origin_info_rejects_unknown_section_element() {
    let mut mapper = Mapper::new();
    let err = mapper
        .add_data("<mods:originInfo><mods:frequency>", "weekly")
        .unwrap_err();
    assert_eq!(
        err,
        MapError::UnhandledOriginInfoElement {
            element: "mods:frequency".to_string()
        }
    );
}

#[test]
fn physical_description_sections() {
    let mods = mapped(&[(
        "<mods:physicalDescription><mods:extent>#<mods:digitalOrigin>#<mods:note>",
        "1 map#reformatted digital#color",
    )]);
    let physical = mods.physical_description.as_ref().unwrap();
    assert_eq!(physical.extent.as_deref(), Some("1 map"));
    assert_eq!(physical.digital_origin.as_deref(), Some("reformatted digital"));
    assert_eq!(physical.note.as_deref(), Some("color"));
}

#[test]
fn type_of_resource_last_write_wins() {
    let mods = mapped(&[
        ("<mods:typeOfResource>", "text"),
        ("<mods:typeOfResource>", "cartographic"),
    ]);
    assert_eq!(mods.resource_type.as_deref(), Some("cartographic"));
}

#[test]
fn abstract_is_singleton_text() {
    let mods = mapped(&[("<mods:abstract>", "A road trip.")]);
    assert_eq!(mods.abstract_text.as_deref(), Some("A road trip."));
}

#[test]
fn notes_accumulate_across_columns() {
    let mods = mapped(&[
        ("<mods:note type=\"general\">", "Note 1&2"),
        ("<mods:note>", "another note"),
    ]);
    assert_eq!(mods.notes.len(), 2);
    assert_eq!(mods.notes[0].text, "Note 1&2");
    assert_eq!(mods.notes[0].type_attr.as_deref(), Some("general"));
    assert_eq!(mods.notes[1].text, "another note");
}

#[test]
fn subject_reset_happens_once_per_record() {
    // Two columns both target mods:subject; the second must append,
    // not wipe the first one's entries.
    let mods = mapped(&[
        ("<mods:subject><mods:topic>", "PROGRAMMING || Testing"),
        ("<mods:subject><mods:topic>", "Recursion"),
        ("<mods:subject><mods:geographic>", "United States"),
    ]);
    assert_eq!(mods.subjects.len(), 4);
    assert_eq!(mods.subjects[0].topics, vec!["PROGRAMMING"]);
    assert_eq!(mods.subjects[1].topics, vec!["Testing"]);
    assert_eq!(mods.subjects[2].topics, vec!["Recursion"]);
    assert_eq!(mods.subjects[3].geographic.as_deref(), Some("United States"));
}

#[test]
fn sectioned_subject_path_accepts_dividerless_entry() {
    let mods = mapped(&[(
        "<mods:subject><mods:topic>#<mods:temporal>",
        "Testing || Software#1990s",
    )]);
    assert_eq!(mods.subjects.len(), 2);
    // First entry has no divider: the whole entry is the first division.
    assert_eq!(mods.subjects[0].topics, vec!["Testing"]);
    assert!(mods.subjects[0].temporals.is_empty());
    assert_eq!(mods.subjects[1].topics, vec!["Software"]);
    assert_eq!(mods.subjects[1].temporals, vec!["1990s"]);
}

#[test]
fn subject_geographic_prefers_inline_data() {
    let mods = mapped(&[(
        "<mods:subject><mods:geographic>United States</mods:geographic>",
        "ignored division",
    )]);
    assert_eq!(mods.subjects[0].geographic.as_deref(), Some("United States"));
}

#[test]
fn hierarchical_geographic_inline_country_with_state_division() {
    let mods = mapped(&[(
        "<mods:subject><mods:hierarchicalGeographic><mods:country>United States</mods:country><mods:state>",
        "Rhode Island",
    )]);
    let hg = mods.subjects[0].hierarchical_geographic.as_ref().unwrap();
    assert_eq!(hg.country.as_deref(), Some("United States"));
    assert_eq!(hg.state.as_deref(), Some("Rhode Island"));
}

#[test]
fn hierarchical_geographic_division_country_leaves_state_unset() {
    let mods = mapped(&[(
        "<mods:subject><mods:hierarchicalGeographic><mods:country>",
        "Canada",
    )]);
    let hg = mods.subjects[0].hierarchical_geographic.as_ref().unwrap();
    assert_eq!(hg.country.as_deref(), Some("Canada"));
    assert_eq!(hg.state, None);
}

#[test]
fn location_url_and_nested_copy_note() {
    let mods = mapped(&[(
        "<mods:location><mods:physicalLocation>#<mods:holdingSimple><mods:copyInformation><mods:note>",
        "Annex#shelf 3",
    )]);
    let location = &mods.locations[0];
    assert_eq!(location.physical.as_deref(), Some("Annex"));
    assert_eq!(location.copy_note.as_deref(), Some("shelf 3"));
}

#[test]
fn location_url_prefers_inline_data() {
    let mods = mapped(&[(
        "<mods:location><mods:url>http://example.org/fixed</mods:url>",
        "http://example.org/from-data",
    )]);
    assert_eq!(
        mods.locations[0].url.as_deref(),
        Some("http://example.org/fixed")
    );
}

#[test]
fn related_item_takes_title_from_first_division() {
    let mods = mapped(&[(
        "<mods:relatedItem type=\"series\"><mods:titleInfo><mods:title>",
        "Maps of Providence||Atlases",
    )]);
    assert_eq!(mods.related_items.len(), 2);
    assert_eq!(mods.related_items[0].type_attr.as_deref(), Some("series"));
    assert_eq!(
        mods.related_items[0].title.as_deref(),
        Some("Maps of Providence")
    );
    assert_eq!(mods.related_items[1].title.as_deref(), Some("Atlases"));
}

#[test]
fn malformed_path_is_rejected() {
    let mut mapper = Mapper::new();
    let err = mapper.add_data("asdf1234", "value").unwrap_err();
    assert!(matches!(err, MapError::MalformedPath { .. }));
}

#[test]
fn unknown_base_element_is_rejected() {
    let mut mapper = Mapper::new();
    let err = mapper.add_data("<mods:classification>", "QA76").unwrap_err();
    assert_eq!(
        err,
        MapError::UnhandledElement {
            element: "mods:classification".to_string()
        }
    );
}

#[test]
fn custom_separator() {
    let mut mapper = Mapper::new().with_separator("|");
    mapper
        .add_data("<mods:subject><mods:topic>", "PROGRAMMING | Testing")
        .unwrap();
    let mods = mapper.into_mods();
    assert_eq!(mods.subjects.len(), 2);
}

#[test]
fn merge_mode_overrides_touched_categories_only() {
    // Parent has a title and two subjects.
    let mut parent_mapper = Mapper::new();
    parent_mapper
        .add_data("<mods:titleInfo><mods:title>", "Parent Title")
        .unwrap();
    parent_mapper
        .add_data("<mods:subject><mods:topic>", "Old One || Old Two")
        .unwrap();
    let parent = parent_mapper.into_mods();

    // Child overrides subjects across two columns, never touches titles.
    let mut child_mapper = Mapper::with_parent(parent.clone());
    child_mapper
        .add_data("<mods:subject><mods:topic>", "New One")
        .unwrap();
    child_mapper
        .add_data("<mods:subject><mods:topic>", "New Two")
        .unwrap();
    let child = child_mapper.into_mods();

    assert_eq!(child.title_infos, parent.title_infos);
    let topics: Vec<&str> = child
        .subjects
        .iter()
        .flat_map(|s| s.topics.iter().map(String::as_str))
        .collect();
    assert_eq!(topics, vec!["New One", "New Two"]);
}

#[test]
fn merge_round_trip_through_xml() {
    // Serialize a parent, reload it, and build a child that does not
    // touch titles: the title must come through unchanged.
    let mut parent_mapper = Mapper::new();
    parent_mapper
        .add_data("<mods:titleInfo><mods:title>", "Foo")
        .unwrap();
    let parent = parent_mapper.into_mods();
    let xml = parent.to_xml(true).unwrap();

    let reloaded = Mods::from_xml(&xml).unwrap();
    let mut child_mapper = Mapper::with_parent(reloaded);
    child_mapper
        .add_data("<mods:note>", "child note")
        .unwrap();
    let child = child_mapper.into_mods();

    assert_eq!(child.title_infos.len(), 1);
    assert_eq!(child.title_infos[0].title.as_deref(), Some("Foo"));
    assert_eq!(child.notes[0].text, "child note");
}

#[test]
fn assemble_feeds_fields_in_column_order() {
    let record = Record {
        id: "test123".to_string(),
        mapped_id: "test123_1".to_string(),
        fields: vec![
            FieldAssignment::new("<mods:name type=\"personal\"><mods:namePart>", "Smith"),
            FieldAssignment::new("<mods:namePart type=\"date\">", "1900-1980"),
            FieldAssignment::new("<mods:note>", ""),
        ],
        attached_files: vec![],
    };
    let mods = assemble(&record, None, "||").unwrap();
    assert_eq!(mods.names.len(), 1);
    assert_eq!(mods.names[0].parts.len(), 2);
    // The empty note column was skipped entirely.
    assert!(mods.notes.is_empty());
}

#[test]
fn record_output_names() {
    let record = Record {
        id: "test123".to_string(),
        mapped_id: "test123_1".to_string(),
        ..Record::default()
    };
    assert_eq!(record.output_name(), "test123_1.mods");
    assert_eq!(record.parent_output_name(), "test123.mods");
}
