//! Integration tests for record resolution against the built-in profile.

use chrono::NaiveDate;
use proptest::prelude::*;

use formfill_map::{ResolutionIssue, resolve_fields};
use formfill_model::{CellValue, MappingProfile, Record};

fn record(pairs: Vec<(&str, CellValue)>) -> Record {
    Record::from_pairs(1, pairs)
}

#[test]
fn name_and_yes_checkbox_resolve() {
    let profile = MappingProfile::default();
    let row = record(vec![
        ("Name(s)", "Jane Doe".into()),
        ("more than $25,000?", "Yes".into()),
        ("filename", "jane".into()),
    ]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_01[0]"), Some("Jane Doe"));
    assert_eq!(resolution.assignments.get("c1_1[0]"), Some("/1"));
    assert_eq!(resolution.assignments.get("c1_1[1]"), Some(""));
    assert!(!resolution.assignments.contains("c1_2[0]"));
}

#[test]
fn date_in_service_renders_month_first() {
    let profile = MappingProfile::default();
    let row = record(vec![("Date in Service", "2023-04-15".into())]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_07[0]"), Some("04/15/2023"));
    assert!(
        !resolution
            .issues
            .iter()
            .any(|issue| matches!(issue, ResolutionIssue::UnparseableDate { .. }))
    );
}

#[test]
fn date_cells_render_month_first() {
    let profile = MappingProfile::default();
    let date = NaiveDate::from_ymd_opt(2023, 4, 15).unwrap();
    let row = record(vec![("Date in Service", date.into())]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_07[0]"), Some("04/15/2023"));
}

#[test]
fn unknown_checkbox_value_sets_nothing_from_group() {
    let profile = MappingProfile::default();
    let row = record(vec![
        ("Name(s)", "Jane Doe".into()),
        ("more than $25,000?", "maybe".into()),
    ]);

    let resolution = resolve_fields(&row, &profile);

    assert!(!resolution.assignments.contains("c1_1[0]"));
    assert!(!resolution.assignments.contains("c1_1[1]"));
    let unrecognized: Vec<_> = resolution
        .issues
        .iter()
        .filter(|issue| matches!(issue, ResolutionIssue::UnrecognizedCheckboxValue { .. }))
        .collect();
    assert_eq!(unrecognized.len(), 1);
    assert_eq!(unrecognized[0].column(), "more than $25,000?");
    assert_eq!(
        unrecognized[0].to_string(),
        "unrecognized checkbox value 'maybe' for field 'more than $25,000?'"
    );
}

#[test]
fn empty_text_cell_resolves_to_empty_string() {
    let profile = MappingProfile::default();
    let row = record(vec![
        ("Name(s)", "Jane Doe".into()),
        ("Make", CellValue::Empty),
        ("Date in Service", CellValue::Empty),
    ]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_04[0]"), Some(""));
    assert_eq!(resolution.assignments.get("f1_07[0]"), Some(""));
}

#[test]
fn absent_columns_are_omitted_and_reported() {
    let profile = MappingProfile::default();
    let row = record(vec![("VIN", "1HGCM82633A004352".into())]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.len(), 1);
    assert_eq!(
        resolution.assignments.get("f1_06[0]"),
        Some("1HGCM82633A004352")
    );
    let missing: Vec<&str> = resolution
        .issues
        .iter()
        .filter(|issue| matches!(issue, ResolutionIssue::MissingColumn { .. }))
        .map(ResolutionIssue::column)
        .collect();
    assert_eq!(
        missing,
        [
            "Date in Service",
            "Identifying number",
            "Make",
            "Model",
            "Name(s)",
            "Year"
        ]
    );
    assert_eq!(
        resolution
            .issues
            .iter()
            .filter(|issue| matches!(issue, ResolutionIssue::MissingCheckboxColumn { .. }))
            .count(),
        2
    );
}

#[test]
fn known_option_sets_full_field_set() {
    let profile = MappingProfile::default();
    let row = record(vec![("new clean vehicle?", "  NO ".into())]);

    let resolution = resolve_fields(&row, &profile);
    let expected = &profile.checkboxes["new clean vehicle?"]["no"];

    for (field, value) in expected {
        assert_eq!(resolution.assignments.get(field), Some(value.as_str()));
    }
    assert_eq!(resolution.assignments.len(), expected.len());
}

#[test]
fn unparseable_date_falls_back_to_plain_text() {
    let profile = MappingProfile::default();
    let row = record(vec![("Date in Service", "spring 2023".into())]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_07[0]"), Some("spring 2023"));
    let issue = resolution
        .issues
        .iter()
        .find(|issue| matches!(issue, ResolutionIssue::UnparseableDate { .. }))
        .expect("date issue");
    insta::assert_json_snapshot!(issue, @r#"
    {
      "kind": "unparseable_date",
      "column": "Date in Service",
      "value": "spring 2023",
      "reason": "unrecognized date format"
    }
    "#);
}

#[test]
fn numeric_cells_use_plain_form() {
    let profile = MappingProfile::default();
    let row = record(vec![
        ("Year", CellValue::Int(2023)),
        ("Identifying number", CellValue::Float(12.5)),
    ]);

    let resolution = resolve_fields(&row, &profile);

    assert_eq!(resolution.assignments.get("f1_03[0]"), Some("2023"));
    assert_eq!(resolution.assignments.get("f1_02[0]"), Some("12.5"));
}

#[test]
fn resolution_is_idempotent() {
    let profile = MappingProfile::default();
    let row = record(vec![
        ("Name(s)", "Jane Doe".into()),
        ("Date in Service", "April 15, 2023".into()),
        ("more than $25,000?", "yes".into()),
        ("new clean vehicle?", "perhaps".into()),
    ]);

    assert_eq!(resolve_fields(&row, &profile), resolve_fields(&row, &profile));
}

proptest! {
    #[test]
    fn valid_dates_render_as_mm_dd_yyyy(
        year in 1900i32..=9999,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let profile = MappingProfile::default();
        let text = format!("{year:04}-{month:02}-{day:02}");
        let row = record(vec![("Date in Service", text.into())]);

        let resolution = resolve_fields(&row, &profile);

        let expected = format!("{month:02}/{day:02}/{year:04}");
        prop_assert_eq!(resolution.assignments.get("f1_07[0]"), Some(expected.as_str()));
    }
}
