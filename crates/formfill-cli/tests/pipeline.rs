//! Integration tests for the fill pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Document, Object, dictionary};
use tempfile::TempDir;

use formfill_cli::pipeline::{FillOptions, run_pipeline};
use formfill_cli::types::RowStatus;
use formfill_map::ResolutionIssue;
use formfill_model::MappingProfile;

/// One page with a `f1_01[0]` text field and the `c1_1` checkbox pair.
fn write_template(dir: &Path) -> PathBuf {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let rect = || Object::Array([0, 0, 100, 20].into_iter().map(Object::Integer).collect());
    let name = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal("f1_01[0]"),
        "P" => page_id,
        "Rect" => rect(),
    });
    let mut boxes = Vec::new();
    for (field, state) in [("c1_1[0]", "1"), ("c1_1[1]", "2")] {
        let on = doc.add_object(lopdf::Stream::new(lopdf::Dictionary::new(), Vec::new()));
        let off = doc.add_object(lopdf::Stream::new(lopdf::Dictionary::new(), Vec::new()));
        let mut normal = lopdf::Dictionary::new();
        normal.set(state, on);
        normal.set("Off", off);
        boxes.push(doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Btn",
            "T" => Object::string_literal(field),
            "P" => page_id,
            "Rect" => rect(),
            "AS" => "Off",
            "AP" => dictionary! { "N" => normal },
        }));
    }
    let widgets: Vec<Object> = std::iter::once(name)
        .chain(boxes)
        .map(Object::Reference)
        .collect();

    doc.set_object(
        page_id,
        dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => rect(),
            "Annots" => widgets.clone(),
        },
    );
    doc.set_object(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        },
    );
    let form = doc.add_object(dictionary! { "Fields" => widgets });
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => form,
    });
    doc.trailer.set("Root", catalog);

    let path = dir.join("template.pdf");
    doc.save(&path).unwrap();
    path
}

fn write_input(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("input.csv");
    fs::write(&path, contents).unwrap();
    path
}

fn options(dir: &Path, input: PathBuf, template: PathBuf) -> FillOptions {
    FillOptions {
        input,
        sheet: None,
        template,
        output_dir: dir.join("output"),
        profile: MappingProfile::default(),
        fail_fast: false,
        dry_run: false,
    }
}

const INPUT: &str = "\
Name(s),\"more than $25,000?\",filename
Jane Doe,Yes,jane
,,
John Roe,maybe,
";

#[test]
fn fills_one_document_per_row() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), INPUT);
    let template = write_template(dir.path());

    let report = run_pipeline(&options(dir.path(), input, template)).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert!(!report.has_failures());
    let output = dir.path().join("output");
    assert_eq!(report.rows[0].path, output.join("jane.pdf"));
    assert_eq!(report.rows[0].status, RowStatus::Written);
    assert_eq!(report.rows[1].row, 3);
    assert_eq!(report.rows[1].path, output.join("output_3.pdf"));
    assert!(report.rows[1].path.is_file());
    assert!(
        report.rows[1]
            .issues
            .iter()
            .any(|issue| matches!(issue, ResolutionIssue::UnrecognizedCheckboxValue { .. }))
    );

    let jane = Document::load(output.join("jane.pdf")).unwrap();
    let checked = jane
        .objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .find(|dict| {
            dict.get(b"T")
                .and_then(Object::as_str)
                .is_ok_and(|t| t == b"c1_1[0]")
        })
        .unwrap();
    assert_eq!(checked.get(b"AS").unwrap().as_name().unwrap(), b"1");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), INPUT);
    let mut options = options(dir.path(), input, dir.path().join("absent.pdf"));
    options.dry_run = true;

    let report = run_pipeline(&options).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert!(report.rows.iter().all(|row| row.status == RowStatus::Planned));
    assert_eq!(report.rows[0].path, dir.path().join("output").join("jane.pdf"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn missing_template_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), INPUT);

    let err = run_pipeline(&options(dir.path(), input, dir.path().join("absent.pdf")))
        .unwrap_err();

    assert!(format!("{err:#}").contains("load template"));
    assert!(!dir.path().join("output").join("jane.pdf").exists());
}

#[test]
fn missing_input_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    let template = write_template(dir.path());

    let err = run_pipeline(&options(dir.path(), dir.path().join("absent.csv"), template))
        .unwrap_err();

    assert!(format!("{err:#}").contains("read input"));
}

#[test]
fn write_failures_are_recorded_per_row() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), INPUT);
    let template = write_template(dir.path());
    let mut options = options(dir.path(), input, template);
    options.output_dir = dir.path().join("blocker");
    fs::write(&options.output_dir, b"not a directory").unwrap();

    let report = run_pipeline(&options).unwrap();

    assert_eq!(report.failed(), 2);
    assert!(report.has_failures());
    assert!(
        report
            .rows
            .iter()
            .all(|row| matches!(row.status, RowStatus::Failed(_)))
    );
    // Resolution issues survive the failed write.
    let john = &report.rows[1];
    assert_eq!(john.row, 3);
    assert!(
        john.issues
            .iter()
            .any(|issue| matches!(issue, ResolutionIssue::UnrecognizedCheckboxValue { .. }))
    );
    assert!(!report.rows[0].issues.is_empty());
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), INPUT);
    let template = write_template(dir.path());
    let mut options = options(dir.path(), input, template);
    options.output_dir = dir.path().join("blocker");
    options.fail_fast = true;
    fs::write(&options.output_dir, b"not a directory").unwrap();

    let err = run_pipeline(&options).unwrap_err();

    assert!(format!("{err:#}").starts_with("row 1"));
}
