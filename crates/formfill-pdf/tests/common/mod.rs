//! Fixture templates built with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

fn rect(x: i64, y: i64) -> Object {
    Object::Array(
        [x, y, x + 100, y + 20]
            .into_iter()
            .map(Object::Integer)
            .collect(),
    )
}

fn appearance(doc: &mut Document) -> ObjectId {
    doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => rect(0, 0),
        },
        Vec::new(),
    ))
}

fn text_widget(name: &str, parent: ObjectId, page: ObjectId, y: i64) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal(name),
        "Parent" => parent,
        "P" => page,
        "Rect" => rect(50, y),
    }
}

fn checkbox(
    doc: &mut Document,
    name: &str,
    on: &str,
    parent: ObjectId,
    page: ObjectId,
    y: i64,
) -> ObjectId {
    let on_stream = appearance(doc);
    let off_stream = appearance(doc);
    let mut normal = Dictionary::new();
    normal.set(on, on_stream);
    normal.set("Off", off_stream);
    doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Btn",
        "T" => Object::string_literal(name),
        "Parent" => parent,
        "P" => page,
        "Rect" => rect(50, y),
        "V" => "Off",
        "AS" => "Off",
        "AP" => dictionary! { "N" => normal },
    })
}

/// One page carrying `topmostSubform[0].Page1[0]` with:
///
/// - `f1_01[0]`, `f1_07[0]`: merged text field/widgets
/// - `f1_06[0]`: text field with two separate widget kids
/// - `c1_1[0]` (state `1`) and `c1_1[1]` (state `2`): checkboxes
///
/// The catalog also references a `/Metadata` stream that fills must drop.
pub fn form_template() -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();
    let root_field = doc.new_object_id();
    let page_field = doc.new_object_id();

    let name = doc.add_object(text_widget("f1_01[0]", page_field, page_id, 700));
    let date = doc.add_object(text_widget("f1_07[0]", page_field, page_id, 670));

    let vin = doc.new_object_id();
    let vin_left = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Parent" => vin,
        "P" => page_id,
        "Rect" => rect(50, 640),
    });
    let vin_right = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Parent" => vin,
        "P" => page_id,
        "Rect" => rect(200, 640),
    });
    doc.set_object(
        vin,
        dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal("f1_06[0]"),
            "Parent" => page_field,
            "Kids" => vec![Object::Reference(vin_left), Object::Reference(vin_right)],
        },
    );

    let yes = checkbox(&mut doc, "c1_1[0]", "1", page_field, page_id, 610);
    let no = checkbox(&mut doc, "c1_1[1]", "2", page_field, page_id, 580);

    doc.set_object(
        page_field,
        dictionary! {
            "T" => Object::string_literal("Page1[0]"),
            "Parent" => root_field,
            "Kids" => [name, date, vin, yes, no]
                .into_iter()
                .map(Object::Reference)
                .collect::<Vec<_>>(),
        },
    );
    doc.set_object(
        root_field,
        dictionary! {
            "T" => Object::string_literal("topmostSubform[0]"),
            "Kids" => vec![Object::Reference(page_field)],
        },
    );

    doc.set_object(
        page_id,
        dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => rect(0, 0),
            "Annots" => [name, date, vin_left, vin_right, yes, no]
                .into_iter()
                .map(Object::Reference)
                .collect::<Vec<_>>(),
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

    let form = doc.add_object(dictionary! {
        "Fields" => vec![Object::Reference(root_field)],
        "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
        "DR" => dictionary! {
            "Font" => dictionary! {
                "Helv" => dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => "Helvetica",
                },
            },
        },
    });
    let metadata = doc.add_object(Stream::new(
        dictionary! { "Type" => "Metadata", "Subtype" => "XML" },
        b"<x:xmpmeta/>".to_vec(),
    ));
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => form,
        "Metadata" => metadata,
    });
    doc.trailer.set("Root", catalog);
    doc
}

/// A single blank page with no form dictionary.
pub fn plain_template() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => rect(0, 0),
    });
    doc.set_object(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
        },
    );
    let catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog);
    doc
}

pub fn save(mut doc: Document, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// The dictionary of the field whose `/T` is `name`.
pub fn field<'a>(doc: &'a Document, name: &str) -> &'a Dictionary {
    doc.objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .find(|dict| {
            dict.get(b"T")
                .and_then(Object::as_str)
                .is_ok_and(|t| t == name.as_bytes())
        })
        .unwrap_or_else(|| panic!("no field named {name}"))
}

pub fn name_entry(dict: &Dictionary, key: &[u8]) -> String {
    String::from_utf8(dict.get(key).unwrap().as_name().unwrap().to_vec()).unwrap()
}

pub fn string_entry(dict: &Dictionary, key: &[u8]) -> String {
    String::from_utf8(dict.get(key).unwrap().as_str().unwrap().to_vec()).unwrap()
}
