//! Document-level stages: load, copy, merge form metadata, persist.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::{Document, Object, dictionary};
use tracing::{debug, warn};

use crate::error::{FillError, Result};

/// Loads the template fresh from disk.
pub fn load_template(path: &Path) -> Result<Document> {
    Document::load(path).map_err(|source| FillError::TemplateLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the output shell: same version and objects, with a new catalog that
/// holds only `/Type` and the template's page tree.
pub fn copy_structure(template: &Document) -> Result<Document> {
    let pages = template
        .catalog()
        .map_err(|_| FillError::MalformedTemplate {
            message: "document has no catalog",
        })?
        .get(b"Pages")
        .map_err(|_| FillError::MalformedTemplate {
            message: "catalog has no page tree",
        })?
        .clone();

    let mut output = Document::with_version(template.version.clone());
    output.objects = template.objects.clone();
    output.max_id = template.max_id;
    let catalog_id = output.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages,
    });
    output.trailer.set("Root", catalog_id);
    debug!(
        pages = output.get_pages().len(),
        version = %output.version,
        "copied page tree"
    );
    Ok(output)
}

/// Carries the template's `/AcroForm` into `output` with `/NeedAppearances`
/// set, then prunes objects the new catalog no longer reaches.
///
/// Returns `false` when the template has no form dictionary; the output is
/// then left without one. A form entry that is not a dictionary, or a
/// reference to a missing one, is a [`FillError::MalformedTemplate`].
pub fn merge_form_metadata(template: &Document, output: &mut Document) -> Result<bool> {
    let acro_form = template
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"AcroForm").ok())
        .cloned();

    let merged = match acro_form {
        Some(Object::Reference(id)) => {
            output
                .get_dictionary_mut(id)
                .map_err(|_| FillError::MalformedTemplate {
                    message: "/AcroForm does not reference a dictionary",
                })?
                .set("NeedAppearances", true);
            Some(Object::Reference(id))
        }
        Some(Object::Dictionary(mut form)) => {
            form.set("NeedAppearances", true);
            Some(Object::Dictionary(form))
        }
        Some(_) => {
            return Err(FillError::MalformedTemplate {
                message: "/AcroForm is not a dictionary",
            });
        }
        None => None,
    };

    let has_form = merged.is_some();
    match merged {
        Some(form) => {
            let root = output.trailer.get(b"Root")?.as_reference()?;
            output.get_dictionary_mut(root)?.set("AcroForm", form);
        }
        None => warn!("template has no form dictionary, output will have no fillable fields"),
    }

    let pruned = output.prune_objects();
    debug!(pruned = pruned.len(), has_form, "merged form metadata");
    Ok(has_form)
}

/// Writes `document` to `path`, creating parent directories as needed.
/// Existing files are overwritten.
pub fn persist(document: &mut Document, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| FillError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_error = |source: std::io::Error| FillError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    document
        .save_to(&mut writer)
        .map_err(|e| write_error(std::io::Error::other(e)))?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
