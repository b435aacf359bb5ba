//! Output file naming.

use std::path::{Path, PathBuf};

use formfill_map::plain_string;
use formfill_model::{MappingProfile, Record};

/// Output path for `record`: `<filename>.<ext>` inside `output_dir`, or
/// `<fallback>_<row>.<ext>` when the file name column is absent or blank.
///
/// Path separators in the stem become `_` so every output stays directly
/// inside `output_dir`.
#[must_use]
pub fn output_path_for(record: &Record, profile: &MappingProfile, output_dir: &Path) -> PathBuf {
    let stem = record
        .get(&profile.filename_column)
        .map(plain_string)
        .map(|name| name.trim().replace(['/', '\\'], "_"))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{}_{}", profile.fallback_stem, record.index()));
    output_dir.join(format!("{stem}.{}", profile.extension))
}

#[cfg(test)]
mod tests {
    use formfill_model::CellValue;

    use super::*;

    fn dir() -> &'static Path {
        Path::new("output")
    }

    #[test]
    fn uses_filename_column() {
        let record = Record::from_pairs(1, [("filename", CellValue::from(" jane "))]);
        assert_eq!(
            output_path_for(&record, &MappingProfile::default(), dir()),
            Path::new("output/jane.pdf")
        );
    }

    #[test]
    fn falls_back_to_row_index() {
        let profile = MappingProfile::default();
        let absent = Record::from_pairs(3, [("Name(s)", CellValue::from("Jane Doe"))]);
        assert_eq!(
            output_path_for(&absent, &profile, dir()),
            Path::new("output/output_3.pdf")
        );

        let blank = Record::from_pairs(4, [("filename", CellValue::Empty)]);
        assert_eq!(
            output_path_for(&blank, &profile, dir()),
            Path::new("output/output_4.pdf")
        );
    }

    #[test]
    fn numeric_names_use_plain_form() {
        let record = Record::from_pairs(1, [("filename", CellValue::Int(1042))]);
        assert_eq!(
            output_path_for(&record, &MappingProfile::default(), dir()),
            Path::new("output/1042.pdf")
        );
    }

    #[test]
    fn separators_cannot_escape_output_dir() {
        let record = Record::from_pairs(1, [("filename", CellValue::from("../etc/passwd"))]);
        assert_eq!(
            output_path_for(&record, &MappingProfile::default(), dir()),
            Path::new("output/.._etc_passwd.pdf")
        );
    }

    #[test]
    fn honors_profile_naming() {
        let profile = MappingProfile {
            filename_column: "File".into(),
            fallback_stem: "schedule".into(),
            extension: "PDF".into(),
            ..MappingProfile::empty()
        };
        let record = Record::from_pairs(2, [("filename", CellValue::from("ignored"))]);
        assert_eq!(
            output_path_for(&record, &profile, dir()),
            Path::new("output/schedule_2.PDF")
        );
    }
}
