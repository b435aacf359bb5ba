//! Warnings about cell values must not carry the values themselves.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use formfill_map::resolve_fields;
use formfill_model::{MappingProfile, REDACTED_VALUE, Record};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn issue_warnings_redact_cell_values() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let row = Record::from_pairs(
        1,
        [
            ("Date in Service", "SSN 123-45-6789"),
            ("more than $25,000?", "987-65-4321"),
        ],
    );

    let resolution = tracing::subscriber::with_default(subscriber, || {
        resolve_fields(&row, &MappingProfile::default())
    });

    let output = logs.contents();
    assert!(output.contains("date parsing failed"), "{output}");
    assert!(output.contains("unrecognized checkbox value"), "{output}");
    assert!(output.contains(REDACTED_VALUE), "{output}");
    assert!(!output.contains("123-45-6789"), "{output}");
    assert!(!output.contains("987-65-4321"), "{output}");

    // The issues themselves keep the value for the run report.
    assert!(
        resolution
            .issues
            .iter()
            .any(|issue| issue.value() == Some("SSN 123-45-6789"))
    );
}
