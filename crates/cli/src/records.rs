//! # Record Files
//!
//! Reading and writing records as JSON lines: one `{"attributes": {...},
//! "payload": "<base64>"}` object per line. Both fields are optional on input.

use flowqa::types::Record;
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read records: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize record: {0}")]
    Serialize(serde_json::Error),
}

/// Reads every non-blank line as a record.
///
/// Records without a `uuid` attribute are stamped with one.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, RecordError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed: Record = serde_json::from_str(&line).map_err(|source| RecordError::Parse {
            line: index + 1,
            source,
        })?;
        records.push(Record::with_attributes(parsed.attributes).with_payload(parsed.payload));
    }
    Ok(records)
}

/// Writes records as JSON lines.
pub fn write_records<W: Write>(mut writer: W, records: &[Record]) -> Result<(), RecordError> {
    for record in records {
        let line = serde_json::to_string(record).map_err(RecordError::Serialize)?;
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}
