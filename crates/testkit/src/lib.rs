#![warn(missing_docs)]
//! Deterministic logging surfaces for cast scenarios (JSONL contact logs).

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use slabcast_geometry::{Contact, Ray};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// One cast captured during a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Scenario time in milliseconds.
    pub tick: u64,
    /// The ray that was cast.
    pub ray: Ray,
    /// Index of the rectangle hit first, if any.
    pub target: Option<usize>,
    /// Contact with that rectangle.
    pub contact: Option<Contact>,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
    lines: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create log {}", path.display()))?;
        Ok(Self { file, lines: 0 })
    }

    /// Append a record to the log.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush buffered output.
    pub fn finish(mut self) -> Result<usize> {
        self.file.flush()?;
        debug!(lines = self.lines, "jsonl log finished");
        Ok(self.lines)
    }
}

/// Read every record back from a JSONL file, skipping blank lines.
pub fn read_jsonl<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open log {}", path.display()))?;
    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .with_context(|| format!("Invalid record on line {} of {}", index + 1, path.display()))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slabcast_geometry::Vec2;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn contact_log_roundtrips_through_disk() {
        let path = std::env::temp_dir().join(format!(
            "contact-log-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let records = vec![
            ContactRecord {
                tick: 0,
                ray: Ray::new(Vec2::ZERO, Vec2::new(10.0, 0.0)),
                target: None,
                contact: None,
            },
            ContactRecord {
                tick: 16,
                ray: Ray::new(Vec2::new(0.0, 5.0), Vec2::new(10.0, 0.0)),
                target: Some(0),
                contact: Some(Contact {
                    point: Vec2::new(4.0, 5.0),
                    normal: Vec2::new(-1.0, 0.0),
                    time: 0.4,
                }),
            },
        ];

        let mut sink = JsonlSink::create(&path).expect("sink create");
        for record in &records {
            sink.write(record).expect("write succeeds");
        }
        assert_eq!(sink.finish().expect("flush"), 2);

        let read: Vec<ContactRecord> = read_jsonl(&path).expect("log readable");
        assert_eq!(read, records);
        let _ = fs::remove_file(&path);
    }
}
