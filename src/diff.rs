use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::ReanalyzeError;
use crate::model::DeclRecord;

/// The diff state of a single file. `NewFile` and `NoChange` are
/// distinguished from `Ranges(vec![])`: a file present in the diff
/// document with an empty range list has deletions only (every deletion
/// decodes to a synthetic one-line range at the deletion point), so it
/// is never actually "no change" unless the document says so explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRecord {
    NewFile,
    NoChange,
    Ranges(Vec<(u32, u32)>),
}

impl DiffRecord {
    /// Parses one file's entry from the diff document. Each entry is
    /// either the literal integer `1` (new file) or an array of
    /// `[start, count]` pairs — a `count` of `0` marks a pure deletion,
    /// decoded to the synthetic one-line range `[start+1, start+1]`
    /// (the line immediately after the deletion point, where re-analysis
    /// still needs to notice the hunk).
    fn from_value(value: &Value) -> Option<DiffRecord> {
        match value {
            Value::Number(n) if n.as_i64() == Some(1) => Some(DiffRecord::NewFile),
            Value::Array(pairs) => {
                if pairs.is_empty() {
                    return Some(DiffRecord::NoChange);
                }
                let mut ranges = Vec::with_capacity(pairs.len());
                for pair in pairs {
                    let arr = pair.as_array()?;
                    let start = arr.first()?.as_u64()? as u32;
                    let count = arr.get(1)?.as_u64()? as u32;
                    if count == 0 {
                        ranges.push((start + 1, start + 1));
                    } else {
                        ranges.push((start, start + count - 1));
                    }
                }
                Some(DiffRecord::Ranges(ranges))
            }
            _ => None,
        }
    }
}

/// Answers change queries for one translation unit's main file. Loading
/// never fails hard: a missing `--diff` flag, an unreadable file, a
/// malformed document, or a document with no entry for the main file all
/// degrade to `NoChange` with a diagnostic on stderr, matching the
/// fallback-to-default pattern the rest of this engine follows for any
/// externally supplied, optional input.
pub struct DiffLineManager {
    record: DiffRecord,
}

impl DiffLineManager {
    pub fn load(diff_path: Option<&Path>, main_file: &str) -> DiffLineManager {
        let path = match diff_path {
            Some(p) => p,
            None => return DiffLineManager { record: DiffRecord::NoChange },
        };
        match Self::try_load(path, main_file) {
            Ok(record) => DiffLineManager { record },
            Err(err) => {
                eprintln!("warning: {err}, treating {main_file} as unchanged");
                DiffLineManager { record: DiffRecord::NoChange }
            }
        }
    }

    fn try_load(path: &Path, main_file: &str) -> Result<DiffRecord, ReanalyzeError> {
        let text = fs::read_to_string(path).map_err(|source| ReanalyzeError::DiffRead {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: HashMap<String, Value> =
            serde_json::from_str(&text).map_err(|source| ReanalyzeError::DiffParse {
                path: path.to_path_buf(),
                source,
            })?;
        match doc.get(main_file) {
            Some(value) => Ok(DiffRecord::from_value(value).unwrap_or(DiffRecord::NoChange)),
            None => Ok(DiffRecord::NoChange),
        }
    }

    /// Builds a manager directly from a set of changed ranges, bypassing
    /// the JSON document. Used by tests that need a known diff without
    /// writing a fixture file.
    pub fn from_ranges(ranges: Vec<(u32, u32)>) -> DiffLineManager {
        DiffLineManager { record: DiffRecord::Ranges(ranges) }
    }

    pub fn is_new_file(&self) -> bool {
        matches!(self.record, DiffRecord::NewFile)
    }

    pub fn is_no_change(&self) -> bool {
        matches!(self.record, DiffRecord::NoChange)
    }

    /// True when `[l1, l2]` intersects any changed range. A new file is
    /// changed everywhere.
    pub fn is_changed_line(&self, l1: u32, l2: u32) -> bool {
        match &self.record {
            DiffRecord::NewFile => true,
            DiffRecord::NoChange => false,
            DiffRecord::Ranges(ranges) => ranges.iter().any(|&(s, e)| s <= l2 && l1 <= e),
        }
    }

    pub fn start_and_end_line_of_decl(&self, decl: &DeclRecord) -> Option<(u32, u32)> {
        decl.range.map(|r| (r.start_line, r.end_line))
    }

    pub fn is_changed_decl(&self, decl: &DeclRecord) -> bool {
        match self.start_and_end_line_of_decl(decl) {
            Some((s, e)) => self.is_changed_line(s, e),
            // no range to check against — conservatively assume changed
            None => true,
        }
    }

    pub fn origin_file_and_line_of_decl(decl: &DeclRecord) -> (String, Option<(u32, u32)>) {
        (decl.file.clone(), decl.range.map(|r| (r.start_line, r.end_line)))
    }
}
