//! Dataset loading and record extraction.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};

use mods_map::{FieldAssignment, Record};

use crate::dates::normalize_text_date;
use crate::error::IngestError;

/// Column-name candidates for the id that ties children to parents.
const ID_NAMES: &[&str] = &["id", "tracker item id", "tracker id", "record name", "file id"];
/// Column-name candidates for the record's own mods id.
const MODS_ID_NAMES: &[&str] = &["mods id", "<mods:mods id=\"\">"];
/// Column-name candidates for attached data files.
const FILE_NAMES: &[&str] = &["file name", "filename", "file_id"];

/// Whether rows describe parent objects or children of existing parents.
/// Controls how mods ids are synthesized when no mods-id column exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordKind {
    #[default]
    Parent,
    Child,
}

#[derive(Debug, Clone)]
pub struct DatasetOptions {
    /// 1-based row holding the mapping paths.
    pub ctrl_row: usize,
    /// Force date normalization even when the reading is ambiguous.
    pub force_dates: bool,
    pub kind: RecordKind,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            ctrl_row: 2,
            force_dates: false,
            kind: RecordKind::default(),
        }
    }
}

/// A fully loaded dataset.
///
/// Rows are materialized up front; datasets are control spreadsheets,
/// not bulk data, so this keeps the column-detection logic simple.
#[derive(Debug)]
pub struct Dataset {
    rows: Vec<Vec<String>>,
    options: DatasetOptions,
}

impl Dataset {
    /// Load a delimited-text dataset from `path`.
    ///
    /// The delimiter is sniffed from the first line (comma, semicolon,
    /// or tab). Cells are trimmed and BOM characters stripped.
    pub fn open(path: &Path, options: DatasetOptions) -> Result<Self, IngestError> {
        let raw = fs::read_to_string(path)?;
        let delimiter = sniff_delimiter(&raw);
        debug!(
            path = %path.display(),
            delimiter = %(delimiter as char),
            "opening dataset"
        );
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(raw.as_bytes());
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(normalize_cell).collect());
        }
        if rows.len() < options.ctrl_row {
            return Err(IngestError::ControlRowOutOfRange {
                row: options.ctrl_row,
                total: rows.len(),
            });
        }
        Ok(Self { rows, options })
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// The row carrying the mapping paths.
    pub fn control_row(&self) -> &[String] {
        &self.rows[self.options.ctrl_row - 1]
    }

    /// Retrieve a row by 1-based index, as in a spreadsheet.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        index
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
    }

    /// Columns whose control-row cell is a mapping path, in column order.
    pub fn mapped_columns(&self) -> Vec<(usize, &str)> {
        self.control_row()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.starts_with("<mods"))
            .map(|(index, cell)| (index, cell.as_str()))
            .collect()
    }

    pub fn id_column(&self) -> Option<usize> {
        self.find_column(ID_NAMES)
    }

    pub fn mods_id_column(&self) -> Option<usize> {
        self.find_column(MODS_ID_NAMES)
    }

    pub fn file_name_column(&self) -> Option<usize> {
        self.find_column(FILE_NAMES)
    }

    /// Look for a named column in the control row first, then the
    /// header row.
    fn find_column(&self, names: &[&str]) -> Option<usize> {
        for row in [self.control_row(), &self.rows[0]] {
            for (index, cell) in row.iter().enumerate() {
                let lowered = cell.to_lowercase();
                if names.contains(&lowered.as_str()) {
                    return Some(index);
                }
            }
        }
        None
    }

    /// Extract one [`Record`] per data row.
    ///
    /// Rows without an id are skipped with a warning. When no mods-id
    /// column exists (or its cell is empty), an id is synthesized: for
    /// parent datasets the first row with a given id keeps the id
    /// itself and later rows get `_1`, `_2`, ... suffixes; for child
    /// datasets every row is suffixed, starting at `_1`.
    pub fn records(&self) -> Result<Vec<Record>, IngestError> {
        let id_col = self.id_column().ok_or(IngestError::MissingIdColumn)?;
        let mods_id_col = self.mods_id_column();
        let file_col = self.file_name_column();
        let mapped = self.mapped_columns();
        let mapped: Vec<(usize, String)> = mapped
            .into_iter()
            .map(|(index, path)| (index, path.to_string()))
            .collect();

        let mut counters: BTreeMap<String, u32> = BTreeMap::new();
        let mut records = Vec::new();
        for (offset, row) in self.rows[self.options.ctrl_row..].iter().enumerate() {
            let row_number = self.options.ctrl_row + offset + 1;
            let id = row.get(id_col).map(|cell| cell.trim()).unwrap_or_default();
            if id.is_empty() {
                warn!(row = row_number, "no id on row, skipping");
                continue;
            }

            let explicit_mods_id = mods_id_col
                .and_then(|col| row.get(col))
                .map(|cell| cell.trim())
                .filter(|cell| !cell.is_empty());
            let mapped_id = match explicit_mods_id {
                Some(mods_id) => mods_id.to_string(),
                None => self.synthesize_mapped_id(id, &mut counters),
            };

            let mut fields = Vec::new();
            for (col, path) in &mapped {
                let Some(value) = row.get(*col).filter(|cell| !cell.is_empty()) else {
                    continue;
                };
                let value = if path.contains("date") || path.contains("Date") {
                    normalize_text_date(value, self.options.force_dates)
                } else {
                    value.clone()
                };
                fields.push(FieldAssignment::new(path.clone(), value));
            }

            let attached_files = file_col
                .and_then(|col| row.get(col))
                .map(|cell| {
                    cell.split(',')
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            records.push(Record {
                id: id.to_string(),
                mapped_id,
                fields,
                attached_files,
            });
        }
        Ok(records)
    }

    fn synthesize_mapped_id(&self, id: &str, counters: &mut BTreeMap<String, u32>) -> String {
        match counters.get_mut(id) {
            Some(count) => {
                let mapped_id = format!("{id}_{count}");
                *count += 1;
                mapped_id
            }
            None => match self.options.kind {
                RecordKind::Parent => {
                    counters.insert(id.to_string(), 1);
                    id.to_string()
                }
                RecordKind::Child => {
                    counters.insert(id.to_string(), 2);
                    format!("{id}_1")
                }
            },
        }
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Pick the delimiter that occurs most often in the first line.
/// The csv crate does not sniff dialects itself.
fn sniff_delimiter(raw: &str) -> u8 {
    let first_line = raw.lines().next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|&candidate| first_line.bytes().filter(|&b| b == candidate).count())
        .unwrap_or(b',')
}
