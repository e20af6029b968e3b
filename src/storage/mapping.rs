use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, Result};

pub const SOURCE_FILE_COLUMN: &str = "source_file";
pub const DESIGN_DOC_COLUMN: &str = "design_doc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source_file: String,
    pub design_doc: String,
}

/// Source file to design document associations, in file row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
}

impl MappingTable {
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<MappingEntry> for MappingTable {
    fn from_iter<I: IntoIterator<Item = MappingEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a MappingEntry;
    type IntoIter = std::slice::Iter<'a, MappingEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Deserialize)]
struct HeaderRow {
    #[serde(default)]
    source_file: Option<String>,
    #[serde(default)]
    design_doc: Option<String>,
}

/// Loads the mapping table, first assuming a `source_file,design_doc`
/// header row and falling back to a headerless two-column layout.
///
/// Only a failure of the headerless parse is reported as an error.
pub fn load_mapping(path: &Path) -> Result<MappingTable> {
    match load_with_header(path) {
        Ok(Some(table)) => {
            log::info!(
                "Loaded {} mapping entries from {} (header row)",
                table.len(),
                path.display()
            );
            return Ok(table);
        }
        Ok(None) => {
            log::debug!("{} has no usable header row", path.display());
        }
        Err(e) => {
            log::debug!("Header parse of {} failed: {}", path.display(), e);
        }
    }

    let table = load_without_header(path).map_err(|source| AppError::MappingLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Loaded {} mapping entries from {} (no header row)",
        table.len(),
        path.display()
    );
    Ok(table)
}

fn reader_builder(has_headers: bool) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

fn load_with_header(path: &Path) -> csv::Result<Option<MappingTable>> {
    let mut reader = reader_builder(true).from_path(path)?;

    let headers = reader.headers()?;
    let has_column = |name: &str| headers.iter().any(|h| h == name);
    if !has_column(SOURCE_FILE_COLUMN) || !has_column(DESIGN_DOC_COLUMN) {
        return Ok(None);
    }

    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<HeaderRow>().enumerate() {
        let row = row?;
        // Row 1 is the header.
        let entry = make_entry(
            row.source_file.as_deref(),
            row.design_doc.as_deref(),
            index + 2,
        );
        if let Some(entry) = entry {
            entries.push(entry);
        }
    }

    Ok(Some(MappingTable { entries }))
}

fn load_without_header(path: &Path) -> csv::Result<MappingTable> {
    let mut reader = reader_builder(false).from_path(path)?;

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if let Some(entry) = make_entry(record.get(0), record.get(1), index + 1) {
            entries.push(entry);
        }
    }

    Ok(MappingTable { entries })
}

fn make_entry(
    source_file: Option<&str>,
    design_doc: Option<&str>,
    row: usize,
) -> Option<MappingEntry> {
    match (source_file, design_doc) {
        (Some(source_file), Some(design_doc))
            if !source_file.is_empty() && !design_doc.is_empty() =>
        {
            Some(MappingEntry {
                source_file: source_file.to_string(),
                design_doc: design_doc.to_string(),
            })
        }
        _ => {
            log::warn!("Skipping incomplete mapping row {}", row);
            None
        }
    }
}
