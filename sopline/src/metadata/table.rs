//! Sample mapping file parsing.
//!
//! A mapping file is tab-delimited with a header row. The first column holds
//! sample identifiers; every other column is a metadata category. Parsing
//! transposes the rows into columns and keeps the distinct values observed in
//! each one.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SoplineError};

/// Identifier columns that are never treated as categories.
pub const RESERVED_COLUMNS: [&str; 4] = [
    "#SampleID",
    "Description",
    "BarcodeSequence",
    "LinkerPrimerSequence",
];

/// One metadata column and the distinct values observed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    name: String,
    values: BTreeSet<String>,
}

/// Category name to value set, in header column order.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl MetadataTable {
    /// Parse a mapping file from disk.
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(file, path)
    }

    /// Parse mapping file content. `source` is only used in error messages.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut records = rdr.records();

        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(SoplineError::EmptyMapping {
                    path: source.to_path_buf(),
                })
            }
        };
        let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
        if header.iter().all(|h| h.is_empty()) {
            return Err(SoplineError::EmptyMapping {
                path: source.to_path_buf(),
            });
        }

        // Column 0 is the sample id; duplicate headers fold into their first occurrence.
        let mut table = MetadataTable::default();
        let mut column_slots: Vec<Option<usize>> = Vec::with_capacity(header.len());
        for (col, name) in header.iter().enumerate() {
            if col == 0 || RESERVED_COLUMNS.contains(&name.as_str()) {
                column_slots.push(None);
                continue;
            }
            column_slots.push(Some(table.slot_for(name)));
        }

        for record in records {
            let record = record?;
            if is_skippable(&record) {
                continue;
            }
            if record.len() != header.len() {
                return Err(SoplineError::RaggedRow {
                    path: source.to_path_buf(),
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    expected: header.len(),
                    found: record.len(),
                });
            }
            for (slot, value) in column_slots.iter().zip(record.iter()) {
                let Some(slot) = slot else { continue };
                let value = value.trim();
                if !value.is_empty() {
                    table.categories[*slot].values.insert(value.to_string());
                }
            }
        }

        Ok(table)
    }

    fn slot_for(&mut self, name: &str) -> usize {
        if let Some(&slot) = self.index.get(name) {
            return slot;
        }
        let slot = self.categories.len();
        self.categories.push(Category {
            name: name.to_string(),
            values: BTreeSet::new(),
        });
        self.index.insert(name.to_string(), slot);
        slot
    }

    /// Category names in header order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Distinct values of a category, sorted.
    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.index.get(name).map(|&slot| &self.categories[slot].values)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Blank lines and `#` comment lines below the header carry no sample data.
fn is_skippable(record: &csv::StringRecord) -> bool {
    match record.get(0) {
        None => true,
        Some(first) => {
            (record.len() == 1 && first.trim().is_empty()) || first.starts_with('#')
        }
    }
}
