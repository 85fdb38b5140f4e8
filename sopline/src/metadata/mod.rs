//! Sample mapping file handling: category extraction and selection.

pub mod categories;
pub mod table;

pub use categories::{resolve, CategorySelection, Rejection};
pub use table::{MetadataTable, RESERVED_COLUMNS};
