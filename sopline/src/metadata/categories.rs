//! Resolution of the categories an analysis run covers.

use std::fmt;

use super::table::MetadataTable;
use crate::validation::validate_path_component;

/// A category left out of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Requested but not a category of the mapping file.
    Unknown(String),
    /// The name cannot be used in an output path.
    UnsafeName { name: String, reason: String },
}

impl Rejection {
    pub fn name(&self) -> &str {
        match self {
            Rejection::Unknown(name) | Rejection::UnsafeName { name, .. } => name,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Unknown(name) => write!(f, "{name} not found in mapping file, omitting"),
            Rejection::UnsafeName { name, reason } => {
                write!(f, "{name} cannot be used in an output path ({reason}), omitting")
            }
        }
    }
}

/// Categories selected for a run, plus any names that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    categories: Vec<String>,
    rejected: Vec<Rejection>,
}

impl CategorySelection {
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Names left out of the run, in the order they were seen. Reporting them
    /// is up to the caller.
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    fn admit(&mut self, name: &str) {
        if self.categories.iter().any(|c| c == name)
            || self.rejected.iter().any(|r| r.name() == name)
        {
            return;
        }
        match validate_path_component(name) {
            Ok(()) => self.categories.push(name.to_string()),
            Err(reason) => self.rejected.push(Rejection::UnsafeName {
                name: name.to_string(),
                reason: reason.to_string(),
            }),
        }
    }
}

/// Resolve a colon-separated category request against the mapping file.
///
/// Without a request every category of `table` is selected in header order.
/// Unknown names and names unusable in a path are omitted and listed in
/// [`CategorySelection::rejected`]; resolution itself never fails and an empty
/// selection is valid.
pub fn resolve(requested: Option<&str>, table: &MetadataTable) -> CategorySelection {
    let mut selection = CategorySelection::default();

    let Some(requested) = requested else {
        for name in table.names() {
            selection.admit(name);
        }
        return selection;
    };

    for token in requested.split(':').map(str::trim).filter(|t| !t.is_empty()) {
        if table.contains(token) {
            selection.admit(token);
        } else if !selection.rejected.iter().any(|r| r.name() == token) {
            selection.rejected.push(Rejection::Unknown(token.to_string()));
        }
    }
    selection
}
