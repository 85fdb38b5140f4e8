//! Path-safety checks for mapping file content.
//!
//! Category names and their values end up as output directory names
//! (`taxa_summary/taxa_<name>`, `core_microbiome_<name>_<value>`), so both are
//! checked before they can reach a path. Failing a check drops the name or
//! value from the run; it never ends the run.

use anyhow::{bail, Result};

/// Maximum allowed length for a single name or value.
pub const MAX_COMPONENT_LENGTH: usize = 128;

/// Validates that a category name or value is usable as part of a file name.
///
/// # Examples
///
/// ```
/// use sopline::validation::validate_path_component;
///
/// assert!(validate_path_component("Treatment").is_ok());
/// assert!(validate_path_component("Body.Site").is_ok());
/// assert!(validate_path_component("../etc").is_err());
/// ```
pub fn validate_path_component(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("empty name");
    }

    if name.len() > MAX_COMPONENT_LENGTH {
        bail!(
            "too long: {} characters (max {})",
            name.len(),
            MAX_COMPONENT_LENGTH
        );
    }

    if name == "." || name == ".." {
        bail!("'{name}' is reserved");
    }

    if name.contains(['/', '\\', '\0']) {
        bail!("contains a path separator");
    }

    Ok(())
}
