//! Region descriptors for the multi-region sweep, loaded from YAML so tests
//! and deployments can supply their own list instead of a compiled-in
//! constant.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One provincial region to sweep: the display name used in the provider's
/// `boundary` filter plus an optional administrative code carried through to
/// the output listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegionsFile {
    regions: Vec<Region>,
}

/// Loads and validates the region list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, if the list is
/// empty, or if it contains blank or duplicate region names.
pub fn load_regions(path: &Path) -> Result<Vec<Region>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: RegionsFile = serde_yaml::from_str(&content).map_err(ConfigError::RegionsFileParse)?;

    validate_regions(&file.regions)?;

    Ok(file.regions)
}

fn validate_regions(regions: &[Region]) -> Result<(), ConfigError> {
    if regions.is_empty() {
        return Err(ConfigError::Validation(
            "regions file must list at least one region".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for region in regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(region.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name: '{}'",
                region.name
            )));
        }
    }

    Ok(())
}
