//! Loading of garden configuration files.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use garden_defence_core::GardenConfig;

/// Largest garden the CLI will allocate.
const MAX_CELLS: u64 = 4_096;

/// Reads and validates a TOML garden configuration.
pub(crate) fn load(path: &Path) -> Result<GardenConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read garden config {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid garden config {}", path.display()))
}

/// Parses TOML contents; keys that are absent keep their defaults.
pub(crate) fn parse(contents: &str) -> Result<GardenConfig> {
    let config: GardenConfig =
        toml::from_str(contents).context("failed to parse garden config toml contents")?;

    if config.rows == 0 || config.columns == 0 {
        bail!(
            "garden must have at least one row and column, got {}x{}",
            config.rows,
            config.columns
        );
    }
    let cells = u64::from(config.rows) * u64::from(config.columns);
    if cells > MAX_CELLS {
        bail!(
            "garden of {}x{} exceeds the {MAX_CELLS} cell limit",
            config.rows,
            config.columns
        );
    }
    if !(config.layout.cell_size.is_finite() && config.layout.cell_size > 0.0) {
        bail!("layout.cell_size must be positive, got {}", config.layout.cell_size);
    }
    if !config.pest_speed.is_finite() || config.pest_speed < 0.0 {
        bail!("pest_speed must be a non-negative number, got {}", config.pest_speed);
    }
    if !config.contact_range.is_finite() || config.contact_range < 0.0 {
        bail!(
            "contact_range must be a non-negative number, got {}",
            config.contact_range
        );
    }

    Ok(config)
}
