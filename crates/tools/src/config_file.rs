//! On-disk generator settings (TOML) and room templates (JSON).

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use levelgen::{GenerationConfig, RoomTemplate};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GeneratorFile {
    /// Zero or absent picks a runtime seed.
    pub seed: Option<u64>,
    pub generation: GenerationConfig,
}

impl GeneratorFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let file: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML: {}", path.display()))?;
        Ok(file)
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let text = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

pub fn load_template(path: &Path) -> Result<RoomTemplate> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;
    let template: RoomTemplate = serde_json::from_str(&content)
        .with_context(|| format!("Failed to deserialize template JSON: {}", path.display()))?;
    template.validate().with_context(|| format!("Invalid room template: {}", path.display()))?;
    Ok(template)
}
