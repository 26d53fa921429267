//! `icons.json` data model for a browser extension manifest
//!
//! Mirrors the `"icons"` key of an extension's `manifest.json`: an object that
//! maps each icon size (as a string) to the path of the matching PNG file.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

/// File name of the fragment written next to the icons.
pub const MANIFEST_FILE: &str = "icons.json";

/// The `"icons"` map of an extension manifest
///
/// Keys serialize as strings (`"16"`, `"48"`, ...) in ascending size order.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct IconsManifest {
    pub icons: BTreeMap<u32, String>,
}

impl IconsManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the file for `size`, replacing any earlier entry.
    pub fn add_icon(&mut self, size: u32, filename: impl Into<String>) {
        self.icons.insert(size, filename.into());
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize icons.json")
    }

    /// Write the fragment to `dir/icons.json`, overwriting it.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(dir.join(MANIFEST_FILE), json).context("Failed to write icons.json file")?;

        println!("✓ Generated {MANIFEST_FILE}");
        Ok(())
    }
}
