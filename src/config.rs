//! Configuration management for mirrorseed.
//!
//! Settings come from four layers, later layers winning: built-in defaults,
//! a JSON settings file (`mirrorseed.json`), environment variables, and CLI
//! flags. A `.env` file is loaded before anything else in `main`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default settings file name, discovered in the working directory.
pub const SETTINGS_FILE: &str = "mirrorseed.json";

/// Default origin of the legacy site, used to absolutize relative URLs.
pub const DEFAULT_SITE_BASE: &str = "https://www.thelaserstore.com";

/// Resolved runtime settings for one batch run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root of the static HTML mirror (one directory per page).
    pub mirror_dir: PathBuf,
    /// Directory the JSON output files are written to.
    pub output_dir: PathBuf,
    /// Origin used when rewriting relative image URLs to absolute.
    pub site_base: String,
}

/// Shape of the optional `mirrorseed.json` settings file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsFile {
    mirror_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    site_base: Option<String>,
}

/// CLI-level overrides passed into settings loading.
#[derive(Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub mirror_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub site_base: Option<String>,
}

impl Settings {
    /// Load settings with the standard precedence chain.
    pub fn load(options: LoadOptions) -> anyhow::Result<Self> {
        let file = match &options.config_path {
            Some(path) => Some(read_settings_file(path)?),
            None => {
                let default = Path::new(SETTINGS_FILE);
                if default.exists() {
                    Some(read_settings_file(default)?)
                } else {
                    None
                }
            }
        };
        let file = file.unwrap_or_default();

        let mirror_dir = options
            .mirror_dir
            .or_else(|| std::env::var("MIRRORSEED_MIRROR_DIR").ok().map(PathBuf::from))
            .or(file.mirror_dir)
            .unwrap_or_else(|| PathBuf::from("mirror"));

        let output_dir = options
            .output_dir
            .or_else(|| std::env::var("MIRRORSEED_OUTPUT_DIR").ok().map(PathBuf::from))
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from("data"));

        let site_base = options
            .site_base
            .or_else(|| std::env::var("MIRRORSEED_SITE_BASE").ok())
            .or(file.site_base)
            .unwrap_or_else(|| DEFAULT_SITE_BASE.to_string());

        Ok(Self {
            mirror_dir,
            output_dir,
            site_base: site_base.trim_end_matches('/').to_string(),
        })
    }

    /// Path of the output file for one entity type.
    pub fn output_file(&self, entity: &str) -> PathBuf {
        self.output_dir.join(format!("{entity}.json"))
    }
}

fn read_settings_file(path: &Path) -> anyhow::Result<SettingsFile> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read settings file {}: {}", path.display(), e))?;
    let parsed = serde_json::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("invalid settings file {}: {}", path.display(), e))?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_win() {
        let settings = Settings::load(LoadOptions {
            mirror_dir: Some(PathBuf::from("/tmp/mirror")),
            output_dir: Some(PathBuf::from("/tmp/out")),
            site_base: Some("https://example.test/".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.mirror_dir, PathBuf::from("/tmp/mirror"));
        assert_eq!(settings.site_base, "https://example.test");
        assert_eq!(
            settings.output_file("products"),
            PathBuf::from("/tmp/out/products.json")
        );
    }
}
