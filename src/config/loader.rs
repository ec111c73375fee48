//! File loading and merging for diffview configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{Config, ThemeConfig};

const DEFAULT_CONFIG_TOML: &str = r##"# diffview configuration

# Spaces per tab.
tab_width = 4

# Syntect theme for syntax coloring.
syntax_theme = "base16-ocean.dark"

# Plain "<kind>: <text>" output for screen readers.
screen_reader = false

[theme]
# added_bg = "#12331d"
# removed_bg = "#3f1618"
"##;

impl Config {
    /// Loads the global config from `~/.config/diffview/config.toml`.
    ///
    /// If no config file exists, creates one with the defaults and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Read `path`, writing the default config there first when it is missing.
    pub(super) fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG_TOML)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            debug!(path = ?path, "wrote default config");
            let config: Config = toml::from_str(DEFAULT_CONFIG_TOML)
                .with_context(|| "Failed to parse default config".to_string())?;
            return Ok(config);
        }

        Self::load_file(path)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Look for diffview.toml in the current dir, then walk up to the git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let cwd = std::env::current_dir()?;
        match Self::find_project_file(&cwd) {
            Some(path) => {
                debug!(path = ?path, "using project config");
                Ok(Some(Self::load_file(&path)?))
            }
            None => Ok(None),
        }
    }

    /// Walk up from `start` looking for the project config file.
    ///
    /// Stops at the first directory containing `.git` or at the filesystem root.
    pub(super) fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if dir.join(".git").exists() || !dir.pop() {
                return None;
            }
        }
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            tab_width: project.tab_width.or(global.tab_width),
            max_height: project.max_height.or(global.max_height),
            syntax_theme: project.syntax_theme.or(global.syntax_theme),
            screen_reader: project.screen_reader.or(global.screen_reader),
            color: project.color.or(global.color),
            theme: ThemeConfig::merge(global.theme, project.theme),
        }
    }
}
