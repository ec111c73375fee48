//! Configuration types and path resolution for diffview.
//!
//! Diffview stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/diffview/config.toml` on Linux). A `diffview.toml` in
//! the project overrides it, and `DIFFVIEW_*` environment variables
//! override both.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
pub use types::ThemeConfig;

use anyhow::Result;

impl Config {
    /// Load config with precedence: env > project > global > defaults.
    /// Creates default config file if none exists.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.apply_env_overrides();
        Ok(config)
    }
}
