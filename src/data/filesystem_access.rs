//! Platform directories used for the scanner's config.

use std::path::PathBuf;

pub const APP_DIR: &str = "defect_overlay";

#[derive(Debug)]
pub enum FsAccess {
    Config,
}

impl FsAccess {
    /// Returns the app directory without creating it, e.g. `~/.config/defect_overlay`.
    pub fn path(&self) -> anyhow::Result<PathBuf> {
        let base_path = match self {
            FsAccess::Config => dirs::config_dir(),
        };

        let mut path = base_path.ok_or_else(|| {
            anyhow::anyhow!("Unsupported operating system. Supported OS: Linux, MacOS, Windows.")
        })?;
        path.push(APP_DIR);
        Ok(path)
    }
}
