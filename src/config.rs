//! Host-binary configuration: which image to load, where the VFS is
//! rooted, and the log level. Pure host plumbing — never affects
//! guest-observable semantics.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VmConfig {
    pub image_path: PathBuf,
    #[serde(default = "default_vfs_root")]
    pub vfs_root: PathBuf,
    #[serde(default)]
    pub log_level: Option<String>,
    /// Stop after this many steps even if the guest never halts. `None`
    /// runs until halt or a fatal error.
    #[serde(default)]
    pub step_budget: Option<u64>,
}

fn default_vfs_root() -> PathBuf {
    PathBuf::from(".")
}

impl VmConfig {
    /// Overlays a TOML file's fields onto `self`, with `self` (typically
    /// parsed from CLI flags) taking precedence over the file for any
    /// field it actually set.
    pub fn merge_from_file(mut self, path: &std::path::Path) -> crate::error::VmResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let file_cfg: VmConfig = toml::from_str(&text)?;
        if self.vfs_root == default_vfs_root() {
            self.vfs_root = file_cfg.vfs_root;
        }
        if self.log_level.is_none() {
            self.log_level = file_cfg.log_level;
        }
        if self.step_budget.is_none() {
            self.step_budget = file_cfg.step_budget;
        }
        Ok(self)
    }
}

impl From<toml::de::Error> for crate::error::VmError {
    fn from(e: toml::de::Error) -> Self {
        crate::error::VmError::Config(e.to_string())
    }
}
