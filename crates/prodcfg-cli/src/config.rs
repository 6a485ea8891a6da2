//! CLI configuration.
//!
//! Read from a TOML file:
//!
//! ```toml
//! data_dir = "../data"
//!
//! [engine]
//! max_passes = 32
//! log_formula_errors = true
//! ```
//!
//! Relative paths are taken relative to the file's own directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use prodcfg_traits::config::EngineConfig;

use crate::error::{CliError, CliResult};

/// Configuration file used when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "config/prodcfg.toml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory holding the registry, templates and workbooks
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Registry file [default: `<data_dir>/registry.json`]
    pub registry_file: Option<PathBuf>,

    /// Template directory [default: `<data_dir>/products`]
    pub products_dir: Option<PathBuf>,

    /// Workbook directory [default: `<data_dir>/workbooks`]
    pub workbooks_dir: Option<PathBuf>,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            registry_file: None,
            products_dir: None,
            workbooks_dir: None,
            engine: EngineConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    /// Load the given file, or the default file when it exists, or defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Point every location at a new data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self.registry_file = None;
        self.products_dir = None;
        self.workbooks_dir = None;
        self
    }

    /// Registry file location.
    pub fn registry_file(&self) -> PathBuf {
        self.registry_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("registry.json"))
    }

    /// Template directory location.
    pub fn products_dir(&self) -> PathBuf {
        self.products_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("products"))
    }

    /// Workbook directory location.
    pub fn workbooks_dir(&self) -> PathBuf {
        self.workbooks_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("workbooks"))
    }

    fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.data_dir = rebase(self.data_dir);
        self.registry_file = self.registry_file.map(rebase);
        self.products_dir = self.products_dir.map(rebase);
        self.workbooks_dir = self.workbooks_dir.map(rebase);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.registry_file(), PathBuf::from("data/registry.json"));
        assert_eq!(config.products_dir(), PathBuf::from("data/products"));
        assert_eq!(config.workbooks_dir(), PathBuf::from("data/workbooks"));
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_from_file_rebases_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prodcfg.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
data_dir = "catalog"
workbooks_dir = "/srv/workbooks"

[engine]
max_passes = 8
"#
        )
        .unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, dir.path().join("catalog"));
        assert_eq!(config.products_dir(), dir.path().join("catalog").join("products"));
        assert_eq!(config.workbooks_dir(), PathBuf::from("/srv/workbooks"));
        assert_eq!(config.engine.max_passes, 8);
        assert!(config.engine.log_formula_errors);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prodcfg.toml");
        std::fs::write(&path, "data_dir = [").unwrap();
        assert!(matches!(CliConfig::from_file(&path), Err(CliError::Config(_))));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(CliConfig::load(Some(&missing)), Err(CliError::Io(_))));
    }

    #[test]
    fn test_data_dir_override() {
        let config = CliConfig {
            products_dir: Some(PathBuf::from("/elsewhere")),
            ..CliConfig::default()
        }
        .with_data_dir(PathBuf::from("/demo"));
        assert_eq!(config.products_dir(), PathBuf::from("/demo/products"));
    }
}
