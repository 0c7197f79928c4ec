//! Temporary configuration files for testing
//!
//! Each guard owns a temporary directory holding a `config.toml`; the
//! directory is removed when the guard is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A configuration file living in its own temporary directory
pub struct ConfigFileGuard {
  /// The temporary directory holding the file
  pub temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Write `content` to a fresh `config.toml`
  pub fn new(content: &str) -> anyhow::Result<Self> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content)?;
    Ok(Self { temp_dir, path })
  }

  /// A path inside the temporary directory where no file exists
  pub fn missing() -> anyhow::Result<Self> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("absent.toml");
    Ok(Self { temp_dir, path })
  }

  /// Path of the configuration file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The temporary directory, usable as a working directory
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Write another file next to the configuration file
  pub fn write_beside(&self, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = self.dir().join(name);
    fs::write(&path, content)?;
    Ok(path)
  }
}
