use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    pub database: Option<String>,
    pub author_dump: Option<String>,
    pub work_dump: Option<String>,
    pub port: Option<u16>,
}

impl LoaderConfig {
    /// Starter config written by `bookloader init`
    pub fn starter() -> Self {
        Self {
            database: Some(default_database_path().to_string_lossy().to_string()),
            author_dump: Some("dumps/ol_dump_authors.txt".to_string()),
            work_dump: Some("dumps/ol_dump_works.txt".to_string()),
            port: Some(DEFAULT_PORT),
        }
    }

    pub fn database_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_database_path)
    }

    /// Author dump path from flag or config; required for loading
    pub fn author_dump_path(&self, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        flag.or_else(|| self.author_dump.as_ref().map(PathBuf::from))
            .ok_or_else(|| anyhow::anyhow!("no author dump configured (use --authors or author_dump in config)"))
    }

    /// Work dump path from flag or config; required for loading
    pub fn work_dump_path(&self, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        flag.or_else(|| self.work_dump.as_ref().map(PathBuf::from))
            .ok_or_else(|| anyhow::anyhow!("no work dump configured (use --works or work_dump in config)"))
    }

    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.port).unwrap_or(DEFAULT_PORT)
    }
}

pub const DEFAULT_PORT: u16 = 8080;

pub fn default_config_path() -> PathBuf {
    PathBuf::from("bookloader.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("bookloader.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LoaderConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LoaderConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &LoaderConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
