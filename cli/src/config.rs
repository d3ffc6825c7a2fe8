use std::path::{Path, PathBuf};

use eyre::WrapErr;

use crate::cli::RootArgs;

pub const DEFAULT_MOVIES_FILE: &str = "movies.json";
pub const DEFAULT_SERIES_FILE: &str = "series.json";
pub const DEFAULT_WATCHLIST_FILE: &str = "watchlist.json";
pub const DEFAULT_PREFERENCES_FILE: &str = "user-preferences.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub movies_path: PathBuf,
    pub series_path: PathBuf,
    pub watchlist_path: PathBuf,
    pub preferences_path: PathBuf,
}

impl AppConfig {
    /// Flags win over `CATALOG_*` env vars, which win over `<data dir>/<default name>`.
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        let data_dir = env_path("CATALOG_DATA_DIR").unwrap_or_else(|| args.data_dir.clone());

        let config = Self {
            movies_path: pick(
                args.movies_file.as_deref(),
                "CATALOG_MOVIES_FILE",
                data_dir.join(DEFAULT_MOVIES_FILE),
            ),
            series_path: pick(
                args.series_file.as_deref(),
                "CATALOG_SERIES_FILE",
                data_dir.join(DEFAULT_SERIES_FILE),
            ),
            watchlist_path: pick(
                args.watchlist_file.as_deref(),
                "CATALOG_WATCHLIST_FILE",
                data_dir.join(DEFAULT_WATCHLIST_FILE),
            ),
            preferences_path: pick(
                args.preferences_file.as_deref(),
                "CATALOG_PREFERENCES_FILE",
                data_dir.join(DEFAULT_PREFERENCES_FILE),
            ),
            data_dir,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates the directories the writable files live in. The catalog files are
    /// only read, so their directories are left alone.
    pub fn ensure_dirs(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.data_dir).wrap_err("create data_dir")?;
        ensure_parent_dir(&self.watchlist_path)?;
        ensure_parent_dir(&self.preferences_path)?;
        Ok(())
    }

    /// The watchlist and preferences are rewritten on every change, so neither
    /// may share a path with a catalog file or with each other.
    fn validate(&self) -> eyre::Result<()> {
        let writable = [
            ("watchlist", &self.watchlist_path),
            ("preferences", &self.preferences_path),
        ];
        let catalog = [("movies", &self.movies_path), ("series", &self.series_path)];
        for (name, path) in writable {
            if let Some((other, _)) = catalog.iter().find(|(_, p)| *p == path) {
                eyre::bail!("{name} file must not be the {other} file: {}", path.display());
            }
        }
        if self.watchlist_path == self.preferences_path {
            eyre::bail!(
                "watchlist and preferences must be different files: {}",
                self.watchlist_path.display()
            );
        }
        Ok(())
    }
}

fn pick(flag: Option<&Path>, var: &str, default: PathBuf) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| env_path(var))
        .unwrap_or(default)
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn ensure_parent_dir(path: &Path) -> eyre::Result<()> {
    let Some(parent) = path.parent() else {
        return Err(eyre::eyre!("invalid path: {path:?}"));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).wrap_err("create parent dir")?;
    Ok(())
}
