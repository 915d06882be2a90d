use crate::error::{Error, Result};
use dirs::home_dir;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOME_VAR: &str = "PT_HOME";
pub const DATABASE_VAR: &str = "PT_DATABASE";

const WORKING_DIRECTORY_NAME: &str = ".project-time";
const DATABASE_FILE_NAME: &str = "project-time.db";

/// Where `pt` keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub working_directory: PathBuf,
    pub database: PathBuf,
}

impl Config {
    /// Reads `.env` (if any) and the process environment, falling back to
    /// `~/.project-time`.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();

        Config::from_vars(
            dotenv::var(HOME_VAR).ok(),
            dotenv::var(DATABASE_VAR).ok(),
            home_dir(),
        )
    }

    fn from_vars(
        home: Option<String>,
        database: Option<String>,
        user_home: Option<PathBuf>,
    ) -> Result<Config> {
        let working_directory = match home.filter(|v| !v.is_empty()) {
            Some(v) => PathBuf::from(v),
            None => user_home
                .ok_or(Error::NoHomeDir)?
                .join(WORKING_DIRECTORY_NAME),
        };

        let database = match database.filter(|v| !v.is_empty()) {
            Some(v) => PathBuf::from(v),
            None => working_directory.join(DATABASE_FILE_NAME),
        };

        Ok(Config {
            working_directory,
            database,
        })
    }

    /// Creates the working directory and the database's parent directory if missing.
    pub fn ensure_directories(&self) -> Result<()> {
        create_directory(&self.working_directory)?;
        if let Some(parent) = self.database.parent() {
            if !parent.as_os_str().is_empty() {
                create_directory(parent)?;
            }
        }
        Ok(())
    }
}

fn create_directory(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    debug!(path = %path.display(), "creating directory");
    create_dir_all(path).map_err(|source| Error::WorkingDirectory {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_home_directory() {
        let config = Config::from_vars(None, None, Some(PathBuf::from("/home/pt"))).unwrap();
        assert_eq!(
            config.working_directory,
            PathBuf::from("/home/pt/.project-time")
        );
        assert_eq!(
            config.database,
            PathBuf::from("/home/pt/.project-time/project-time.db")
        );
    }

    #[test]
    fn home_override_moves_database() {
        let config =
            Config::from_vars(Some("/srv/pt".to_string()), None, Some(PathBuf::from("/home/pt")))
                .unwrap();
        assert_eq!(config.working_directory, PathBuf::from("/srv/pt"));
        assert_eq!(config.database, PathBuf::from("/srv/pt/project-time.db"));
    }

    #[test]
    fn database_override() {
        let config = Config::from_vars(
            None,
            Some("/tmp/times.db".to_string()),
            Some(PathBuf::from("/home/pt")),
        )
        .unwrap();
        assert_eq!(config.database, PathBuf::from("/tmp/times.db"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = Config::from_vars(
            Some(String::new()),
            Some(String::new()),
            Some(PathBuf::from("/home/pt")),
        )
        .unwrap();
        assert_eq!(
            config.working_directory,
            PathBuf::from("/home/pt/.project-time")
        );
    }

    #[test]
    fn missing_home_is_an_error() {
        assert!(matches!(
            Config::from_vars(None, None, None),
            Err(Error::NoHomeDir)
        ));
    }

    #[test]
    fn ensure_directories_creates_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            working_directory: dir.path().join("work"),
            database: dir.path().join("data").join("pt.db"),
        };

        config.ensure_directories().unwrap();
        assert!(dir.path().join("work").is_dir());
        assert!(dir.path().join("data").is_dir());

        // second call is a no-op
        config.ensure_directories().unwrap();
    }
}
