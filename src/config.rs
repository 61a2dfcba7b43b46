use std::path::PathBuf;

use crate::db;
use crate::error::AppError;

pub const HOME_ENV: &str = "STRATPLAN_HOME";
pub const AUTHOR_ENV: &str = "STRATPLAN_AUTHOR";
pub const OFFLINE_ENV: &str = "STRATPLAN_OFFLINE";
pub const LOG_ENV: &str = "STRATPLAN_LOG";

const DATA_DIR_NAME: &str = ".stratplan";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Identity recorded as `createdBy` on new plans.
    pub author: Option<String>,
    /// Start with the connectivity signal offline.
    pub offline: bool,
}

impl Config {
    /// Flags win over the environment, the environment over defaults.
    pub fn resolve(data_dir: Option<PathBuf>, author: Option<String>) -> Result<Self, AppError> {
        Self::resolve_with(data_dir, author, |name| std::env::var(name).ok())
    }

    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        author: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let data_dir = match data_dir.or_else(|| non_empty(env(HOME_ENV)).map(PathBuf::from)) {
            Some(dir) => dir,
            None => dirs::home_dir()
                .map(|home| home.join(DATA_DIR_NAME))
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "unable to resolve a data directory; set {HOME_ENV} or pass --data-dir"
                    ))
                })?,
        };
        let author = non_empty(author).or_else(|| non_empty(env(AUTHOR_ENV)));
        let offline = env(OFFLINE_ENV).is_some_and(|value| parse_flag(&value));
        Ok(Self {
            data_dir,
            author,
            offline,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        db::resolve_db_path(&self.data_dir)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
