use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ledger::budget::BudgetThreshold;
use crate::ledger::period::PeriodKind;
use crate::{CoreError, CoreResult};

pub const HOME_ENV_VAR: &str = "PENNYDASH_HOME";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// User preferences. Every field is optional in `config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub default_period: PeriodKind,
    pub top_categories: usize,
    pub recent_limit: usize,
    pub monthly_budget: Option<f64>,
    pub budget_threshold: BudgetThreshold,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_period: PeriodKind::ThisMonth,
            top_categories: 5,
            recent_limit: 10,
            monthly_budget: None,
            budget_threshold: BudgetThreshold::default(),
        }
    }
}

impl Settings {
    fn validate(&self, path: &Path) -> CoreResult<()> {
        if self.top_categories == 0 {
            return Err(CoreError::invalid_config(path, "`top_categories` must be at least 1."));
        }
        if self.recent_limit == 0 {
            return Err(CoreError::invalid_config(path, "`recent_limit` must be at least 1."));
        }
        if let Some(budget) = self.monthly_budget
            && (!budget.is_finite() || budget < 0.0)
        {
            return Err(CoreError::invalid_config(
                path,
                "`monthly_budget` must be a non-negative number.",
            ));
        }
        Ok(())
    }
}

pub fn resolve_home(home_override: Option<&Path>) -> CoreResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".pennydash")
            } else {
                return Err(CoreError::home_unresolved(
                    "no home directory is available for this user.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}

/// Loads `<home>/config.json`, falling back to defaults when it is absent.
pub fn load_settings(home_override: Option<&Path>) -> CoreResult<Settings> {
    let home = resolve_home(home_override)?;
    let path = config_path(&home);

    let body = match fs::read_to_string(&path) {
        Ok(body) => body,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Settings::default());
        }
        Err(error) => return Err(CoreError::invalid_config(&path, &error.to_string())),
    };

    if body.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings = serde_json::from_str::<Settings>(&body)
        .map_err(|error| CoreError::invalid_config(&path, &error.to_string()))?;
    settings.validate(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(settings)
}

fn absolutize(path: &Path) -> CoreResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| CoreError::home_unresolved(&error.to_string()))
}
