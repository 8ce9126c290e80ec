use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG: &str = "TRADELOG_CONFIG";
pub const ENV_TOKEN: &str = "TRADELOG_GITHUB_TOKEN";
pub const ENV_OWNER: &str = "TRADELOG_REPO_OWNER";
pub const ENV_REPO: &str = "TRADELOG_REPO_NAME";
pub const ENV_BRANCH: &str = "TRADELOG_BRANCH";

/// Optional TOML configuration. Everything has a default; the credential is
/// environment-only and never read from the file.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub store: Option<StoreConfig>,
    pub paths: Option<PathsConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    pub dataset_path: Option<String>,
    pub local_root: Option<String>,
}

/// Connection settings for the remote store, present only when all four
/// values survived selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStoreConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

/// Explicit path wins, then env `TRADELOG_CONFIG`, then built-in defaults.
pub fn resolve_config(path: Option<PathBuf>) -> Result<Config, String> {
    let path = path.or_else(|| env::var(ENV_CONFIG).ok().map(PathBuf::from));
    match path {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

/// Backend selection, decided exactly once at process start: remote when all
/// four values are present and non-empty, local otherwise. Empty or
/// whitespace-only values count as absent.
pub fn select_remote(
    token: Option<&str>,
    owner: Option<&str>,
    repo: Option<&str>,
    branch: Option<&str>,
) -> Option<RemoteStoreConfig> {
    Some(RemoteStoreConfig {
        token: non_empty(token)?,
        owner: non_empty(owner)?,
        repo: non_empty(repo)?,
        branch: non_empty(branch)?,
    })
}

/// Resolves the remote configuration from the environment, falling back to
/// the config file for everything except the credential.
pub fn remote_from_env(config: &Config) -> Option<RemoteStoreConfig> {
    let store = config.store.clone().unwrap_or_default();
    let token = env::var(ENV_TOKEN).ok();
    let owner = env::var(ENV_OWNER).ok().or(store.owner);
    let repo = env::var(ENV_REPO).ok().or(store.repo);
    let branch = env::var(ENV_BRANCH).ok().or(store.branch);
    select_remote(
        token.as_deref(),
        owner.as_deref(),
        repo.as_deref(),
        branch.as_deref(),
    )
}

pub fn dataset_path(config: &Config) -> String {
    config
        .paths
        .as_ref()
        .and_then(|paths| paths.dataset_path.clone())
        .unwrap_or_else(|| crate::persistence::DATASET_PATH.to_string())
}

pub fn local_root(config: &Config) -> PathBuf {
    config
        .paths
        .as_ref()
        .and_then(|paths| paths.local_root.clone())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
