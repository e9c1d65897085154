use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{Error, Result};

/// Top-level configuration loaded from `.kubecheck.yaml` or an explicit path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
  /// Kubeconfig to use instead of `$HOME/.kube/config`
  #[serde(default)]
  pub kubeconfig: Option<PathBuf>,

  /// Kubeconfig context to use instead of the current context
  #[serde(default)]
  pub context: Option<String>,

  #[serde(default)]
  pub expect: ExpectedVersion,
}

/// Server version the cluster is expected to report.
///
/// Values may be written as strings or bare numbers (`minor: 30`).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExpectedVersion {
  #[serde(default, deserialize_with = "version_field")]
  pub major: Option<String>,

  #[serde(default, deserialize_with = "version_field")]
  pub minor: Option<String>,
}

fn version_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<serde_yaml::Value>::deserialize(deserializer)? {
    None | Some(serde_yaml::Value::Null) => Ok(None),
    Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
    Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
    Some(other) => Err(de::Error::custom(format!(
      "expected a version string or number, found {other:?}"
    ))),
  }
}

const DEFAULT_CONFIG_FILE: &str = ".kubecheck.yaml";

/// Load configuration from an explicit path, the default `.kubecheck.yaml` in the
/// current working directory, or fall back to `Config::default()`.
pub fn load(path: Option<&Path>) -> Result<Config> {
  load_from(path, std::env::current_dir().ok().as_deref())
}

/// An explicit path must exist; the default file is only read when present
fn load_from(path: Option<&Path>, base_dir: Option<&Path>) -> Result<Config> {
  if let Some(path) = path {
    return read(path);
  }

  match base_dir.map(|dir| dir.join(DEFAULT_CONFIG_FILE)) {
    Some(default_path) if default_path.exists() => read(&default_path),
    _ => Ok(Config::default()),
  }
}

fn read(path: &Path) -> Result<Config> {
  let contents = std::fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
  let config = serde_yaml::from_str(&contents).map_err(|e| Error::config(path, e))?;
  tracing::debug!(path = %path.display(), "Loaded config");

  Ok(config)
}
