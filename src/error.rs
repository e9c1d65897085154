use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the cluster facade and its clients
///
/// None of these are retried or recovered locally; they are handed straight
/// back to the caller
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The kubeconfig could not be read or parsed, or the client could not be built from it
  #[error("Unable to connect to cluster using kubeconfig {}", .path.display())]
  Connection {
    path: PathBuf,
    #[source]
    source: BoxError,
  },

  /// A request to the cluster API failed
  #[error("Request to {operation} failed")]
  RemoteCall {
    operation: &'static str,
    #[source]
    source: BoxError,
  },

  /// The server version did not match the expected value for `field`
  #[error("{field} version does not match")]
  VersionMismatch { field: VersionField },

  /// The kubecheck config file could not be read or parsed
  #[error("Unable to load config file {}", .path.display())]
  Config {
    path: PathBuf,
    #[source]
    source: BoxError,
  },
}

impl Error {
  pub fn connection(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
    Self::Connection {
      path: path.into(),
      source: source.into(),
    }
  }

  pub fn config(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
    Self::Config {
      path: path.into(),
      source: source.into(),
    }
  }

  pub fn remote_call(operation: &'static str, source: impl Into<BoxError>) -> Self {
    Self::RemoteCall {
      operation,
      source: source.into(),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionField {
  Major,
  Minor,
}

impl std::fmt::Display for VersionField {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      VersionField::Major => write!(f, "Major"),
      VersionField::Minor => write!(f, "Minor"),
    }
  }
}
