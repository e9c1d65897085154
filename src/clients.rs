use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};

use crate::{
  error::{Error, Result},
  k8s::{self, AccessReview, PermissionQuery},
  version::ClusterVersion,
};

/// Trait abstracting the Kubernetes API operations used by kubecheck
pub trait ClusterClients {
  fn server_version(&self) -> impl std::future::Future<Output = Result<ClusterVersion>> + Send;
  fn review_access(&self, query: &PermissionQuery) -> impl std::future::Future<Output = Result<AccessReview>> + Send;
}

/// Real Kubernetes client implementation wrapping kube-rs
pub struct RealClusterClients {
  client: kube::Client,
}

impl RealClusterClients {
  /// Wrap an already constructed client
  pub fn new(client: kube::Client) -> Self {
    Self { client }
  }

  /// Build a client from the kubeconfig at `path`, or `$HOME/.kube/config` when not provided
  ///
  /// `context` selects a kubeconfig context other than the current one
  pub async fn connect(path: Option<&Path>, context: Option<&str>) -> Result<Self> {
    let path = match path {
      Some(path) => path.to_path_buf(),
      None => default_kubeconfig_path()?,
    };
    tracing::debug!(path = %path.display(), "Reading kubeconfig");

    let kubeconfig = Kubeconfig::read_from(&path).map_err(|e| Error::connection(&path, e))?;
    let options = KubeConfigOptions {
      context: context.map(str::to_owned),
      ..Default::default()
    };
    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &options)
      .await
      .map_err(|e| Error::connection(&path, e))?;
    tracing::info!(cluster_url = %config.cluster_url, "Connecting to cluster");

    let client = kube::Client::try_from(config).map_err(|e| Error::connection(&path, e))?;

    Ok(Self::new(client))
  }
}

impl ClusterClients for RealClusterClients {
  async fn server_version(&self) -> Result<ClusterVersion> {
    k8s::get_server_version(&self.client).await
  }

  async fn review_access(&self, query: &PermissionQuery) -> Result<AccessReview> {
    k8s::review_access(&self.client, query).await
  }
}

/// The per-user kubeconfig location, `$HOME/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf> {
  match home::home_dir() {
    Some(home) => Ok(home.join(".kube").join("config")),
    None => Err(Error::connection(
      "$HOME/.kube/config",
      "unable to determine the home directory",
    )),
  }
}
