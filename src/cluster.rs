use crate::{
  clients::ClusterClients,
  error::Result,
  k8s::{AccessReview, PermissionQuery},
  version::{self, ClusterVersion},
};

/// Queries against a single cluster
///
/// Every operation issues exactly one request through the injected clients
/// and holds no state between calls
pub struct Cluster<C> {
  clients: C,
}

impl<C: ClusterClients> Cluster<C> {
  pub fn new(clients: C) -> Self {
    Self { clients }
  }

  #[doc(hidden)]
  pub fn clients(&self) -> &C {
    &self.clients
  }

  /// Returns the full server version as reported by discovery
  pub async fn server_version(&self) -> Result<ClusterVersion> {
    self.clients.server_version().await
  }

  /// Returns the server's git version string, e.g. `v1.30.2`
  pub async fn get_version(&self) -> Result<String> {
    let version = self.server_version().await?;

    Ok(version.to_string())
  }

  /// Returns `Ok(true)` when the server reports exactly `major`.`minor`
  ///
  /// A mismatch is an error naming the first field that differs, major before minor
  pub async fn is_version(&self, major: &str, minor: &str) -> Result<bool> {
    let version = self.server_version().await?;

    version::check(&version, major, minor).into_result()
  }

  /// Asks the cluster whether the current identity may perform the query
  pub async fn can_i(&self, query: &PermissionQuery) -> Result<AccessReview> {
    self.clients.review_access(query).await
  }

  /// Returns whether the current identity may create Deployments
  ///
  /// A denial is `Ok(false)`; only a failed request is an error
  pub async fn can_create_deployments(&self) -> Result<bool> {
    let review = self.can_i(&PermissionQuery::create_deployments()).await?;

    Ok(review.allowed)
  }
}
