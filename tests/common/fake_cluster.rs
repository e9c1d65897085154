use std::sync::atomic::{AtomicUsize, Ordering};

use kubecheck::clients::ClusterClients;
use kubecheck::error::{Error, Result};
use kubecheck::k8s::{AccessReview, PermissionQuery};
use kubecheck::version::ClusterVersion;

/// Version reported by a fake cluster that has not been given one
pub const DEFAULT_GIT_VERSION: &str = "v0.0.0-master+$Format:%h$";

/// Fake cluster client for testing
///
/// Defaults mirror an empty cluster: a placeholder git version with no
/// major/minor and every access review denied. Override fields to simulate
/// other responses.
pub struct FakeClusterClients {
  pub version: ClusterVersion,
  pub version_error: Option<String>,
  pub access_review: AccessReview,
  pub access_error: Option<String>,
  /// Queries received by `review_access`, in order
  pub queries: std::sync::Mutex<Vec<PermissionQuery>>,
  pub calls: AtomicUsize,
}

impl Default for FakeClusterClients {
  fn default() -> Self {
    Self {
      version: ClusterVersion {
        raw: DEFAULT_GIT_VERSION.into(),
        ..Default::default()
      },
      version_error: None,
      access_review: AccessReview::default(),
      access_error: None,
      queries: Default::default(),
      calls: AtomicUsize::new(0),
    }
  }
}

impl FakeClusterClients {
  /// Number of requests made against the fake so far
  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl ClusterClients for FakeClusterClients {
  async fn server_version(&self) -> Result<ClusterVersion> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    match &self.version_error {
      Some(message) => Err(Error::remote_call("get /version", message.to_owned())),
      None => Ok(self.version.clone()),
    }
  }

  async fn review_access(&self, query: &PermissionQuery) -> Result<AccessReview> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.queries.lock().unwrap().push(query.clone());
    match &self.access_error {
      Some(message) => Err(Error::remote_call("create selfsubjectaccessreviews", message.to_owned())),
      None => Ok(self.access_review.clone()),
    }
  }
}
