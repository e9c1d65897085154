use kubecheck::cluster::Cluster;
use kubecheck::k8s::AccessReview;
use kubecheck::version::ClusterVersion;

use super::fake_cluster::FakeClusterClients;

/// Builds a fake cluster with no overrides
pub fn default_cluster() -> Cluster<FakeClusterClients> {
  Cluster::new(FakeClusterClients::default())
}

/// Builds a fake cluster reporting the given major/minor
pub fn cluster_at(major: &str, minor: &str) -> Cluster<FakeClusterClients> {
  Cluster::new(FakeClusterClients {
    version: make_version(major, minor),
    ..Default::default()
  })
}

/// Builds a fake cluster that allows every access review
pub fn allowing_cluster(reason: &str) -> Cluster<FakeClusterClients> {
  Cluster::new(FakeClusterClients {
    access_review: AccessReview {
      allowed: true,
      reason: Some(reason.into()),
    },
    ..Default::default()
  })
}

/// Builds a fake cluster whose access review requests fail
pub fn failing_access_cluster(message: &str) -> Cluster<FakeClusterClients> {
  Cluster::new(FakeClusterClients {
    access_error: Some(message.into()),
    ..Default::default()
  })
}

/// Creates a ClusterVersion with a matching git version
pub fn make_version(major: &str, minor: &str) -> ClusterVersion {
  ClusterVersion {
    major: major.into(),
    minor: minor.into(),
    raw: format!("v{major}.{minor}.0"),
    platform: "linux/amd64".into(),
  }
}
