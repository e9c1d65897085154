use k8s_openapi::{
  api::authorization::v1::{ResourceAttributes, SelfSubjectAccessReview, SelfSubjectAccessReviewSpec},
  apimachinery::pkg::version::Info,
};
use kube::{
  Client,
  api::{Api, PostParams},
};
use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  version::ClusterVersion,
};

/// A verb on a resource type, checked against the caller's own identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionQuery {
  pub verb: String,
  pub resource: String,
  /// API group of the resource; `None` is the core group
  pub group: Option<String>,
}

impl PermissionQuery {
  pub fn new(verb: &str, resource: &str, group: Option<&str>) -> Self {
    Self {
      verb: verb.to_owned(),
      resource: resource.to_owned(),
      group: group.map(str::to_owned),
    }
  }

  /// `create` on `deployments.apps`
  pub fn create_deployments() -> Self {
    Self::new("create", "deployments", Some("apps"))
  }
}

/// Result of a self access review
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessReview {
  pub allowed: bool,
  /// Human readable reason given by the authorizer, if any
  pub reason: Option<String>,
}

impl From<Info> for ClusterVersion {
  fn from(info: Info) -> Self {
    Self {
      major: info.major,
      minor: info.minor,
      raw: info.git_version,
      platform: info.platform,
    }
  }
}

/// Returns the server version from the discovery `/version` endpoint
pub async fn get_server_version(client: &Client) -> Result<ClusterVersion> {
  tracing::debug!("Querying server version");
  let info = client
    .apiserver_version()
    .await
    .map_err(|e| Error::remote_call("get /version", e))?;

  Ok(info.into())
}

/// Submits a `SelfSubjectAccessReview` for the query and returns the authorizer's decision
pub async fn review_access(client: &Client, query: &PermissionQuery) -> Result<AccessReview> {
  tracing::debug!(verb = %query.verb, resource = %query.resource, "Reviewing self access");
  let api: Api<SelfSubjectAccessReview> = Api::all(client.clone());
  let review = api
    .create(&PostParams::default(), &access_review_request(query))
    .await
    .map_err(|e| Error::remote_call("create selfsubjectaccessreviews", e))?;

  Ok(access_review_result(review))
}

fn access_review_request(query: &PermissionQuery) -> SelfSubjectAccessReview {
  SelfSubjectAccessReview {
    spec: SelfSubjectAccessReviewSpec {
      resource_attributes: Some(ResourceAttributes {
        verb: Some(query.verb.to_owned()),
        resource: Some(query.resource.to_owned()),
        group: query.group.to_owned(),
        ..Default::default()
      }),
      ..Default::default()
    },
    ..Default::default()
  }
}

/// A review without a status is treated as not allowed
fn access_review_result(review: SelfSubjectAccessReview) -> AccessReview {
  match review.status {
    Some(status) => AccessReview {
      allowed: status.allowed,
      reason: status.reason.filter(|r| !r.is_empty()),
    },
    None => AccessReview::default(),
  }
}

#[cfg(test)]
mod tests {
  use k8s_openapi::api::authorization::v1::SubjectAccessReviewStatus;

  use super::*;

  #[test]
  fn cluster_version_from_info() {
    let info = Info {
      major: "1".into(),
      minor: "30".into(),
      git_version: "v1.30.2-eks-1552ad0".into(),
      platform: "linux/amd64".into(),
      ..Default::default()
    };

    let version = ClusterVersion::from(info);
    assert_eq!(version.major, "1");
    assert_eq!(version.minor, "30");
    assert_eq!(version.raw, "v1.30.2-eks-1552ad0");
    assert_eq!(version.platform, "linux/amd64");
  }

  #[test]
  fn create_deployments_query() {
    let query = PermissionQuery::create_deployments();
    assert_eq!(query.verb, "create");
    assert_eq!(query.resource, "deployments");
    assert_eq!(query.group.as_deref(), Some("apps"));
  }

  #[test]
  fn request_carries_resource_attributes() {
    let request = access_review_request(&PermissionQuery::create_deployments());
    let attrs = request.spec.resource_attributes.unwrap();

    assert_eq!(attrs.verb.as_deref(), Some("create"));
    assert_eq!(attrs.resource.as_deref(), Some("deployments"));
    assert_eq!(attrs.group.as_deref(), Some("apps"));
    assert!(attrs.namespace.is_none());
    assert!(request.status.is_none());
  }

  #[test]
  fn result_without_status_is_denied() {
    let review = access_review_result(SelfSubjectAccessReview::default());
    assert_eq!(review, AccessReview::default());
  }

  #[test]
  fn result_keeps_allowed_and_reason() {
    let review = SelfSubjectAccessReview {
      status: Some(SubjectAccessReviewStatus {
        allowed: true,
        reason: Some("RBAC: allowed by ClusterRoleBinding \"admin\"".into()),
        ..Default::default()
      }),
      ..Default::default()
    };

    let result = access_review_result(review);
    assert!(result.allowed);
    assert_eq!(
      result.reason.as_deref(),
      Some("RBAC: allowed by ClusterRoleBinding \"admin\"")
    );
  }

  #[test]
  fn result_drops_empty_reason() {
    let review = SelfSubjectAccessReview {
      status: Some(SubjectAccessReviewStatus {
        allowed: false,
        reason: Some(String::new()),
        ..Default::default()
      }),
      ..Default::default()
    };

    assert_eq!(access_review_result(review), AccessReview::default());
  }
}
