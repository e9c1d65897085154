use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, VersionField};

/// Server version as reported by the discovery `/version` endpoint
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterVersion {
  pub major: String,
  pub minor: String,
  /// The server's `gitVersion`, e.g. `v1.30.2-eks-1552ad0`
  pub raw: String,
  pub platform: String,
}

impl std::fmt::Display for ClusterVersion {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.raw)
  }
}

/// Outcome of comparing a server version against an expected major/minor pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionCheck {
  Match,
  MajorMismatch,
  MinorMismatch,
}

impl VersionCheck {
  /// Converts a mismatch into the matching [`Error::VersionMismatch`]
  pub fn into_result(self) -> Result<bool> {
    match self {
      VersionCheck::Match => Ok(true),
      VersionCheck::MajorMismatch => Err(Error::VersionMismatch {
        field: VersionField::Major,
      }),
      VersionCheck::MinorMismatch => Err(Error::VersionMismatch {
        field: VersionField::Minor,
      }),
    }
  }
}

impl std::fmt::Display for VersionCheck {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      VersionCheck::Match => write!(f, "match"),
      VersionCheck::MajorMismatch => write!(f, "major mismatch"),
      VersionCheck::MinorMismatch => write!(f, "minor mismatch"),
    }
  }
}

/// Compare the server version against the expected values
///
/// Major is checked before minor and the first mismatch wins. Both are exact
/// string comparisons, so `"30+"` (as reported by some managed offerings) does
/// not equal `"30"`
pub fn check(version: &ClusterVersion, major: &str, minor: &str) -> VersionCheck {
  if version.major != major {
    return VersionCheck::MajorMismatch;
  }
  if version.minor != minor {
    return VersionCheck::MinorMismatch;
  }

  VersionCheck::Match
}

/// Format an expected major/minor pair as `major.minor`
pub(crate) fn format_version(major: &str, minor: &str) -> String {
  format!("{major}.{minor}")
}
