pub mod clients;
pub mod cluster;
pub mod config;
pub mod error;
pub mod k8s;
pub mod output;
pub mod version;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use serde::{Deserialize, Serialize};

pub use error::Error;

use crate::{
  clients::{ClusterClients, RealClusterClients},
  cluster::Cluster,
  config::Config,
  output::Report,
};

#[derive(Parser, Debug)]
#[command(author, about, version)]
#[command(propagate_version = true)]
pub struct Cli {
  #[command(subcommand)]
  pub commands: Commands,

  /// Path to the kubeconfig file [default: $HOME/.kube/config]
  #[arg(long, global = true)]
  pub kubeconfig: Option<PathBuf>,

  /// The kubeconfig context to use instead of the current context
  #[arg(long, global = true)]
  pub context: Option<String>,

  /// Path to a kubecheck config file [default: ./.kubecheck.yaml]
  #[arg(long, global = true)]
  pub config: Option<PathBuf>,

  #[clap(flatten)]
  pub verbose: Verbosity,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Print the cluster's server version
  Version,
  /// Check the cluster's server version against an expected major/minor version
  IsVersion(IsVersion),
  /// Check whether the current identity can create Deployments
  CanCreateDeployments,
  /// Run all checks and report the results
  Check(Check),
}

/// Expected server version; values not given fall back to the config file
#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct IsVersion {
  /// Expected major version, e.g. 1
  #[arg(long)]
  pub major: Option<String>,

  /// Expected minor version, e.g. 30
  #[arg(long)]
  pub minor: Option<String>,
}

#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Check {
  #[clap(flatten)]
  pub expect: IsVersion,

  #[arg(short, long, value_enum, default_value_t)]
  pub format: output::Format,

  /// Write to file instead of stdout
  #[arg(short, long)]
  pub output: Option<String>,
}

/// Connect to the cluster and run the selected command
pub async fn run(cli: &Cli) -> Result<()> {
  let config = config::load(cli.config.as_deref())?;

  let (kubeconfig, context) = connection_target(cli, &config);
  let clients = RealClusterClients::connect(kubeconfig, context).await?;
  let cluster = Cluster::new(clients);

  match &cli.commands {
    Commands::Version => println!("{}", version(&cluster).await?),
    Commands::IsVersion(args) => println!("{}", is_version(&cluster, args, &config).await?),
    Commands::CanCreateDeployments => println!("{}", can_create_deployments(&cluster).await?),
    Commands::Check(args) => {
      let report = check(&cluster, args, &config).await?;
      output::output(&report, &args.format, &args.output)?;
    }
  }

  Ok(())
}

/// Returns the server version string
pub async fn version<C: ClusterClients>(cluster: &Cluster<C>) -> Result<String> {
  Ok(cluster.get_version().await?)
}

/// Returns `"true"` when the server matches the expected version
///
/// A mismatch surfaces as [`Error::VersionMismatch`]
pub async fn is_version<C: ClusterClients>(cluster: &Cluster<C>, args: &IsVersion, config: &Config) -> Result<String> {
  let (major, minor) = expected_version(args, config)?
    .context("No expected version given. Pass --major and --minor or set `expect` in the config file")?;
  let matches = cluster.is_version(&major, &minor).await?;

  Ok(matches.to_string())
}

/// Returns `"true"` or `"false"` for the deployment permission check
pub async fn can_create_deployments<C: ClusterClients>(cluster: &Cluster<C>) -> Result<String> {
  let allowed = cluster.can_create_deployments().await?;

  Ok(allowed.to_string())
}

/// Runs the version query, the optional version comparison and the permission check in order
pub async fn check<C: ClusterClients>(cluster: &Cluster<C>, args: &Check, config: &Config) -> Result<Report> {
  let server_version = cluster.server_version().await?;

  let (expected_version, version_check) = match expected_version(&args.expect, config)? {
    Some((major, minor)) => (
      Some(version::format_version(&major, &minor)),
      Some(version::check(&server_version, &major, &minor)),
    ),
    None => (None, None),
  };

  let review = cluster
    .can_i(&k8s::PermissionQuery::create_deployments())
    .await?;

  Ok(Report {
    version: server_version,
    expected_version,
    version_check,
    can_create_deployments: review.allowed,
    reason: review.reason,
  })
}

/// Resolve the kubeconfig path and context, CLI flags before the config file
fn connection_target<'a>(cli: &'a Cli, config: &'a Config) -> (Option<&'a Path>, Option<&'a str>) {
  let kubeconfig = cli.kubeconfig.as_deref().or(config.kubeconfig.as_deref());
  let context = cli.context.as_deref().or(config.context.as_deref());

  (kubeconfig, context)
}

/// Resolve the expected major/minor from CLI arguments, then the config file
///
/// Returns `None` when neither is set; setting only one of the two is an error
fn expected_version(args: &IsVersion, config: &Config) -> Result<Option<(String, String)>> {
  let major = args.major.as_ref().or(config.expect.major.as_ref());
  let minor = args.minor.as_ref().or(config.expect.minor.as_ref());

  match (major, minor) {
    (Some(major), Some(minor)) => Ok(Some((major.to_owned(), minor.to_owned()))),
    (None, None) => Ok(None),
    (Some(_), None) => anyhow::bail!("Expected minor version not set. Pass --minor or set `expect.minor`"),
    (None, Some(_)) => anyhow::bail!("Expected major version not set. Pass --major or set `expect.major`"),
  }
}
