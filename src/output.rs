use std::{fs::File, io::prelude::*};

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled, settings::Style};

use crate::version::{ClusterVersion, VersionCheck};

#[derive(Clone, Copy, Debug, Default, ValueEnum, Serialize, Deserialize)]
pub enum Format {
  /// JSON format used for logging or writing to a *.json file
  Json,
  /// Text format used for writing to stdout
  #[default]
  Text,
}

/// Results collected by the `check` command
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
  pub version: ClusterVersion,
  /// Expected version as `major.minor`, when one was requested
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expected_version: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version_check: Option<VersionCheck>,
  pub can_create_deployments: bool,
  /// Reason given by the authorizer for the deployment permission decision
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

#[derive(Tabled)]
#[tabled(rename_all = "UpperCase")]
struct ReportRow {
  check: &'static str,
  result: String,
}

impl Report {
  pub fn to_stdout_table(&self) -> Result<String> {
    let mut rows = vec![
      ReportRow {
        check: "Server version",
        result: self.version.to_string(),
      },
      ReportRow {
        check: "Platform",
        result: self.version.platform.to_owned(),
      },
    ];

    if let (Some(expected), Some(check)) = (&self.expected_version, &self.version_check) {
      rows.push(ReportRow {
        check: "Expected version",
        result: format!("{expected} ({check})"),
      });
    }

    let create = match &self.reason {
      Some(reason) => format!("{} ({reason})", self.can_create_deployments),
      None => self.can_create_deployments.to_string(),
    };
    rows.push(ReportRow {
      check: "Create deployments",
      result: create,
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    Ok(format!("{table}\n"))
  }
}

pub fn render(report: &Report, format: &Format) -> Result<String> {
  let output = match format {
    Format::Json => serde_json::to_string_pretty(report)?,
    Format::Text => report.to_stdout_table()?,
  };

  Ok(output)
}

pub fn output(report: &Report, format: &Format, filename: &Option<String>) -> Result<()> {
  let output = render(report, format)?;

  match filename {
    Some(filename) => {
      let mut file = File::create(filename)?;
      file.write_all(output.as_bytes())?;
    }
    None => {
      println!("{output}");
    }
  }

  Ok(())
}
