use std::process;

use anyhow::Result;
use clap::Parser;
use kubecheck::Cli;
use tracing_log::AsTrace;

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = kubecheck::run(&cli).await {
    eprintln!("{err:#}");
    process::exit(1);
  }

  Ok(())
}
