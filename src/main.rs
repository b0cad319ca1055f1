// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kube_hello::cli::Cli;
use kube_hello::commands;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout only carries command output
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(&cli, &mut out).await?;
    Ok(())
}
