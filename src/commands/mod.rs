// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod hello_kubernetes;
pub mod hello_world;

use std::io::Write;

use tracing::debug;

pub use hello_kubernetes::HelloKubernetesOptions;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use crate::factory::KubeFactory;

/// Dispatches execution to the appropriate command handler.
pub async fn execute<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Command::HelloWorld(args) => hello_world::run(args, out),
        Command::HelloKubernetes(args) => {
            let config = Config::load(&cli.config_flags())?;
            let factory = KubeFactory::new(config).await;

            let options = HelloKubernetesOptions::complete(args, std::env::args(), &factory)?;
            options.validate()?;
            debug!("Running hello-kubernetes");
            options.run(out).await
        }
    }
}
