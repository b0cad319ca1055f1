// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigFlags;

/// Command-line arguments for kube-hello.
#[derive(Debug, Parser)]
#[command(
    name = "kube-hello",
    version,
    about = "Greets the world and the objects in your Kubernetes cluster.",
    long_about = None
)]
pub struct Cli {
    /// Path to the kubeconfig file to use.
    #[arg(long, global = true, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// The kubeconfig context to use.
    #[arg(long, global = true, value_name = "NAME")]
    pub context: Option<String>,

    /// The namespace scope for this request.
    #[arg(short, long, global = true, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Say hello to the world.
    HelloWorld(HelloWorldArgs),

    /// Say hello to Kubernetes objects, by file or by type and name.
    #[command(
        override_usage = "kube-hello hello-kubernetes (-f FILENAME | TYPE [NAME | -l label] | TYPE/NAME ...) [flags]",
        after_help = "Examples:\n  \
            # Greet a pod defined in a file\n  \
            kube-hello hello-kubernetes -f pod.yaml\n\n  \
            # Greet a pod by type and name\n  \
            kube-hello hello-kubernetes pods nginx\n\n  \
            # Greet every deployment labelled app=web\n  \
            kube-hello hello-kubernetes deployments -l app=web"
    )]
    HelloKubernetes(HelloKubernetesArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct HelloWorldArgs {
    /// Ignored.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct HelloKubernetesArgs {
    /// Filename, directory, or '-' for stdin, containing the objects to greet.
    #[arg(short = 'f', long = "filename", value_name = "FILENAME")]
    pub filenames: Vec<String>,

    /// Process the directories given with -f recursively.
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Label selector to filter on, e.g. -l key1=value1,key2=value2.
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    /// Select all resources of the given types.
    #[arg(long)]
    pub all: bool,

    /// Output format. One of: json|yaml|name.
    #[arg(short = 'o', long, value_name = "FORMAT")]
    pub output: Option<String>,

    /// Record the command in the change-cause annotation of the objects.
    #[arg(long)]
    pub record: bool,

    /// Resource types and names: TYPE NAME..., TYPE/NAME... or TYPE with --all or -l.
    #[arg(value_name = "TYPE_OR_NAME")]
    pub args: Vec<String>,
}
