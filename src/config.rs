// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use kube::config::Kubeconfig;
use tracing::debug;

use crate::constants::{incluster, DEFAULT_NAMESPACE};
use crate::error::{HelloError, Result};

/// Connection flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct ConfigFlags {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: Option<String>,
}

/// Kubeconfig and namespace settings resolved from flags and environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Merged kubeconfig, if any file was found
    pub kubeconfig: Option<Kubeconfig>,
    /// Context requested with `--context`
    pub context: Option<String>,
    /// Namespace requested with `--namespace`
    pub namespace: Option<String>,
    /// No kubeconfig was found but the process runs inside a pod
    pub in_cluster: bool,
}

impl Config {
    /// Load configuration from the flags and the process environment
    pub fn load(flags: &ConfigFlags) -> Result<Self> {
        Self::load_with(flags, |key| env::var_os(key))
    }

    /// Load configuration, reading environment variables through `lookup`
    pub fn load_with<F>(flags: &ConfigFlags, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let paths = kubeconfig_paths(flags, &lookup)?;
        let kubeconfig = read_kubeconfigs(&paths)?;
        let in_cluster = kubeconfig.is_none() && lookup(incluster::SERVICE_HOST_ENV).is_some();

        if let Some(context) = &flags.context {
            let known = kubeconfig
                .as_ref()
                .is_some_and(|k| k.contexts.iter().any(|c| &c.name == context));
            if !known {
                return Err(HelloError::Configuration(format!(
                    "context was not found for specified context: {}",
                    context
                )));
            }
        }

        debug!(
            "Configuration loaded: kubeconfig_files={}, context={:?}, in_cluster={}",
            paths.len(),
            flags.context,
            in_cluster
        );

        Ok(Config {
            kubeconfig,
            context: flags.context.clone(),
            namespace: flags.namespace.clone().filter(|n| !n.is_empty()),
            in_cluster,
        })
    }

    /// Name of the kubeconfig context in effect
    pub fn context_name(&self) -> Option<&str> {
        self.context.as_deref().or_else(|| {
            self.kubeconfig
                .as_ref()
                .and_then(|k| k.current_context.as_deref())
                .filter(|c| !c.is_empty())
        })
    }

    /// Resolve the target namespace and whether it was explicitly requested.
    ///
    /// An explicit `--namespace` wins and is enforced on input objects. Otherwise
    /// the namespace of the active context is used, then the in-cluster service
    /// account namespace, then `default`.
    pub fn namespace(&self) -> Result<(String, bool)> {
        if let Some(namespace) = &self.namespace {
            return Ok((namespace.clone(), true));
        }

        if let Some(kubeconfig) = &self.kubeconfig {
            let Some(context_name) = self.context_name() else {
                return Ok((DEFAULT_NAMESPACE.to_string(), false));
            };
            let Some(named) = kubeconfig.contexts.iter().find(|c| c.name == context_name) else {
                return Err(HelloError::Configuration(format!(
                    "invalid configuration: context was not found for specified context: {}",
                    context_name
                )));
            };
            let namespace = named
                .context
                .as_ref()
                .and_then(|c| c.namespace.clone())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
            return Ok((namespace, false));
        }

        if self.in_cluster {
            if let Ok(namespace) = fs::read_to_string(incluster::NAMESPACE_PATH) {
                let namespace = namespace.trim();
                if !namespace.is_empty() {
                    return Ok((namespace.to_string(), false));
                }
            }
        }

        Ok((DEFAULT_NAMESPACE.to_string(), false))
    }
}

fn kubeconfig_paths<F>(flags: &ConfigFlags, lookup: &F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(path) = &flags.kubeconfig {
        if !path.is_file() {
            return Err(HelloError::kubeconfig(path, "file does not exist"));
        }
        return Ok(vec![path.clone()]);
    }

    // Missing entries in KUBECONFIG are skipped, the same way kubectl merges them
    if let Some(list) = lookup("KUBECONFIG").filter(|l| !l.is_empty()) {
        return Ok(env::split_paths(&list)
            .filter(|p| !p.as_os_str().is_empty() && p.is_file())
            .collect());
    }

    Ok(lookup("HOME")
        .map(|home| Path::new(&home).join(".kube").join("config"))
        .filter(|p| p.is_file())
        .into_iter()
        .collect())
}

fn read_kubeconfigs(paths: &[PathBuf]) -> Result<Option<Kubeconfig>> {
    let mut merged: Option<Kubeconfig> = None;
    for path in paths {
        let next = Kubeconfig::read_from(path).map_err(|e| HelloError::kubeconfig(path, e))?;
        merged = Some(match merged {
            Some(current) => current
                .merge(next)
                .map_err(|e| HelloError::kubeconfig(path, e))?,
            None => next,
        });
    }
    Ok(merged)
}
