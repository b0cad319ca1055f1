// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation from the resolved kubeconfig

use crate::config::Config;
use crate::error::{HelloError, Result};
use kube::{config::KubeConfigOptions, Client, Config as KConfig};
use tracing::{debug, instrument};

/// A client, or the reason none could be built.
///
/// Building the client never talks to the cluster, so a broken or missing
/// configuration only becomes an error once a lookup actually needs it.
#[derive(Clone)]
pub enum ClusterConnection {
    Ready(Client),
    Unavailable(String),
}

impl ClusterConnection {
    /// Try to build a client from the configuration, keeping the failure for later
    pub async fn establish(config: &Config) -> Self {
        match create_client(config).await {
            Ok(client) => ClusterConnection::Ready(client),
            Err(e) => {
                debug!("No cluster client available: {}", e);
                ClusterConnection::Unavailable(e.to_string())
            }
        }
    }

    pub fn client(&self) -> Result<&Client> {
        match self {
            ClusterConnection::Ready(client) => Ok(client),
            ClusterConnection::Unavailable(reason) => Err(HelloError::Resolution(format!(
                "unable to connect to the cluster: {}",
                reason
            ))),
        }
    }
}

/// Create a Kubernetes client for the configured context
#[instrument(skip(config), fields(context = ?config.context_name()))]
pub async fn create_client(config: &Config) -> Result<Client> {
    let client_config = match &config.kubeconfig {
        Some(kubeconfig) => {
            let options = KubeConfigOptions {
                context: config.context.clone(),
                ..Default::default()
            };
            KConfig::from_custom_kubeconfig(kubeconfig.clone(), &options)
                .await
                .map_err(|e| {
                    HelloError::Configuration(format!("Failed to create config: {}", e))
                })?
        }
        None if config.in_cluster => KConfig::incluster().map_err(|e| {
            HelloError::Configuration(format!("Failed to load in-cluster config: {}", e))
        })?,
        None => {
            return Err(HelloError::Configuration(
                "no kubeconfig found and not running inside a cluster".to_string(),
            ))
        }
    };

    debug!("Using cluster {}", client_config.cluster_url);

    Client::try_from(client_config)
        .map_err(|e| HelloError::Configuration(format!("Failed to create client: {}", e)))
}
