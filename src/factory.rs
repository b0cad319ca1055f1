// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Hands commands their namespace and resolver

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::kubernetes::ClusterConnection;
use crate::resource::{KubeResolver, ResourceResolver};

/// Source of the effective namespace and of resource resolvers
pub trait Factory {
    type Resolver: ResourceResolver;

    /// The namespace to work in, and whether it was given explicitly
    fn namespace(&self) -> Result<(String, bool)>;

    fn new_resolver(&self) -> Self::Resolver;
}

/// Factory backed by the loaded kubeconfig and a lazily failing cluster connection
pub struct KubeFactory {
    config: Config,
    connection: ClusterConnection,
}

impl KubeFactory {
    pub async fn new(config: Config) -> Self {
        let connection = ClusterConnection::establish(&config).await;
        debug!(
            "Factory ready for context {:?}",
            config.context_name().unwrap_or("<none>")
        );
        Self { config, connection }
    }
}

impl Factory for KubeFactory {
    type Resolver = KubeResolver;

    fn namespace(&self) -> Result<(String, bool)> {
        self.config.namespace()
    }

    fn new_resolver(&self) -> KubeResolver {
        KubeResolver::new(self.connection.clone())
    }
}
