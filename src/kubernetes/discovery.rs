// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource type discovery and lookup

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kube::{
    api::{Api, ApiResource, DynamicObject, GroupVersionKind},
    Client,
};
use tracing::{debug, instrument, warn};

/// A listable resource type served by the cluster
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceEntry {
    pub resource: ApiResource,
    pub namespaced: bool,
    pub singular: String,
    pub short_names: Vec<String>,
}

impl ResourceEntry {
    /// Dynamic API for this type, scoped to `namespace` when the type is namespaced.
    /// A namespaced type without a namespace is queried across all namespaces.
    pub fn api(&self, client: &Client, namespace: Option<&str>) -> Api<DynamicObject> {
        match namespace {
            Some(ns) if self.namespaced => Api::namespaced_with(client.clone(), ns, &self.resource),
            _ => Api::all_with(client.clone(), &self.resource),
        }
    }
}

/// All resource types found through discovery, core group first
#[derive(Clone, Debug, Default)]
pub struct ResourceCatalog {
    entries: Vec<ResourceEntry>,
}

impl ResourceCatalog {
    pub fn new(entries: Vec<ResourceEntry>) -> Self {
        Self { entries }
    }

    /// Walk the core API and the preferred version of every API group.
    ///
    /// A group whose resource list cannot be fetched (e.g. an unavailable
    /// aggregated API server) is skipped rather than failing the whole walk.
    #[instrument(skip(client))]
    pub async fn discover(client: &Client) -> kube::Result<Self> {
        let mut entries = Vec::new();

        let core = client.list_core_api_versions().await?;
        for version in &core.versions {
            let list = client.list_core_api_resources(version).await?;
            entries.extend(entries_for(&list));
        }

        let groups = client.list_api_groups().await?;
        for group in groups.groups {
            let Some(version) = group
                .preferred_version
                .as_ref()
                .or_else(|| group.versions.first())
            else {
                warn!("API group {} advertises no versions", group.name);
                continue;
            };
            match client.list_api_group_resources(&version.group_version).await {
                Ok(list) => entries.extend(entries_for(&list)),
                Err(e) => warn!(
                    "Skipping API group {}: {}",
                    version.group_version, e
                ),
            }
        }

        debug!("Discovered {} resource types", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the resource type named by a CLI argument.
    ///
    /// `name` may be a plural, singular, short name or kind, matched
    /// case-insensitively, optionally followed by `.group`. Plural names win
    /// over singular names, which win over short names, which win over kinds.
    pub fn find(&self, name: &str) -> Option<&ResourceEntry> {
        let name = name.to_lowercase();
        let (resource, group) = match name.split_once('.') {
            Some((resource, group)) => (resource, Some(group)),
            None => (name.as_str(), None),
        };
        let in_group = |entry: &&ResourceEntry| group.map_or(true, |g| entry.resource.group == g);

        let by_plural = |e: &&ResourceEntry| e.resource.plural == resource;
        let by_singular = |e: &&ResourceEntry| e.singular == resource;
        let by_short = |e: &&ResourceEntry| e.short_names.iter().any(|s| s == resource);
        let by_kind = |e: &&ResourceEntry| e.resource.kind.to_lowercase() == resource;

        self.entries
            .iter()
            .filter(in_group)
            .find(by_plural)
            .or_else(|| self.entries.iter().filter(in_group).find(by_singular))
            .or_else(|| self.entries.iter().filter(in_group).find(by_short))
            .or_else(|| self.entries.iter().filter(in_group).find(by_kind))
    }
}

fn entries_for(list: &APIResourceList) -> Vec<ResourceEntry> {
    let (group, version) = match list.group_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", list.group_version.as_str()),
    };

    list.resources
        .iter()
        // Subresources such as pods/log are not addressable on their own
        .filter(|r| !r.name.contains('/'))
        .map(|r| {
            let gvk = GroupVersionKind::gvk(group, version, &r.kind);
            let singular = if r.singular_name.is_empty() {
                r.kind.to_lowercase()
            } else {
                r.singular_name.to_lowercase()
            };
            ResourceEntry {
                resource: ApiResource::from_gvk_with_plural(&gvk, &r.name),
                namespaced: r.namespaced,
                singular,
                short_names: r.short_names.clone().unwrap_or_default(),
            }
        })
        .collect()
}
