// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolver backed by local manifests and the Kubernetes API

use kube::api::{DynamicObject, ListParams};
use kube::core::TypeMeta;
use tracing::{debug, info, instrument};

use super::{file, Info, ItemResult, ResourceQuery, ResourceRequest, ResourceResolver, ResourceResult, Source};
use crate::error::{HelloError, ItemError, Result};
use crate::kubernetes::{ClusterConnection, ResourceCatalog, ResourceEntry};

/// Resolves files locally and type/name arguments against the cluster.
///
/// The cluster is only contacted when the query holds argument requests.
#[derive(Clone)]
pub struct KubeResolver {
    connection: ClusterConnection,
}

impl KubeResolver {
    pub fn new(connection: ClusterConnection) -> Self {
        Self { connection }
    }

    async fn resolve_files(&self, query: &ResourceQuery, results: &mut Results<'_>) {
        for source in &query.files {
            let items = match file::read(source).await {
                Ok(content) => file::decode(source, &content, query.flatten),
                Err(e) => vec![Err(e)],
            };
            debug!("Decoded {} item(s) from {}", items.len(), source);

            for item in items {
                let item = item.and_then(|info| check_namespace(query, info));
                if let Ok(info) = &item {
                    if !selected(query, info) {
                        continue;
                    }
                }
                if !results.push(item) {
                    return;
                }
            }
        }
    }

    async fn resolve_requests(&self, query: &ResourceQuery, results: &mut Results<'_>) -> Result<()> {
        let client = self.connection.client()?;
        let catalog = ResourceCatalog::discover(client).await.map_err(|e| {
            HelloError::Resolution(format!("unable to retrieve the server API resources: {}", e))
        })?;

        for request in &query.requests {
            let Some(entry) = catalog.find(request.resource()) else {
                if !results.push(Err(ItemError::UnknownResourceType(request.resource().to_string()))) {
                    return Ok(());
                }
                continue;
            };
            let api = entry.api(client, query.namespace.as_deref());

            let keep_going = match request {
                ResourceRequest::Named { name, .. } => {
                    let item = api
                        .get(name)
                        .await
                        .map(|object| to_info(entry, object))
                        .map_err(ItemError::from);
                    results.push(item)
                }
                ResourceRequest::Selected { .. } => {
                    let mut params = ListParams::default();
                    if let Some(selector) = &query.selector {
                        params = params.labels(selector.as_str());
                    }
                    match api.list(&params).await {
                        Ok(list) => {
                            debug!("Listed {} {}", list.items.len(), entry.resource.plural);
                            list.items
                                .into_iter()
                                .all(|object| results.push(Ok(to_info(entry, object))))
                        }
                        Err(e) => results.push(Err(e.into())),
                    }
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
        Ok(())
    }
}

impl ResourceResolver for KubeResolver {
    #[instrument(skip(self, query), fields(files = query.files.len(), requests = query.requests.len()))]
    async fn resolve(&self, query: &ResourceQuery) -> Result<ResourceResult> {
        let mut results = Results::new(query);

        self.resolve_files(query, &mut results).await;
        if !query.requests.is_empty() && !results.stopped {
            self.resolve_requests(query, &mut results).await?;
        }

        info!("Resolved {} item(s)", results.items.len());
        Ok(ResourceResult::new(results.items))
    }
}

/// Accumulates results, stopping at the first failure unless the query continues on error
struct Results<'a> {
    query: &'a ResourceQuery,
    items: Vec<ItemResult>,
    stopped: bool,
}

impl<'a> Results<'a> {
    fn new(query: &'a ResourceQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            stopped: false,
        }
    }

    /// Record an item; returns whether resolution should go on
    fn push(&mut self, item: ItemResult) -> bool {
        let failed = item.is_err();
        self.items.push(item);
        if failed && !self.query.continue_on_error {
            self.stopped = true;
        }
        !self.stopped
    }
}

fn check_namespace(query: &ResourceQuery, info: Info) -> ItemResult {
    if !query.enforce_namespace {
        return Ok(info);
    }
    match (&info.namespace, &query.namespace) {
        (Some(found), Some(expected)) if found != expected => Err(ItemError::NamespaceMismatch {
            found: found.clone(),
            expected: expected.clone(),
        }),
        _ => Ok(info),
    }
}

fn selected(query: &ResourceQuery, info: &Info) -> bool {
    query
        .selector
        .as_ref()
        .map_or(true, |selector| selector.matches(info.object.metadata.labels.as_ref()))
}

/// Objects in list responses carry no type information; fill it from the resource type
fn to_info(entry: &ResourceEntry, mut object: DynamicObject) -> Info {
    if object.types.is_none() {
        object.types = Some(TypeMeta {
            api_version: entry.resource.api_version.clone(),
            kind: entry.resource.kind.clone(),
        });
    }
    Info::new(Source::Cluster(entry.resource.clone()), object)
}
