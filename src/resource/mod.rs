// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of CLI-style resource references into objects.
//!
//! A [`QueryBuilder`] collects files, positional arguments and a selector into
//! a validated [`ResourceQuery`]; a [`ResourceResolver`] turns the query into a
//! [`ResourceResult`], an ordered list in which per-item failures sit next to
//! the objects that resolved.

pub mod args;
pub mod file;
pub mod resolver;
pub mod selector;

use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use kube::api::{ApiResource, DynamicObject};

pub use args::ResourceRequest;
pub use file::FilenameOptions;
pub use resolver::KubeResolver;
pub use selector::Selector;

use crate::constants::{DEFAULT_NAMESPACE, INPUT_EXTENSIONS};
use crate::error::{HelloError, ItemError, Result};

/// Where an [`Info`] came from
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Cluster(ApiResource),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Stdin => f.write_str("STDIN"),
            Source::Cluster(resource) if resource.group.is_empty() => {
                f.write_str(&resource.plural)
            }
            Source::Cluster(resource) => write!(f, "{}.{}", resource.plural, resource.group),
        }
    }
}

/// A resolved object and its identity
#[derive(Clone, Debug)]
pub struct Info {
    pub source: Source,
    pub namespace: Option<String>,
    pub name: String,
    pub object: DynamicObject,
}

impl Info {
    pub fn new(source: Source, object: DynamicObject) -> Self {
        Self {
            source,
            namespace: object.metadata.namespace.clone(),
            name: object.metadata.name.clone().unwrap_or_default(),
            object,
        }
    }
}

pub type ItemResult = std::result::Result<Info, ItemError>;

/// Ordered outcome of a query
#[derive(Debug, Default)]
pub struct ResourceResult {
    items: Vec<ItemResult>,
}

impl ResourceResult {
    pub fn new(items: Vec<ItemResult>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResourceResult {
    type Item = ItemResult;
    type IntoIter = std::vec::IntoIter<ItemResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ItemResult> for ResourceResult {
    fn from_iter<I: IntoIterator<Item = ItemResult>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Capability that resolves a query into objects
pub trait ResourceResolver {
    fn resolve(&self, query: &ResourceQuery) -> impl Future<Output = Result<ResourceResult>> + Send;
}

/// A validated query, ready to resolve
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceQuery {
    /// Namespace for namespaced lookups; `None` means all namespaces
    pub namespace: Option<String>,
    /// Reject file objects whose namespace differs from `namespace`
    pub enforce_namespace: bool,
    pub files: Vec<Source>,
    pub requests: Vec<ResourceRequest>,
    pub selector: Option<Selector>,
    /// Expand `*List` objects into their items
    pub flatten: bool,
    /// Keep resolving after a per-item failure
    pub continue_on_error: bool,
}

/// Collects query parameters; nothing is validated until [`QueryBuilder::build`]
#[derive(Clone, Debug, Default)]
pub struct QueryBuilder {
    namespace: Option<String>,
    default_namespace: bool,
    enforce_namespace: bool,
    filenames: FilenameOptions,
    all: bool,
    args: Vec<String>,
    selector: Option<String>,
    flatten: bool,
    continue_on_error: bool,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    pub fn namespace_param(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Fall back to the `default` namespace when no namespace was given
    pub fn default_namespace(mut self) -> Self {
        self.default_namespace = true;
        self
    }

    pub fn filename_param(mut self, enforce_namespace: bool, options: &FilenameOptions) -> Self {
        self.enforce_namespace = enforce_namespace;
        self.filenames = options.clone();
        self
    }

    pub fn resource_type_or_name_args(mut self, all: bool, args: &[String]) -> Self {
        self.all = all;
        self.args = args.to_vec();
        self
    }

    pub fn flatten(mut self) -> Self {
        self.flatten = true;
        self
    }

    pub fn label_selector_param(mut self, selector: Option<&str>) -> Self {
        self.selector = selector
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    /// Validate the parameters and expand the filenames.
    pub fn build(self) -> Result<ResourceQuery> {
        let selector = self
            .selector
            .as_deref()
            .map(str::parse::<Selector>)
            .transpose()
            .map_err(HelloError::Resolution)?;

        let requests = args::parse(self.all, selector.is_some(), &self.args)
            .map_err(HelloError::Resolution)?;

        if !self.filenames.is_empty() && !requests.is_empty() {
            return Err(HelloError::Resolution(
                "when paths, URLs, or stdin is provided as input, you may not specify resource arguments as well"
                    .to_string(),
            ));
        }
        if self.filenames.is_empty() && requests.is_empty() {
            return Err(HelloError::Resolution(format!(
                "you must provide one or more resources by argument or filename (.{})",
                INPUT_EXTENSIONS.join("|.")
            )));
        }

        let files = self.filenames.expand()?;

        let namespace = match self.namespace {
            Some(namespace) => Some(namespace),
            None if self.default_namespace => Some(DEFAULT_NAMESPACE.to_string()),
            None => None,
        };

        Ok(ResourceQuery {
            namespace,
            enforce_namespace: self.enforce_namespace,
            files,
            requests,
            selector,
            flatten: self.flatten,
            continue_on_error: self.continue_on_error,
        })
    }
}
