// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::Path;

use thiserror::Error;

/// Errors that end a command invocation.
#[derive(Error, Debug)]
pub enum HelloError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Resolution(String),

    #[error("{}", aggregate(.0))]
    Visit(Vec<ItemError>),

    #[error("no objects passed to kubernetes-hello")]
    NoObjects,

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Failure attached to a single resolved item. Other items keep flowing.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("error reading {source_name}: {message}")]
    Read { source_name: String, message: String },

    #[error("error parsing {source_name}: {message}")]
    Decode { source_name: String, message: String },

    #[error("Object 'Kind' is missing in '{0}'")]
    MissingKind(String),

    #[error("the namespace from the provided object {found:?} does not match the namespace {expected:?}. You must pass '--namespace={found}' to perform this operation.")]
    NamespaceMismatch { found: String, expected: String },

    #[error("the server doesn't have a resource type {0:?}")]
    UnknownResourceType(String),

    #[error("failed to print object: {0}")]
    Print(String),
}

fn aggregate(errors: &[ItemError]) -> String {
    match errors {
        [] => String::new(),
        [single] => single.to_string(),
        many => {
            let joined: Vec<String> = many.iter().map(ToString::to_string).collect();
            format!("[{}]", joined.join(", "))
        }
    }
}

impl HelloError {
    pub fn kubeconfig(path: &Path, message: impl std::fmt::Display) -> Self {
        HelloError::Configuration(format!(
            "failed to load kubeconfig {}: {}",
            path.display(),
            message
        ))
    }
}

pub type Result<T> = std::result::Result<T, HelloError>;
