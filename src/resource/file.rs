// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Manifest inputs given with `-f`: path expansion and decoding

use std::fs;
use std::path::{Path, PathBuf};

use kube::api::DynamicObject;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};
use url::Url;

use super::{Info, ItemResult, Source};
use crate::constants::INPUT_EXTENSIONS;
use crate::error::{HelloError, ItemError, Result};

/// Filename flags shared by commands that read manifests
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilenameOptions {
    pub filenames: Vec<String>,
    pub recursive: bool,
}

impl FilenameOptions {
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    /// Expand the filenames into the files to read, in the order given.
    ///
    /// Directories contribute their manifest files in lexical order and are
    /// only descended into with `recursive`. A path that does not exist fails
    /// the whole expansion.
    pub fn expand(&self) -> Result<Vec<Source>> {
        let mut sources = Vec::new();
        for name in &self.filenames {
            if name == "-" {
                sources.push(Source::Stdin);
                continue;
            }
            if let Ok(url) = Url::parse(name) {
                if matches!(url.scheme(), "http" | "https") {
                    return Err(HelloError::Resolution(format!(
                        "reading manifests from a URL is not supported: {}",
                        name
                    )));
                }
            }

            let path = PathBuf::from(name);
            if path.is_dir() {
                expand_dir(&path, self.recursive, &mut sources).map_err(|e| {
                    HelloError::Resolution(format!("error reading {:?}: {}", name, e))
                })?;
            } else if path.exists() {
                sources.push(Source::File(path));
            } else {
                return Err(HelloError::Resolution(format!(
                    "the path {:?} does not exist",
                    name
                )));
            }
        }
        Ok(sources)
    }
}

fn expand_dir(dir: &Path, recursive: bool, sources: &mut Vec<Source>) -> std::io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                expand_dir(&path, recursive, sources)?;
            }
        } else if has_manifest_extension(&path) {
            sources.push(Source::File(path));
        } else {
            debug!("Ignoring {} in {}", path.display(), dir.display());
        }
    }
    Ok(())
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.contains(&e))
}

/// Read a file source, or standard input for [`Source::Stdin`]
pub async fn read(source: &Source) -> std::result::Result<String, ItemError> {
    let result = match source {
        Source::File(path) => tokio::fs::read_to_string(path).await,
        Source::Stdin => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .map(|_| content)
        }
        Source::Cluster(_) => Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a file source",
        )),
    };
    result.map_err(|e| ItemError::Read {
        source_name: source.to_string(),
        message: e.to_string(),
    })
}

/// Decode every document of a manifest into objects.
///
/// Documents are YAML (JSON being a subset). Empty documents are skipped, and
/// with `flatten` a `*List` object is replaced by its items. A YAML syntax
/// error ends decoding of the rest of the file.
pub fn decode(source: &Source, content: &str, flatten: bool) -> Vec<ItemResult> {
    let mut items = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = match serde_yaml::Value::deserialize(document) {
            Ok(value) => value,
            Err(e) => {
                items.push(Err(decode_error(source, e)));
                break;
            }
        };
        if value.is_null() {
            continue;
        }
        let json: Value = match serde_json::to_value(&value) {
            Ok(json) => json,
            Err(e) => {
                items.push(Err(decode_error(source, e)));
                continue;
            }
        };

        let mut documents = Vec::new();
        flatten_into(json, flatten, &mut documents);
        items.extend(documents.into_iter().map(|doc| to_info(source, doc)));
    }

    if items.is_empty() {
        warn!("{} contains no objects", source);
    }
    items
}

fn flatten_into(value: Value, flatten: bool, out: &mut Vec<Value>) {
    let list_kind = value
        .get("kind")
        .and_then(Value::as_str)
        .filter(|k| k.ends_with("List"))
        .map(str::to_string);

    let (Some(list_kind), true) = (list_kind, flatten) else {
        out.push(value);
        return;
    };
    let Some(Value::Array(items)) = value.get("items").cloned() else {
        out.push(value);
        return;
    };
    let api_version = value.get("apiVersion").cloned();

    for mut item in items {
        // Items of a typed list (e.g. PodList) may omit their own type
        if let Some(obj) = item.as_object_mut() {
            if !obj.contains_key("kind") && list_kind != "List" {
                let kind = list_kind.trim_end_matches("List").to_string();
                obj.insert("kind".to_string(), Value::String(kind));
                if let Some(api_version) = &api_version {
                    obj.entry("apiVersion").or_insert_with(|| api_version.clone());
                }
            }
        }
        flatten_into(item, flatten, out);
    }
}

fn to_info(source: &Source, mut value: Value) -> ItemResult {
    let has_field = |value: &Value, field: &str| {
        value
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|v| !v.is_empty())
    };
    if !has_field(&value, "kind") {
        return Err(ItemError::MissingKind(source.to_string()));
    }
    if !has_field(&value, "apiVersion") {
        return Err(decode_error(source, "Object 'apiVersion' is missing"));
    }
    // List wrappers commonly carry no metadata at all
    if let Some(obj) = value.as_object_mut() {
        obj.entry("metadata")
            .or_insert_with(|| Value::Object(Default::default()));
    }

    let object: DynamicObject =
        serde_json::from_value(value).map_err(|e| decode_error(source, e))?;
    Ok(Info::new(source.clone(), object))
}

fn decode_error(source: &Source, e: impl std::fmt::Display) -> ItemError {
    ItemError::Decode {
        source_name: source.to_string(),
        message: e.to_string(),
    }
}
