// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Structured output selected with `-o`

use std::io::Write;

use serde_json::{json, Value};

use crate::error::{HelloError, ItemError, Result};
use crate::meta::ObjectAccessor;
use crate::resource::Info;

const ALLOWED_FORMATS: &[&str] = &["json", "name", "yaml"];

#[derive(Clone, Debug, Default)]
pub struct PrintFlags {
    pub output_format: Option<String>,
}

impl PrintFlags {
    pub fn new(output_format: Option<String>) -> Self {
        Self { output_format }
    }

    /// `None` keeps the command's own human-readable output
    pub fn to_printer(&self) -> Result<Option<ResourcePrinter>> {
        let format = self
            .output_format
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_lowercase();
        match format.as_str() {
            "" => Ok(None),
            "json" => Ok(Some(ResourcePrinter::Json)),
            "yaml" => Ok(Some(ResourcePrinter::Yaml)),
            "name" => Ok(Some(ResourcePrinter::Name)),
            other => Err(HelloError::Configuration(format!(
                "unable to match a printer suitable for the output format {:?}, allowed formats are: {}",
                other,
                ALLOWED_FORMATS.join(",")
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourcePrinter {
    Json,
    Yaml,
    Name,
}

impl ResourcePrinter {
    /// Print the objects; several objects are wrapped in a `List` for json and yaml
    pub fn print<W: Write>(&self, infos: &[Info], out: &mut W) -> Result<()> {
        match self {
            ResourcePrinter::Name => {
                for info in infos {
                    let line = qualified_name(info).map_err(|e| HelloError::Visit(vec![e]))?;
                    writeln!(out, "{}", line)?;
                }
            }
            ResourcePrinter::Json => {
                let text = serde_json::to_string_pretty(&document(infos)?).map_err(print_error)?;
                writeln!(out, "{}", text)?;
            }
            ResourcePrinter::Yaml => {
                let text = serde_yaml::to_string(&document(infos)?).map_err(print_error)?;
                write!(out, "{}", text)?;
            }
        }
        Ok(())
    }
}

fn document(infos: &[Info]) -> Result<Value> {
    let mut objects = infos
        .iter()
        .map(|info| serde_json::to_value(&info.object))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(print_error)?;

    if objects.len() == 1 {
        return Ok(objects.remove(0));
    }
    Ok(json!({
        "apiVersion": "v1",
        "kind": "List",
        "items": objects,
        "metadata": {"resourceVersion": ""}
    }))
}

/// `kind[.group]/name`, the form accepted back as a resource argument
fn qualified_name(info: &Info) -> std::result::Result<String, ItemError> {
    let kind = info.kind()?.to_lowercase();
    let group = info
        .object
        .types
        .as_ref()
        .and_then(|t| t.api_version.split_once('/'))
        .map(|(group, _)| group);
    Ok(match group {
        Some(group) => format!("{}.{}/{}", kind, group, info.name()),
        None => format!("{}/{}", kind, info.name()),
    })
}

fn print_error(e: impl std::fmt::Display) -> HelloError {
    HelloError::Visit(vec![ItemError::Print(e.to_string())])
}
