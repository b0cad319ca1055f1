// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Positional resource arguments: `TYPE[,TYPE...] [NAME...]` or `TYPE/NAME...`

use crate::constants::categories;

/// One lookup to perform against the cluster
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceRequest {
    /// A single object fetched by name
    Named { resource: String, name: String },
    /// Every object of a type, narrowed by the label selector if one is set
    Selected { resource: String },
}

impl ResourceRequest {
    pub fn resource(&self) -> &str {
        match self {
            ResourceRequest::Named { resource, .. } | ResourceRequest::Selected { resource } => {
                resource
            }
        }
    }
}

const NAME_WITH_SELECTOR: &str = "name cannot be provided when a selector is specified";

/// Turn positional arguments into lookups.
///
/// Without names a type needs either `all` or a selector. Names require a
/// single type and cannot be combined with a selector.
pub fn parse(all: bool, has_selector: bool, args: &[String]) -> Result<Vec<ResourceRequest>, String> {
    let args: Vec<&str> = args
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    let Some((first, names)) = args.split_first() else {
        return Ok(Vec::new());
    };

    if args.iter().any(|a| a.contains('/')) {
        return parse_resource_names(has_selector, &args);
    }

    let types = split_types(first)?;
    if names.is_empty() {
        if !all && !has_selector {
            return Err("resource(s) were provided, but no name was specified".to_string());
        }
        return Ok(types
            .into_iter()
            .map(|resource| ResourceRequest::Selected { resource })
            .collect());
    }

    if has_selector {
        return Err(NAME_WITH_SELECTOR.to_string());
    }
    let [resource] = types.as_slice() else {
        return Err("you must specify only one resource".to_string());
    };
    Ok(names
        .iter()
        .map(|name| ResourceRequest::Named {
            resource: resource.clone(),
            name: name.to_string(),
        })
        .collect())
}

fn parse_resource_names(has_selector: bool, args: &[&str]) -> Result<Vec<ResourceRequest>, String> {
    if has_selector {
        return Err(NAME_WITH_SELECTOR.to_string());
    }
    args.iter()
        .map(|arg| {
            let Some((resource, name)) = arg.split_once('/') else {
                return Err(format!(
                    "there is no need to specify a resource type as a separate argument when passing arguments in resource/name form (e.g. 'kube-hello hello-kubernetes resource/<resource_name>' instead of 'kube-hello hello-kubernetes resource resource/<resource_name>'), found {:?}",
                    arg
                ));
            };
            if resource.is_empty() || name.is_empty() || name.contains('/') {
                return Err(format!(
                    "arguments in resource/name form must have a single resource and name, found {:?}",
                    arg
                ));
            }
            Ok(ResourceRequest::Named {
                resource: resource.to_lowercase(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Split a comma separated type list, expanding categories and dropping duplicates
fn split_types(arg: &str) -> Result<Vec<String>, String> {
    let mut types: Vec<String> = Vec::new();
    for part in arg.split(',') {
        let part = part.trim().to_lowercase();
        if part.is_empty() {
            return Err(format!("invalid resource type list {:?}", arg));
        }
        let expanded: Vec<String> = if part == categories::ALL {
            categories::ALL_MEMBERS.iter().map(|m| m.to_string()).collect()
        } else {
            vec![part]
        };
        for t in expanded {
            if !types.contains(&t) {
                types.push(t);
            }
        }
    }
    Ok(types)
}
