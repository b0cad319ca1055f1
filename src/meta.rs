// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read-only access to the identity of resolved objects

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

use crate::error::ItemError;
use crate::resource::{Info, Source};

/// Kind, name and creation time of an object, whatever its origin
pub trait ObjectAccessor {
    fn kind(&self) -> Result<&str, ItemError>;
    fn name(&self) -> &str;
    /// `None` for objects that only exist as a local definition
    fn creation_timestamp(&self) -> Option<&Time>;
}

impl ObjectAccessor for Info {
    fn kind(&self) -> Result<&str, ItemError> {
        let from_object = self
            .object
            .types
            .as_ref()
            .map(|t| t.kind.as_str())
            .filter(|k| !k.is_empty());
        let from_source = match &self.source {
            Source::Cluster(resource) => Some(resource.kind.as_str()),
            _ => None,
        };
        from_object
            .or(from_source)
            .ok_or_else(|| ItemError::MissingKind(self.source.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn creation_timestamp(&self) -> Option<&Time> {
        self.object.metadata.creation_timestamp.as_ref()
    }
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS +0000 UTC`.
///
/// Always UTC, unlike kubectl, which prints `metav1.Time` in the local zone.
/// Output therefore does not depend on the machine's `TZ`.
pub fn format_timestamp(time: &Time) -> String {
    time.0.format("%Y-%m-%d %H:%M:%S %z %Z").to_string()
}
