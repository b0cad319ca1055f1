// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `hello-kubernetes`: greet every object named by files, arguments or a selector

use std::io::Write;

use tracing::{debug, warn};

use crate::cli::HelloKubernetesArgs;
use crate::error::{HelloError, ItemError, Result};
use crate::factory::Factory;
use crate::meta::{format_timestamp, ObjectAccessor};
use crate::printers::{PrintFlags, ResourcePrinter};
use crate::record::{RecordFlags, Recorder};
use crate::resource::{FilenameOptions, Info, QueryBuilder, ResourceResolver};

/// Fully completed options for one invocation
#[derive(Debug)]
pub struct HelloKubernetesOptions<R> {
    filename_options: FilenameOptions,
    selector: Option<String>,
    all: bool,
    recorder: Box<dyn Recorder>,
    printer: Option<ResourcePrinter>,
    namespace: String,
    enforce_namespace: bool,
    args: Vec<String>,
    resolver: R,
}

impl<R: ResourceResolver> HelloKubernetesOptions<R> {
    /// Turn parsed flags into options, pulling the namespace and resolver from the factory
    pub fn complete<F, I>(args: &HelloKubernetesArgs, command_line: I, factory: &F) -> Result<Self>
    where
        F: Factory<Resolver = R>,
        I: IntoIterator<Item = String>,
    {
        let mut record_flags = RecordFlags::new(args.record);
        record_flags.complete(command_line);
        let recorder = record_flags.to_recorder()?;

        let printer = PrintFlags::new(args.output.clone()).to_printer()?;

        let (namespace, enforce_namespace) = factory.namespace()?;
        debug!(
            "Completed options: namespace={}, enforce_namespace={}",
            namespace, enforce_namespace
        );

        Ok(Self {
            filename_options: FilenameOptions {
                filenames: args.filenames.clone(),
                recursive: args.recursive,
            },
            selector: args.selector.clone(),
            all: args.all,
            recorder,
            printer,
            namespace,
            enforce_namespace,
            args: args.args.clone(),
            resolver: factory.new_resolver(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        Ok(())
    }

    pub fn recorder(&self) -> &dyn Recorder {
        self.recorder.as_ref()
    }

    /// Resolve the objects and greet each one, or print them with the selected printer.
    ///
    /// Items that fail do not stop the others; their errors are returned
    /// together once everything else has been written.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<()> {
        let query = QueryBuilder::new()
            .continue_on_error()
            .namespace_param(&self.namespace)
            .default_namespace()
            .filename_param(self.enforce_namespace, &self.filename_options)
            .resource_type_or_name_args(self.all, &self.args)
            .flatten()
            .label_selector_param(self.selector.as_deref())
            .build()?;

        let result = self.resolver.resolve(&query).await?;

        let mut errors = Vec::new();
        let mut structured = Vec::new();
        let mut count = 0usize;
        for item in result {
            let info = match item {
                Ok(info) => info,
                Err(e) => {
                    warn!("Skipping object: {}", e);
                    errors.push(e);
                    continue;
                }
            };
            if self.printer.is_some() {
                structured.push(info);
                count += 1;
                continue;
            }
            match greeting(&info) {
                Ok(line) => {
                    writeln!(out, "{}", line)?;
                    count += 1;
                }
                Err(e) => errors.push(e),
            }
        }

        if let Some(printer) = &self.printer {
            if !structured.is_empty() {
                printer.print(&structured, out)?;
            }
        }

        debug!("Visited {} object(s), {} error(s)", count, errors.len());
        if !errors.is_empty() {
            return Err(HelloError::Visit(errors));
        }
        if count == 0 {
            return Err(HelloError::NoObjects);
        }
        Ok(())
    }
}

fn greeting(info: &Info) -> std::result::Result<String, ItemError> {
    let kind = info.kind()?;
    Ok(match info.creation_timestamp() {
        Some(created) => format!("Hello {} {} {}", kind, info.name(), format_timestamp(created)),
        None => format!("Hello {} {}", kind, info.name()),
    })
}
