// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `--record`: change-cause annotations for commands that mutate objects

use std::fmt;

use kube::api::DynamicObject;

use crate::constants::annotations;
use crate::error::{HelloError, Result};

/// Annotates an object with the reason it is being changed
pub trait Recorder: fmt::Debug + Send + Sync {
    fn record(&self, object: &mut DynamicObject) -> Result<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopRecorder;

impl Recorder for NoopRecorder {
    fn record(&self, _object: &mut DynamicObject) -> Result<()> {
        Ok(())
    }
}

/// Writes the command line into the change-cause annotation
#[derive(Clone, Debug)]
pub struct ChangeCauseRecorder {
    change_cause: String,
}

impl Recorder for ChangeCauseRecorder {
    fn record(&self, object: &mut DynamicObject) -> Result<()> {
        object
            .metadata
            .annotations
            .get_or_insert_with(Default::default)
            .insert(annotations::CHANGE_CAUSE.to_string(), self.change_cause.clone());
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct RecordFlags {
    pub record: bool,
    change_cause: String,
}

impl RecordFlags {
    pub fn new(record: bool) -> Self {
        Self {
            record,
            change_cause: String::new(),
        }
    }

    /// Derive the change cause from the command line, program name reduced to its file name
    pub fn complete<I, S>(&mut self, command_line: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parts: Vec<String> = command_line.into_iter().map(Into::into).collect();
        if let Some(program) = parts.first_mut() {
            if let Some(base) = std::path::Path::new(program.as_str())
                .file_name()
                .and_then(|n| n.to_str())
            {
                *program = base.to_string();
            }
        }
        self.change_cause = parts.join(" ");
    }

    pub fn to_recorder(&self) -> Result<Box<dyn Recorder>> {
        if !self.record {
            return Ok(Box::new(NoopRecorder));
        }
        if self.change_cause.trim().is_empty() {
            return Err(HelloError::Configuration(
                "--record requires a command line to record".to_string(),
            ));
        }
        Ok(Box::new(ChangeCauseRecorder {
            change_cause: self.change_cause.clone(),
        }))
    }
}
