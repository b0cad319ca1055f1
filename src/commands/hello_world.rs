// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::io::Write;

use crate::cli::HelloWorldArgs;
use crate::error::Result;

pub const GREETING: &str = "Hello World";

/// Print the greeting; arguments are accepted and ignored.
pub fn run<W: Write>(_args: &HelloWorldArgs, out: &mut W) -> Result<()> {
    writeln!(out, "{}", GREETING)?;
    Ok(())
}
