use std::{fmt::Write, path::Path};

use anyhow::{bail, Context, Result};
use sie_tags::{
    workflow::{self, UploadOutcome},
    DatasetRegistry, FileParser, RawUpload,
};

use crate::{file_name, write_block};

/// Run dataset commands and collect what a user would have seen.
pub fn run(parser: &FileParser, script: &str) -> Result<String> {
    let registry = DatasetRegistry::new();
    let mut out = String::new();

    for (n, line) in script.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        match cmd {
            "upload" => {
                let path = Path::new(arg);
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read {path:?}"))?;
                let outcome = workflow::upload(
                    &registry,
                    parser,
                    RawUpload::new(file_name(path)?, bytes),
                );
                writeln!(out, "{outcome}")?;
                if let UploadOutcome::Registered { name, table } = &outcome {
                    write_block(&mut out, name, table)?;
                }
            }
            "delete" => {
                // Names are taken verbatim like a typed name, trailing
                // spaces included. An empty name is a request too.
                let outcome = workflow::delete(&registry, arg);
                writeln!(out, "{}", outcome.message())?;
            }
            "select" => {
                let selected = Some(arg.trim()).filter(|s| !s.is_empty());
                let chart = workflow::select(&registry, selected);
                writeln!(out, "{}", chart.title)?;
                for (label, count) in chart.labels.iter().zip(&chart.counts) {
                    writeln!(out, "  {label:32} {count}")?;
                }
            }
            "list" => {
                for name in registry.names() {
                    writeln!(out, "{name}")?;
                }
            }
            _ => bail!("line {}: unknown command {cmd:?}", n + 1),
        }
    }

    Ok(out)
}
