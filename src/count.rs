use std::path::PathBuf;

use anyhow::{Context, Result};
use sie_tags::FileParser;

use crate::{file_name, write_block};

pub fn run(parser: &FileParser, files: &[PathBuf]) -> Result<String> {
    let mut out = String::new();

    for path in files {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {path:?}"))?;
        let name = file_name(path)?;

        // Unreadable files are skipped, same as a rejected upload.
        match parser.parse(&bytes, &name) {
            Ok(table) => write_block(&mut out, &name, &table)?,
            Err(e) => log::warn!("count: skipping {path:?}: {e}"),
        }
    }

    Ok(out)
}
