use std::{io::Read, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sie_tags::{FileParser, ParseOptions};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the record tag histogram of each file.
    Count {
        /// Files to count, read as delimited text if the name contains
        /// "csv", as a workbook if it contains "xls" and as SIE text
        /// otherwise.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,

        /// Output file path, defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a script of dataset commands against an empty registry.
    ///
    /// One command per line: `upload PATH`, `delete NAME`, `select [NAME]`
    /// or `list`. Empty lines are skipped. The `delete` name is everything
    /// after the first space, taken verbatim including trailing spaces, so
    /// `delete report.csv ` does not match `report.csv`. The `select` name
    /// is trimmed.
    Session {
        /// Script file path, defaults to stdin.
        #[arg(default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        /// Output file path, defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Count {
            files,
            parse,
            output,
        } => {
            let parser = FileParser::try_from(parse)?;
            write_text(output, count::run(&parser, &files)?)
        }
        Session {
            input,
            parse,
            output,
        } => {
            let parser = FileParser::try_from(parse)?;
            let script = if input.to_str() == Some("-") {
                let mut script = String::new();
                std::io::stdin().read_to_string(&mut script)?;
                script
            } else {
                std::fs::read_to_string(&input)
                    .with_context(|| format!("failed to read {input:?}"))?
            };
            write_text(output, session::run(&parser, &script)?)
        }
    }
}

mod count;
mod session;

/// Options for reading uploaded files.
#[derive(Debug, Args, Clone)]
struct ParseArgs {
    /// Field separator for delimited text files.
    #[arg(short, long, default_value = ",")]
    delimiter: char,
}

impl TryFrom<ParseArgs> for FileParser {
    type Error = anyhow::Error;

    fn try_from(value: ParseArgs) -> Result<Self> {
        if !value.delimiter.is_ascii() {
            bail!("Delimiter {:?} is not an ASCII character", value.delimiter);
        }
        Ok(FileParser::new(ParseOptions {
            delimiter: value.delimiter as u8,
        }))
    }
}

fn write_text(dest: Option<PathBuf>, text: String) -> Result<()> {
    match dest {
        None => print!("{text}"),
        Some(path) if path.is_dir() => {
            bail!("Cannot write text to a directory")
        }
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

/// Dataset name for a file on disk, the name part of its path.
fn file_name(path: &std::path::Path) -> Result<String> {
    let Some(name) = path.file_name() else {
        bail!("{path:?} has no file name");
    };
    Ok(name.to_string_lossy().into_owned())
}

/// Write a table as an indented block under a headline.
fn write_block(
    out: &mut String,
    head: &str,
    table: &sie_tags::FrequencyTable,
) -> std::fmt::Result {
    use std::fmt::Write;

    writeln!(out, "{head}")?;
    for line in table.to_string().lines() {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}
