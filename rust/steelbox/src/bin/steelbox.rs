// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Steelbox CLI - synthesize a box and write it as OBJ.
//!
//! ```text
//! steelbox [--config <file.json>] [--output <file.obj>] [--summary]
//! ```
//!
//! Parameters missing from the JSON file take their defaults. `--summary`
//! prints a JSON scene summary to stdout; logs go to stderr and follow
//! `RUST_LOG`.

use anyhow::{bail, Context};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use steelbox::{synthesize, write_obj, BoxParams, SceneSummary};

struct Args {
    config: Option<PathBuf>,
    output: PathBuf,
    summary: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        output: PathBuf::from("box.obj"),
        summary: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().context("--config needs a file")?.into());
            }
            "--output" => {
                args.output = iter.next().context("--output needs a file")?.into();
            }
            "--summary" => args.summary = true,
            "-h" | "--help" => {
                println!("usage: steelbox [--config <file.json>] [--output <file.obj>] [--summary]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {}", other),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    let params = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            BoxParams::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BoxParams::default(),
    };

    let root = synthesize(&params).context("synthesizing box")?;

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    write_obj(&root, &mut writer)?;
    writer.flush()?;

    tracing::info!(output = %args.output.display(), "done");

    if args.summary {
        println!("{}", SceneSummary::from_assembly(&root).to_json()?);
    }
    Ok(())
}
