//
// Copyright 2025 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Intensity CLI
//!
//! Replays a script of `add`/`set`/`print` commands against an empty set of intensity
//! segments and writes the resulting snapshots to stdout.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use intensity_segments::{IntensitySegments, run_script};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Replay intensity segment commands.
#[derive(Parser)]
#[command(name = "intensity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script to run, one command per line (reads stdin when omitted)
    script: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Format of the final snapshot
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Compact `[[position,value],...]`
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let script = match &cli.script {
        Some(path) => {
            info!(path = %path.display(), "reading script");
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut segments = IntensitySegments::new();
    let printed =
        run_script(&script, &mut segments).inspect_err(|err| error!(%err, "script failed"))?;
    for snapshot in &printed {
        println!("{snapshot}");
    }

    info!(breakpoints = segments.len(), "script complete");
    match cli.format {
        Format::Text => println!("{segments}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&segments)?),
    }
    Ok(())
}
