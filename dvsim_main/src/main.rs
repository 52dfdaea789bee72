// Dvsim: Simulating Distance-Vector Route Convergence
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use clap::Parser;
use log::*;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

/// Simulate distance-vector route convergence over a static topology, applying a batch of link
/// updates after the initial convergence. The scenario is read from stdin unless a file is
/// given; the tables are written to stdout. Set `RUST_LOG` for diagnostics on stderr.
#[derive(Parser, Debug)]
#[clap(name = "dvsim")]
struct CommandLineArguments {
    /// Read the scenario from this file instead of stdin
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    let stdout = io::stdout();
    let mut output = stdout.lock();

    match args.file {
        Some(path) => {
            info!("Reading the scenario from {:?}", path);
            dvsim::run(BufReader::new(File::open(path)?), &mut output)?;
        }
        None => {
            info!("Reading the scenario from stdin");
            let stdin = io::stdin();
            dvsim::run(stdin.lock(), &mut output)?;
        }
    }

    output.flush()?;
    Ok(())
}
