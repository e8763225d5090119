// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GripQL command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::{handle_example, handle_inspect, handle_version, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level_filter())
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Version => {
            handle_version();
            Ok(())
        }
        Commands::Inspect { file, format } => handle_inspect(file, format),
        Commands::Example { graph, format } => handle_example(graph, format),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
