//
//  atlassian-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atlassian_api::api::ApiError;
use atlassian_api::cli::{Cli, Commands};
use atlassian_api::exit_codes;

fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("ATL_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps API failures to their dedicated exit codes.
fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<ApiError>() {
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        Some(e) if e.is_auth_failure() => exit_codes::AUTH_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Main command dispatcher
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global),
        Commands::Config(cmd) => cmd.run(&cli.global),
        Commands::Space(cmd) => cmd.run(&cli.global),
        Commands::Page(cmd) => cmd.run(&cli.global),
        Commands::Search(cmd) => cmd.run(&cli.global),
        Commands::Api(cmd) => cmd.run(&cli.global),
        Commands::Completion(cmd) => cmd.run(&cli.global),
        Commands::Version => {
            println!("{} version {}", atlassian_api::APP_NAME, atlassian_api::VERSION);
            Ok(())
        }
    }
}
