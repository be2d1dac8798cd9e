// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hr - run integration commands against remote hosts through Ansible

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{list, run};
use hr_adapters::{AnsibleAdapter, TracedEngine};
use hr_engine::Runtime;
use output::{print_list, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "hr",
    version,
    about = "Host runner - execute integration commands via Ansible"
)]
struct Cli {
    /// Integration definition file
    #[arg(long, global = true, env = "HR_DEFINITION")]
    definition: Option<PathBuf>,

    /// Parameter file (credentials, port, concurrency, module args)
    #[arg(long, global = true, env = "HR_PARAMS")]
    params: Option<PathBuf>,

    /// Print structured JSON instead of markdown
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered commands
    List,
    /// Run a registered command
    Run(run::RunArgs),
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    match cli.command {
        Commands::List => match config::load_registry(cli.definition.as_deref()) {
            Ok(registry) => {
                print_list(&list::rows(&registry), format);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        Commands::Run(args) => {
            match run_command(cli.definition, cli.params, &args, format).await {
                Ok(rendered) => {
                    print!("{rendered}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!(
                        "Failed to execute {} command.\nError:\n{e:#}",
                        args.command
                    );
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn run_command(
    definition: Option<PathBuf>,
    params: Option<PathBuf>,
    args: &run::RunArgs,
    format: OutputFormat,
) -> Result<String> {
    if args.command == hr_engine::TEST_MODULE {
        return Ok("ok\n".to_string());
    }

    let registry = config::load_registry(definition.as_deref())?;
    let params = config::load_params(params.as_deref())?;
    let engine = TracedEngine::new(AnsibleAdapter::from_env());
    let runtime = Runtime::new(engine, registry, params);

    run::run(&runtime, args, format).await
}
