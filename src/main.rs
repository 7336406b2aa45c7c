use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use schemadiff::cli::commands::diff::{DiffCommand, DiffCommandHandler};
use schemadiff::cli::commands::parse::{ParseCommand, ParseCommandHandler};
use schemadiff::cli::{Cli, Commands};
use std::process;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    let result = run_command(cli);

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    match cli.command {
        Commands::Diff {
            format1,
            file1,
            format2,
            file2,
        } => {
            let handler = DiffCommandHandler::new();
            let command = DiffCommand {
                format1,
                file1,
                format2,
                file2,
                output: cli.format,
                verbose: cli.verbose,
            };
            handler.execute(&command)
        }

        Commands::Parse { format, file } => {
            let handler = ParseCommandHandler::new();
            let command = ParseCommand {
                format,
                file,
                output: cli.format,
                verbose: cli.verbose,
            };
            handler.execute(&command)
        }
    }
}
