use cbc_parser::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and exit
    if args.command.is_none() {
        show_help();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(1);
        }
    }
}

/// Show help information when no subcommand is provided
fn show_help() {
    let mut command = Args::command();
    if command.print_help().is_err() {
        eprintln!("Usage: cbc-parser <edan|human> <INPUT_FILE> [NORMAL_RANGES_FILE]");
    }
    println!();
}
