use clap::Parser;
use data_importer::Error;
use data_importer::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // A run with rejected records still completes; the consolidated
            // error listing has already been rendered
            process::exit(0);
        }
        Err(Error::ImportCancelled) => {
            // The cancellation notice has already been rendered
            process::exit(130);
        }
        Err(Error::ItemHandling { exit_code, source }) => {
            eprintln!("Error: import aborted: {:#}", source);
            process::exit(exit_code);
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Data Importer - Batched CSV Import Pipeline");
    println!("===========================================");
    println!();
    println!("Import CSV data through a record-by-record pipeline with batch");
    println!("flushing, partial-failure handling and interactive stepping.");
    println!();
    println!("USAGE:");
    println!("    data-importer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a CSV file and emit its records as JSON lines");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import a comma-separated file with a header row:");
    println!("    data-importer import books.csv");
    println!();
    println!("    # Semicolon-delimited file, collecting failures into a report:");
    println!("    data-importer import --delimiter ';' books.csv");
    println!();
    println!("    # Review records one by one, aborting on the first failure:");
    println!("    data-importer import --step --pause-on-error books.csv");
    println!();
    println!("For detailed help on the import command, use:");
    println!("    data-importer import --help");
}
