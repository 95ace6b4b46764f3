//! Corten JavaScript Parser CLI
//!
//! Entry point for the parser tool. Parses CLI arguments and
//! delegates to the Driver.

use clap::Parser as ClapParser;
use js_cli::{Cli, CliError, Driver};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = std::env::var("CORTEN_LOG").or_else(|_| std::env::var("RUST_LOG"));
    if let Ok(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let mut driver = Driver::new(cli.output_mode()).with_compact(cli.compact);

    let result = if let Some(file) = &cli.file {
        driver.run_file(file).map(Some)
    } else if let Some(code) = &cli.eval {
        driver.run_source(code).map(Some)
    } else if cli.repl {
        driver.repl().map(|_| None)
    } else {
        println!("Corten JavaScript Parser v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  corten-parse --file <FILE>     Parse a JavaScript file");
        println!("  corten-parse --eval <CODE>     Parse inline JavaScript code");
        println!("  corten-parse --repl            Start interactive REPL");
        println!();
        println!("Run 'corten-parse --help' for more options.");
        Ok(None)
    };

    match result {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(CliError::Io(e)) => {
            eprintln!(
                "Error: Could not read file '{}': {}",
                cli.file.as_deref().unwrap_or_default(),
                e
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
