//! Header remapper CLI.

use clap::Parser;
use remap_cli::cli::{Cli, Command};
use remap_cli::commands::{run_compare, run_config, run_merge};
use remap_cli::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = cli.config.as_deref();
    let result = match &cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Merge(args) => run_merge(args, config),
        Command::Config(args) => run_config(args, config).map(|path| {
            println!("Settings saved to {}", path.display());
        }),
    };
    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
