use clap::Parser;
use tracing_subscriber::EnvFilter;

use spacer_counter::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("spacer_counter=debug,info")
    } else {
        EnvFilter::new("spacer_counter=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Count(args) => {
            cli::count::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::CheckLibrary(args) => {
            cli::check_library::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
