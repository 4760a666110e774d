use book_catalog::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("book_catalog=debug,info")
    } else {
        EnvFilter::new("book_catalog=warn")
    };

    // Logs go to stderr; stdout carries the menu
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(cli::Commands::Menu) {
        cli::Commands::Menu => {
            cli::run_menu(&cli.file)?;
        }
        cli::Commands::List(args) => {
            cli::catalog::run_list(&args, &cli.file, cli.format, cli.verbose)?;
        }
        cli::Commands::Show(args) => {
            cli::catalog::run_show(&args, &cli.file, cli.format)?;
        }
    }

    Ok(())
}
