//! Command-line entrypoint for the bookshelf service.

use anyhow::Context;
use bookshelf_app::modules::{authors, books};
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about = "Author and book management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP service (default)
    Serve,
    /// Print the registered search query names
    Queries,
    /// Print the effective settings as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(),
        Commands::Queries => queries(),
        Commands::Config => config(),
    }
}

fn serve() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load bookshelf settings")?;
    bookshelf_telemetry::init(&settings.telemetry)?;
    tracing::info!(env = ?settings.environment, "starting bookshelf service");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(bookshelf_app::run(settings))
}

fn queries() -> anyhow::Result<()> {
    let author_queries = authors::search::registry().context("author query registry")?;
    let book_queries = books::search::registry().context("book query registry")?;

    for name in author_queries.names() {
        println!("author\t{name}");
    }
    for name in book_queries.names() {
        println!("book\t{name}");
    }
    Ok(())
}

fn config() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load bookshelf settings")?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
