//! Porter CLI - fork-based pull request workflows.

use clap::Parser;

mod commands;
mod output;
mod services;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cherry { pr_number, branch } => commands::cherry::run(pr_number, branch.as_deref()),
        Commands::Pr { branch, shas } => commands::pr::run(&branch, &shas),
        Commands::Prune { dry_run } => commands::prune::run(dry_run),
        Commands::Top { limit, count } => commands::top::run(count.unwrap_or(limit)),
        Commands::Workspace { name } => commands::workspace::run(&name),
        Commands::Stage { pattern, preview } => commands::stage::run(&pattern, preview),
        Commands::Forks { no_fix_urls } => commands::forks::run(no_fix_urls),
        Commands::Rebase { interactive } => commands::rebase::run(interactive),
        Commands::Toc => commands::toc::run(),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        // {e:#} renders the whole context chain on one line.
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Initialize tracing to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
