// src/main.rs

use clap::Parser;

mod cli;
mod codec;
mod commands;
mod error;
mod handlers;
mod models;
mod render;
mod server;
mod store;

use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::handle_init(cli.data_dir),
        Commands::Serve { addr } => commands::handle_serve(addr, cli.data_dir),
        Commands::Post { message } => commands::handle_post(message, cli.data_dir),
        Commands::Show { html } => commands::handle_show(html, cli.data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
