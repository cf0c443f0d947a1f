// src/commands.rs

use crate::codec;
use crate::error::Result;
use crate::handlers::App;
use crate::server;
use crate::store::{self, FileStore};
use chrono::Local;
use std::path::PathBuf;

fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir),
        None => store::default_dir(),
    }
}

fn open_app(data_dir: Option<PathBuf>) -> Result<App> {
    let dir = resolve_data_dir(data_dir)?;
    Ok(App::new(Box::new(FileStore::new(dir)?)))
}

/// Handles the 'init' command.
pub fn handle_init(data_dir: Option<PathBuf>) -> Result<()> {
    let dir = resolve_data_dir(data_dir)?;
    FileStore::new(dir.clone())?;
    println!("✓ Guest book storage ready at: {}", dir.display());
    Ok(())
}

/// Handles the 'serve' command.
pub fn handle_serve(addr: String, data_dir: Option<PathBuf>) -> Result<()> {
    let app = open_app(data_dir)?;
    server::run(&addr, app)
}

/// Handles the 'post' command.
pub fn handle_post(message: String, data_dir: Option<PathBuf>) -> Result<()> {
    if message.trim().is_empty() {
        eprintln!("Empty message, skipped.");
        return Ok(());
    }
    let app = open_app(data_dir)?;
    let record = codec::encode_entry(&message, Local::now());
    app.submit(&record)?;
    println!("✓ Entry recorded.");
    Ok(())
}

/// Handles the 'show' command.
pub fn handle_show(html: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let app = open_app(data_dir)?;
    let log = app.log()?;

    if html {
        println!("{}", app.page(&log)?);
        return Ok(());
    }

    let entries = codec::parse_log(&log);
    if entries.is_empty() {
        println!("No entries yet.");
        return Ok(());
    }
    for entry in entries {
        println!("Signed in on: {}", entry.timestamp);
        println!("{}", entry.message.trim_end());
        println!("{}", "─".repeat(40));
    }
    Ok(())
}
