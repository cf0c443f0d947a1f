// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "guestbook - a tiny web guest book backed by a flat text log",
    long_about = "guestbook stores visitor messages as tagged text records in a single log blob and renders them as an HTML page. Run `guestbook serve` to expose the web form, or use `post` and `show` to work with the log directly from the terminal."
)]
pub struct Cli {
    /// Directory holding the guest book blobs. Defaults to ~/.config/guestbook/app-data.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initializes the guest book data directory.
    Init,

    /// Serves the guest book over HTTP.
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:8080", help = "Address to listen on")]
        addr: String,
    },

    /// Adds a new entry directly, without going through the web form.
    Post {
        #[arg(short, long, help = "The message text of the entry")]
        message: String,
    },

    /// Lists stored entries, newest first.
    Show {
        #[arg(long, help = "Print the rendered HTML page instead of plain text")]
        html: bool,
    },
}
