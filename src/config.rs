use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration for the inventory server.
#[derive(Debug, Clone, Parser)]
#[command(name = "stockroom", version, about = "Inventory catalog service with photo uploads")]
pub struct ServerConfig {
    /// Host address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Cache directory holding the inventory document and photo files.
    #[arg(short, long, default_value = "./cache")]
    pub cache: PathBuf,
}
