use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dressing-room")]
#[command(about = "Outfit dressing game: accounts, catalog and headless sessions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Store file (defaults to the configured one)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Display name (prompted when omitted)
        #[arg(short, long)]
        display_name: Option<String>,

        /// Avatar image path
        #[arg(short, long)]
        avatar: Option<String>,
    },

    /// Check credentials and show the profile
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// List categories and garments
    Catalog {
        /// Report garments whose image is missing under the asset root
        #[arg(long)]
        check_assets: bool,
    },

    /// Score a set of garments against a theme
    Score {
        /// Theme code (casual/soiree/colorful/chic)
        #[arg(short, long, required = true)]
        theme: String,

        /// Garment ids, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        garments: Vec<u32>,
    },

    /// Replay an input script through a dressing session
    Play {
        /// Replay script (JSON)
        #[arg(required = true)]
        script: PathBuf,

        /// Random seed for theme/character selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or edit the configuration
    Config {
        /// Show the configuration
        #[arg(long)]
        show: bool,

        /// Set the store file
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// Set the asset root directory
        #[arg(long)]
        set_asset_root: Option<PathBuf>,

        /// Set the number of gallery columns
        #[arg(long)]
        set_columns: Option<u32>,
    },
}
