use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bucketlist")]
#[command(about = "Browse and edit the items of a bucket list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings profile to read and write.
    #[arg(long, default_value = crate::settings::DEFAULT_PROFILE, global = true)]
    pub profile: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the detail screen of one list.
    Open {
        list_id: String,

        /// Display name shown while the list loads.
        #[arg(long)]
        name: Option<String>,

        /// Use a seeded in-memory store instead of Firestore.
        #[arg(long)]
        memory: bool,
    },

    /// Inspect or change stored settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,

    /// List saved profiles.
    Profiles,

    /// Set a key; an empty value clears it.
    Set { key: String, value: String },
}
