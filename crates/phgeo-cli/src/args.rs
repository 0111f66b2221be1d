use clap::{Parser, Subcommand};

/// CLI arguments for phgeo-cli
#[derive(Debug, Parser)]
#[command(
    name = "phgeo",
    version,
    about = "Resolve Philippine places mentioned in social-media text"
)]
pub struct CliArgs {
    /// Dataset to index: JSON (optionally .gz) or a .bin snapshot (default: bundled sample)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// JSON file with resolver weights and limits
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve each text (or each stdin line when none are given)
    Resolve {
        /// Texts to resolve
        texts: Vec<String>,
    },

    /// List the candidates that survive extraction and filtering
    Candidates {
        text: String,
    },

    /// Show every scored interpretation of a text
    Explain {
        text: String,
    },

    /// Show a summary of the index contents
    Stats,

    /// Lookup a barangay by name
    Barangay {
        name: String,
        /// City or municipality hint
        #[arg(long)]
        city: Option<String>,
        /// Province hint
        #[arg(long)]
        province: Option<String>,
    },

    /// Lookup a city or municipality by name
    City {
        name: String,
        /// Province hint
        #[arg(long)]
        province: Option<String>,
    },

    /// Lookup a province by name
    Province {
        name: String,
    },

    /// Build the index and save it as a binary snapshot
    Snapshot {
        /// Output path (e.g. ph.bin or ph.bin.gz)
        out: String,
    },
}
