use clap::{Parser, Subcommand, ValueEnum};

/// CLI arguments for chartform
#[derive(Debug, Parser)]
#[command(
    name = "chartform",
    version,
    about = "Search the location dataset, check locations and submit birth-chart requests"
)]
pub struct CliArgs {
    /// Path to the countries+states+cities dataset (.json or .json.gz)
    #[arg(
        short = 'i',
        long = "input",
        global = true,
        default_value = "static/data/countries+states+cities.json"
    )]
    pub input: String,

    /// Optional comma-separated list of ISO2 country codes to keep (e.g. GB,FR)
    #[arg(short = 'f', long = "filter", global = true)]
    pub filter: Option<String>,

    /// JSON file with form settings (endpoint, debounce, messages, ...)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Parse the JSON source even if a binary cache exists
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// Log progress (info level)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// Ranked, accent-insensitive city search
    Search {
        /// Query (at least two characters)
        query: String,

        /// Show at most this many results
        #[arg(short = 'n', long = "limit")]
        limit: Option<usize>,
    },

    /// Check a typed location the way the form does when the field loses focus
    Validate {
        /// Location text, e.g. "London" or "London, England, United Kingdom"
        text: String,
    },

    /// Submit a chart request to the calculate endpoint
    Submit {
        /// Location text; must name a city exactly unless --pick is given
        #[arg(long)]
        location: String,

        /// Commit the N-th suggestion (0-based) for --location instead
        #[arg(long)]
        pick: Option<usize>,

        /// Date of birth, DD/MM/YYYY
        #[arg(long)]
        dob: String,

        /// Time of birth, HH:MM
        #[arg(long)]
        time: Option<String>,

        /// Extra form fields as name=value
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Server base URL the endpoint is relative to
        #[arg(long, default_value = "http://127.0.0.1:5000")]
        base_url: String,

        /// Override the endpoint from the config
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Show one card from astrology.json
    Card {
        /// Path to astrology.json
        #[arg(long, default_value = "static/data/astrology.json")]
        cards: String,

        /// Card category (omit to list categories)
        category: Option<String>,

        /// Card key (omit to list the category)
        key: Option<String>,
    },

    /// Apply the form's input mask to a value
    Mask {
        #[arg(value_enum)]
        kind: MaskKind,
        input: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MaskKind {
    Date,
    Time,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got {s:?}"))
}
