use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "congresswatch")]
#[command(
    version,
    about = "Congressional financial-disclosure trade tracker"
)]
#[command(
    long_about = "Load a congressional trade-disclosure dump and explore it: search trades and stocks, rank politicians by purchase volume, and follow tickers or politicians in a personalized feed."
)]
pub struct Cli {
    /// Path to the disclosure CSV dump
    #[arg(short, long, global = true, default_value = "trades.csv")]
    pub data: PathBuf,

    /// Path to the bookmark file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub bookmarks: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search trades by politician or ticker, or stocks with --stocks
    Search {
        /// Search text; empty shows the first 100 entries
        #[arg(default_value = "")]
        text: String,

        /// Search the stock directory instead of trades
        #[arg(short, long)]
        stocks: bool,
    },

    /// Rank politicians by total purchase volume
    Leaderboard {
        /// Show only the top N entries
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show trades for followed tickers and politicians
    Feed,

    /// Show one politician's trades and net ticker exposure
    Politician {
        /// Exact normalized name, e.g. "Nancy Pelosi"
        name: String,
    },

    /// Show one stock's trades and buy/sell volume
    Stock {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
    },

    /// Follow or unfollow a ticker or politician
    Follow {
        #[command(subcommand)]
        target: FollowTarget,
    },

    /// List everything currently followed
    Following,
}

#[derive(Subcommand)]
pub enum FollowTarget {
    /// Toggle a ticker on the watch list
    Ticker { ticker: String },

    /// Toggle a politician on the watch list
    Politician { name: String },
}
