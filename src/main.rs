mod bookmarks;
mod catalog;
mod cli;
mod error;
mod importers;
mod models;
mod normalize;
mod query;
mod reports;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use bookmarks::{BookmarkStore, JsonFileStore};
use cli::{Cli, Commands, FollowTarget};
use models::Trade;
use query::{QueryEngine, SearchResults, SearchScope};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let bookmark_path = match cli.bookmarks {
        Some(path) => path,
        None => JsonFileStore::default_path()?,
    };
    let store = JsonFileStore::open(&bookmark_path)?;
    let mut bookmarks = BookmarkStore::load(Box::new(store))?;

    // Follow/following only touch the bookmark file; no need to load the dump
    match cli.command {
        Commands::Follow { target } => return handle_follow(&mut bookmarks, target),
        Commands::Following => return handle_following(&bookmarks),
        _ => {}
    }

    info!("loading {:?}", cli.data);
    let mut load = catalog::spawn_load(cli.data);
    let catalog = catalog::wait_ready(&mut load).await?;
    let engine = QueryEngine::new(catalog);

    match cli.command {
        Commands::Search { text, stocks } => {
            let scope = if stocks {
                SearchScope::Stocks
            } else {
                SearchScope::Trades
            };
            match engine.search(&text, scope) {
                SearchResults::Trades(trades) => print_trades(&trades),
                SearchResults::Stocks(stocks) => {
                    #[derive(Tabled)]
                    struct StockRow {
                        #[tabled(rename = "Ticker")]
                        ticker: String,
                        #[tabled(rename = "Company")]
                        company: String,
                    }
                    let rows: Vec<StockRow> = stocks
                        .into_iter()
                        .map(|s| StockRow {
                            ticker: s.ticker,
                            company: s.company,
                        })
                        .collect();
                    println!("{}", Table::new(rows).with(Style::rounded()));
                }
            }
            Ok(())
        }

        Commands::Leaderboard { limit } => {
            #[derive(Tabled)]
            struct LeaderRow {
                #[tabled(rename = "#")]
                rank: usize,
                #[tabled(rename = "Politician")]
                name: String,
                #[tabled(rename = "Buy Volume")]
                buy: String,
                #[tabled(rename = "Sell Volume")]
                sell: String,
            }
            let rows: Vec<LeaderRow> = engine
                .catalog()
                .leaderboard
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, s)| LeaderRow {
                    rank: i + 1,
                    name: s.name.clone(),
                    buy: format_usd(s.buy_volume),
                    sell: format_usd(s.sell_volume),
                })
                .collect();
            println!("{}", Table::new(rows).with(Style::rounded()));
            Ok(())
        }

        Commands::Feed => {
            let feed = engine.personalized_feed(&bookmarks);
            if feed.is_empty() {
                println!(
                    "{} Nothing followed yet. Use `congresswatch follow` to build your feed.",
                    "ℹ".blue().bold()
                );
            } else {
                print_trades(&feed);
            }
            Ok(())
        }

        Commands::Politician { name } => {
            let trades = engine.trades_for_politician(&name);
            if trades.is_empty() {
                println!("No trades found for {:?}", name);
                return Ok(());
            }
            let party = reports::party_display(&trades[0].party);
            let chamber = trades[0].chamber.clone();
            let followed = if bookmarks.is_politician_saved(&name) {
                " ★".yellow().to_string()
            } else {
                String::new()
            };
            println!("\n{} ({}, {}){}\n", name.bold(), party, chamber, followed);

            let exposure = reports::politician_exposure(&trades);
            if !exposure.is_empty() {
                #[derive(Tabled)]
                struct ExposureRow {
                    #[tabled(rename = "Ticker")]
                    ticker: String,
                    #[tabled(rename = "Net Exposure")]
                    net: String,
                }
                let rows: Vec<ExposureRow> = exposure
                    .into_iter()
                    .map(|(ticker, net)| ExposureRow {
                        ticker,
                        net: format_usd(net),
                    })
                    .collect();
                println!("{}\n", Table::new(rows).with(Style::rounded()));
            }
            print_trades(&trades);
            Ok(())
        }

        Commands::Stock { ticker } => {
            let trades = engine.trades_for_ticker(&ticker);
            if trades.is_empty() {
                println!("No trades found for {:?}", ticker);
                return Ok(());
            }
            let (buy, sell) = reports::stock_volume(&trades);
            let followed = if bookmarks.is_ticker_saved(&ticker) {
                " ★".yellow().to_string()
            } else {
                String::new()
            };
            println!(
                "\n{} - {}{}\n  Bought: {}\n  Sold:   {}\n",
                ticker.bold(),
                engine.company_name(&ticker),
                followed,
                format_usd(buy).green(),
                format_usd(sell).red()
            );
            print_trades(&trades);
            Ok(())
        }

        Commands::Follow { .. } | Commands::Following => unreachable!("handled before load"),
    }
}

fn handle_follow(bookmarks: &mut BookmarkStore, target: FollowTarget) -> Result<()> {
    let (label, value, saved) = match target {
        FollowTarget::Ticker { ticker } => {
            let saved = bookmarks.toggle_ticker(&ticker)?;
            ("ticker", ticker, saved)
        }
        FollowTarget::Politician { name } => {
            let saved = bookmarks.toggle_politician(&name)?;
            ("politician", name, saved)
        }
    };
    if saved {
        println!("{} Following {} {}", "✓".green().bold(), label, value.bold());
    } else {
        println!("{} Unfollowed {} {}", "✓".green().bold(), label, value.bold());
    }
    Ok(())
}

fn handle_following(bookmarks: &BookmarkStore) -> Result<()> {
    let mut tickers: Vec<&str> = bookmarks.saved_tickers().collect();
    let mut politicians: Vec<&str> = bookmarks.saved_politicians().collect();
    tickers.sort_unstable();
    politicians.sort_unstable();

    if tickers.is_empty() && politicians.is_empty() {
        println!("Not following anything yet.");
        return Ok(());
    }
    if !tickers.is_empty() {
        println!("{}", "Tickers".bold());
        for t in tickers {
            println!("  {}", t);
        }
    }
    if !politicians.is_empty() {
        println!("{}", "Politicians".bold());
        for p in politicians {
            println!("  {}", p);
        }
    }
    Ok(())
}

fn print_trades(trades: &[Trade]) {
    #[derive(Tabled)]
    struct TradeRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Ticker")]
        ticker: String,
        #[tabled(rename = "Type")]
        trade_type: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "Politician")]
        representative: String,
    }

    let rows: Vec<TradeRow> = trades
        .iter()
        .map(|t| TradeRow {
            date: t.date.format("%Y-%m-%d").to_string(),
            ticker: t.ticker.clone(),
            trade_type: t.trade_type.as_str().to_string(),
            amount: t.amount_raw.clone(),
            representative: t.representative.clone(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("{} trades", trades.len());
}

fn format_usd(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}
