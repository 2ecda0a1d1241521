use casino_wallet::application::round::RoundCoordinator;
use casino_wallet::application::simulation::simulate;
use casino_wallet::config::{BetLimits, DEFAULT_MAX_BET, DEFAULT_MIN_BET};
use casino_wallet::domain::payout::PayoutEngine;
use casino_wallet::domain::ports::{LedgerBox, RandomSourceBox};
use casino_wallet::infrastructure::in_memory::InMemoryLedger;
use casino_wallet::infrastructure::random::{OsRandomSource, SeededRandomSource};
use casino_wallet::interfaces::console::game_loop::GameLoop;
use casino_wallet::interfaces::csv::command_reader::{CommandReader, CommandType};
use casino_wallet::interfaces::csv::event_writer::{EventRecord, EventWriter};
use casino_wallet::logging;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Smallest stake a round accepts
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_BET)]
    min_bet: Decimal,

    /// Largest stake a round accepts
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_BET)]
    max_bet: Decimal,

    /// Seed a reproducible random source instead of the OS generator
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively on stdin/stdout (default)
    Play,
    /// Apply a CSV script of `type, amount` rows and print the resulting events
    Replay {
        /// Input commands CSV file
        input: PathBuf,
    },
    /// Resolve a fixed stake many times and report the observed return-to-player
    Simulate {
        #[arg(long, default_value_t = 1_000_000)]
        rounds: u64,

        #[arg(long, default_value_t = dec!(100))]
        bet: Decimal,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn random_source(seed: Option<u64>) -> RandomSourceBox {
    match seed {
        Some(seed) => Box::new(SeededRandomSource::new(seed)),
        None => Box::new(OsRandomSource::new()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let limits = BetLimits::new(cli.min_bet, cli.max_bet).into_diagnostic()?;
    let payout = PayoutEngine::new(random_source(cli.seed));

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let ledger: LedgerBox = Box::new(InMemoryLedger::new());
            let coordinator = RoundCoordinator::new(ledger, payout, limits);
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut game = GameLoop::new(coordinator, input, tokio::io::stdout());
            game.run().await.into_diagnostic()?;
        }
        Commands::Replay { input } => {
            let ledger: LedgerBox = Box::new(InMemoryLedger::new());
            let mut coordinator = RoundCoordinator::new(ledger, payout, limits);

            let file = File::open(input).into_diagnostic()?;
            let reader = CommandReader::new(file);
            let mut writer = EventWriter::new(io::stdout().lock());

            for record in reader.commands() {
                let record = match record {
                    Ok(record) => record,
                    Err(e) => {
                        warn!("Error reading command: {}", e);
                        continue;
                    }
                };

                let event = match record.r#type {
                    CommandType::Deposit => coordinator
                        .deposit(record.amount)
                        .await
                        .map(|b| EventRecord::transfer(record.r#type, record.amount, b)),
                    CommandType::Withdraw => coordinator
                        .withdraw(record.amount)
                        .await
                        .map(|b| EventRecord::transfer(record.r#type, record.amount, b)),
                    CommandType::Bet => coordinator
                        .place_round(record.amount)
                        .await
                        .map(|outcome| EventRecord::round(&outcome)),
                };

                match event {
                    Ok(event) => writer.write_event(&event).into_diagnostic()?,
                    Err(e) => warn!("Error processing command: {}", e),
                }
            }

            writer.flush().into_diagnostic()?;
        }
        Commands::Simulate { rounds, bet, json } => {
            let mut payout = payout;
            let report = simulate(&mut payout, bet, rounds).into_diagnostic()?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).into_diagnostic()?
                );
            } else {
                println!("rounds: {}", report.rounds);
                println!("bet: {}", report.bet_amount);
                println!(
                    "losses: {} ({:.4})",
                    report.losses,
                    report.loss_frequency()
                );
                println!(
                    "small wins: {} ({:.4})",
                    report.small_wins,
                    report.small_win_frequency()
                );
                println!(
                    "big wins: {} ({:.4})",
                    report.big_wins,
                    report.big_win_frequency()
                );
                println!("total staked: {}", report.total_staked);
                println!("total won: {}", report.total_won);
                println!(
                    "rtp: {:.4} (theoretical {:.4})",
                    report.rtp(),
                    report.theoretical_rtp
                );
            }
        }
    }

    Ok(())
}
