use super::parser::{Command, parse_command};
use crate::application::round::RoundCoordinator;
use crate::domain::money::Balance;
use crate::domain::ports::RandomSource;
use crate::error::Result;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

const USAGE: &str = "Invalid command. Try: 'deposit 10', 'withdraw 5', 'bet 1', or 'exit'.";

/// Interactive read-eval-print loop over any async line source and sink.
///
/// Runs until the player types `exit` or the input ends. Rejected operations are
/// reported to the player and leave the wallet unchanged.
pub struct GameLoop<R: RandomSource, I: AsyncBufRead + Unpin, O: AsyncWrite + Unpin> {
    coordinator: RoundCoordinator<R>,
    input: I,
    output: O,
}

impl<R: RandomSource, I: AsyncBufRead + Unpin, O: AsyncWrite + Unpin> GameLoop<R, I, O> {
    pub fn new(coordinator: RoundCoordinator<R>, input: I, output: O) -> Self {
        Self {
            coordinator,
            input,
            output,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.say("Welcome to the Casino!").await?;
        self.say("Please, submit action:").await?;
        info!("game loop started");

        let mut line = String::new();
        loop {
            self.output.write_all(b"\n> ").await?;
            self.output.flush().await?;

            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                break;
            }
            let Some(command) = parse_command(&line) else {
                continue;
            };

            info!(input = line.trim(), "received command");
            if command == Command::Exit {
                self.say("Thank you for playing! Hope to see you again soon.")
                    .await?;
                break;
            }

            if let Err(e) = self.execute(command).await {
                error!(input = line.trim(), error = %e, "command failed");
                self.say(&format!("Error: {e}")).await?;
            }
        }

        self.output.flush().await?;
        info!("game loop stopped");
        Ok(())
    }

    async fn say(&mut self, message: &str) -> Result<()> {
        self.output.write_all(message.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Deposit(amount) => {
                let Some(amount) = positive(amount) else {
                    self.say("Invalid deposit amount.").await?;
                    return Ok(());
                };
                let balance = self.coordinator.deposit(amount).await?;
                self.say(&format!(
                    "Your deposit of ${} was successful. Your current balance is: ${balance}",
                    Balance::new(amount)
                ))
                .await?;
            }
            Command::Withdraw(amount) => {
                let Some(amount) = positive(amount) else {
                    self.say("Invalid withdrawal amount.").await?;
                    return Ok(());
                };
                let balance = self.coordinator.withdraw(amount).await?;
                self.say(&format!(
                    "Your withdrawal of ${} was successful. Your current balance is: ${balance}",
                    Balance::new(amount)
                ))
                .await?;
            }
            Command::Bet(amount) => {
                let Some(amount) = positive(amount) else {
                    self.say("Invalid bet amount.").await?;
                    return Ok(());
                };
                let outcome = self.coordinator.place_round(amount).await?;
                if outcome.is_win() {
                    self.say(&format!(
                        "Congrats - you won ${}! Your current balance is: ${}",
                        Balance::new(outcome.win_amount),
                        outcome.resulting_balance
                    ))
                    .await?;
                } else {
                    self.say(&format!(
                        "No luck this time! Your current balance is: ${}",
                        outcome.resulting_balance
                    ))
                    .await?;
                }
            }
            Command::Unknown(_) => self.say(USAGE).await?,
            Command::Exit => {}
        }
        Ok(())
    }

    /// Consumes the loop, handing back the output sink.
    pub fn into_output(self) -> O {
        self.output
    }
}

fn positive(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|a| *a > Decimal::ZERO)
}
