use rust_decimal::Decimal;
use std::str::FromStr;

/// A console command, as typed by the player.
///
/// Amounts are `None` when missing or not a valid number; range checks happen when
/// the command is executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Deposit(Option<Decimal>),
    Withdraw(Option<Decimal>),
    Bet(Option<Decimal>),
    Exit,
    Unknown(String),
}

/// Parses `"<command> [amount]"`, e.g. `"deposit 100"`.
///
/// Returns `None` for blank input. The command word is case-insensitive.
pub fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.split_whitespace();
    let command = parts.next()?.to_lowercase();
    let amount = parts.next().and_then(|raw| Decimal::from_str(raw).ok());

    Some(match command.as_str() {
        "deposit" => Command::Deposit(amount),
        "withdraw" => Command::Withdraw(amount),
        "bet" => Command::Bet(amount),
        "exit" => Command::Exit,
        _ => Command::Unknown(command),
    })
}
