//! Application layer orchestrating the wallet and the payout engine.
//!
//! `RoundCoordinator` is the single entry point the interfaces talk to: it checks the
//! table's stake window, resolves a win, and settles it against the `Ledger` port.
//! `simulation` estimates the schedule's return-to-player without a ledger.

pub mod round;
pub mod simulation;
