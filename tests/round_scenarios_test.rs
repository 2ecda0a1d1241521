use casino_wallet::application::round::RoundCoordinator;
use casino_wallet::config::BetLimits;
use casino_wallet::domain::money::Balance;
use casino_wallet::domain::payout::PayoutEngine;
use casino_wallet::domain::ports::{Ledger, LedgerBox, RandomSourceBox};
use casino_wallet::error::WalletError;
use casino_wallet::infrastructure::in_memory::InMemoryLedger;
use casino_wallet::infrastructure::random::ScriptedRandomSource;
use rust_decimal_macros::dec;

fn coordinator(ledger: &InMemoryLedger, draws: Vec<f64>) -> RoundCoordinator<RandomSourceBox> {
    let ledger: LedgerBox = Box::new(ledger.clone());
    let random: RandomSourceBox = Box::new(ScriptedRandomSource::new(draws));
    RoundCoordinator::new(ledger, PayoutEngine::new(random), BetLimits::default())
}

#[tokio::test]
async fn test_session_through_trait_objects() {
    let ledger = InMemoryLedger::new();
    let mut rounds = coordinator(&ledger, vec![0.3, 0.5, 0.0, 0.9, 0.999]);

    rounds.deposit(dec!(100)).await.unwrap();
    rounds.withdraw(dec!(40)).await.unwrap();

    // Loss: 60 - 10
    let loss = rounds.place_round(dec!(10)).await.unwrap();
    assert_eq!(loss.win_amount, dec!(0));
    assert_eq!(loss.resulting_balance, Balance::new(dec!(50)));

    // 0.5 is a small win; r2 = 0 gives x1.0
    let small = rounds.place_round(dec!(4)).await.unwrap();
    assert_eq!(small.win_amount, dec!(4));
    assert_eq!(small.resulting_balance, Balance::new(dec!(50)));

    // 0.9 is a big win; r2 = 0.999 gives x9.992
    let big = rounds.place_round(dec!(2.5)).await.unwrap();
    assert_eq!(big.win_amount, dec!(24.98));
    assert_eq!(big.resulting_balance, Balance::new(dec!(72.48)));

    assert_eq!(ledger.balance().await.unwrap(), Balance::new(dec!(72.48)));
}

#[tokio::test]
async fn test_failed_rounds_are_no_ops() {
    let ledger = InMemoryLedger::new();
    // One losing draw for the unfunded stake, then the source runs dry.
    let mut rounds = coordinator(&ledger, vec![0.3]);
    rounds.deposit(dec!(8)).await.unwrap();

    assert!(matches!(
        rounds.place_round(dec!(0)).await,
        Err(WalletError::OutOfRange { .. })
    ));
    assert!(matches!(
        rounds.place_round(dec!(9)).await,
        Err(WalletError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        rounds.place_round(dec!(8)).await,
        Err(WalletError::RandomSourceFailure(_))
    ));

    assert_eq!(rounds.balance().await.unwrap(), Balance::new(dec!(8)));
}

#[tokio::test]
async fn test_ledger_shared_across_tasks() {
    let ledger = InMemoryLedger::new();
    ledger_handle(&ledger).deposit(dec!(30)).await.unwrap();

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let ledger = ledger_handle(&ledger);
            tokio::spawn(async move { ledger.settle(dec!(10), dec!(0)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(matches!(
        ledger_handle(&ledger).settle(dec!(0.01), dec!(0)).await,
        Err(WalletError::InsufficientFunds { .. })
    ));
    assert_eq!(ledger_handle(&ledger).balance().await.unwrap(), Balance::ZERO);
}

fn ledger_handle(ledger: &InMemoryLedger) -> LedgerBox {
    Box::new(ledger.clone())
}
