pub mod money;
pub mod payout;
pub mod ports;
pub mod wallet;
