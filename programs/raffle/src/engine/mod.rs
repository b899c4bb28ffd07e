//! Execution-environment independent core of the raffle.
//!
//! The instruction handlers read the clock, build the oracle and payout
//! adapters from their accounts, and hand everything to the methods here.
//! Nothing in this module reads a sysvar, so it runs unchanged off-chain.

pub mod ledger;
pub mod machine;
pub mod oracle;
pub mod payout;
pub mod round_clock;

pub use oracle::{RandomnessOracle, SwitchboardRandomness};
pub use payout::{LamportPayout, PayoutExecutor};
