use anchor_lang::prelude::*;

#[constant]
pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Upper bound on entrants in a single round. The account is sized for this
/// many participants at creation and never reallocated.
pub const MAX_ENTRANTS: usize = 100;

/// A Switchboard reveal is 32 bytes, so at most four `u64` words can be
/// drawn from a single request.
pub const MAX_RANDOM_WORDS: u32 = 4;

// defaults behind `InitializeParams::default()`
pub const DEFAULT_ENTRANCE_FEE: u64 = 10_000_000; // 0.01 SOL
pub const DEFAULT_INTERVAL: u64 = 30; // seconds
pub const DEFAULT_CALLBACK_COMPUTE_LIMIT: u32 = 500_000;
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;
pub const DEFAULT_NUM_WORDS: u32 = 1;
