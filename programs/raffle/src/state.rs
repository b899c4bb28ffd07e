use anchor_lang::prelude::*;

use crate::constants::{
    DEFAULT_CALLBACK_COMPUTE_LIMIT, DEFAULT_ENTRANCE_FEE, DEFAULT_INTERVAL, DEFAULT_NUM_WORDS,
    DEFAULT_REQUEST_CONFIRMATIONS,
};
use crate::engine::{ledger::EntryLedger, round_clock::RoundClock};

#[account]
#[derive(Debug, InitSpace)]
pub struct Raffle {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// The account that created the raffle. Recorded for observers only;
    /// there is no privileged instruction.
    pub authority: Pubkey,

    /// The fixed amount (in lamports) every entrant pays.
    pub entrance_fee: u64,

    /// Where the current round stands. The outstanding randomness request,
    /// when there is one, lives inside the phase.
    pub phase: RafflePhase,

    /// Entrants and pooled funds of the current round.
    pub ledger: EntryLedger,

    /// Start of the current round and the interval it must stay open.
    pub clock: RoundClock,

    /// Oracle connection parameters, fixed at initialization.
    pub oracle: OracleConfig,

    /// Number of completed rounds.
    pub round: u64,

    /// Winner of the most recently completed round.
    pub recent_winner: Option<Pubkey>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RafflePhase {
    /// Entries are accepted and no randomness request exists.
    Open,
    /// Entries are rejected until the outstanding request is resolved.
    AwaitingRandomness(OutstandingRequest),
}

impl RafflePhase {
    pub fn is_open(&self) -> bool {
        matches!(self, RafflePhase::Open)
    }

    pub fn outstanding(&self) -> Option<&OutstandingRequest> {
        match self {
            RafflePhase::Open => None,
            RafflePhase::AwaitingRandomness(request) => Some(request),
        }
    }
}

/// The single in-flight randomness request of a round, with the round's
/// entrant count and pool frozen at request time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct OutstandingRequest {
    pub request_id: RequestId,
    pub requested_at: i64,
    pub entrant_count: u32,
    pub pool: u64,
}

/// Opaque identifier correlating a randomness request with its response.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct RequestId(pub [u8; 32]);

impl Space for RequestId {
    const INIT_SPACE: usize = 32;
}

impl From<Pubkey> for RequestId {
    fn from(key: Pubkey) -> Self {
        Self(key.to_bytes())
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Pubkey::new_from_array(self.0))
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct OracleConfig {
    /// Identifies the oracle lane (price tier) requests are routed through.
    pub key_hash: [u8; 32],

    /// Billing subscription the requests are charged to.
    pub subscription_id: u64,

    /// Slots the oracle waits before answering.
    pub request_confirmations: u16,

    /// Compute budget granted to the fulfillment callback.
    pub callback_compute_limit: u32,

    /// Number of random words requested per round.
    pub num_words: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            key_hash: [0; 32],
            subscription_id: 0,
            request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
            callback_compute_limit: DEFAULT_CALLBACK_COMPUTE_LIMIT,
            num_words: DEFAULT_NUM_WORDS,
        }
    }
}

/// Arguments accepted by `initialize`. Nothing here can be changed afterwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    pub entrance_fee: u64,
    pub interval: u64,
    pub oracle: OracleConfig,
}

impl Default for InitializeParams {
    fn default() -> Self {
        Self {
            entrance_fee: DEFAULT_ENTRANCE_FEE,
            interval: DEFAULT_INTERVAL,
            oracle: OracleConfig::default(),
        }
    }
}

/// Answer to the scheduler's readiness probe.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
}

/// Read-only view of the whole raffle, returned by `get_raffle_state`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RaffleSnapshot {
    pub phase: RafflePhase,
    pub entrance_fee: u64,
    pub interval: u64,
    pub started_at: i64,
    pub entrants: Vec<Pubkey>,
    pub pool: u64,
    pub round: u64,
    pub recent_winner: Option<Pubkey>,
    pub num_words: u32,
    pub request_confirmations: u16,
}
