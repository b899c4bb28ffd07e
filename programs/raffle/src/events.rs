use anchor_lang::prelude::*;

use crate::state::RequestId;

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct RaffleEntered {
    pub player: Pubkey,
    pub round: u64,
    /// Pool after this entry.
    pub pool: u64,
}

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct RequestedRaffleWinner {
    pub request_id: RequestId,
    pub round: u64,
    pub entrant_count: u32,
    pub pool: u64,
}

#[event]
#[derive(Debug, PartialEq, Eq)]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub round: u64,
    pub amount: u64,
}
