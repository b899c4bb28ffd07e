//! Local stand-ins for the randomness oracle, the payout path and the
//! off-chain keeper, for driving a raffle end to end without a cluster.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::engine::{PayoutExecutor, RandomnessOracle};
use crate::error::RaffleError;
use crate::events::{RequestedRaffleWinner, WinnerPicked};
use crate::state::{OracleConfig, Raffle, RequestId};

/// Deterministic randomness coordinator. Request ids count up from 1 and
/// the words for a request are `keccak(request_id || i)`.
#[derive(Debug)]
pub struct MockCoordinator {
    next_request_id: u64,
    pending: BTreeMap<RequestId, u32>,
}

impl Default for MockCoordinator {
    fn default() -> Self {
        Self {
            next_request_id: 1,
            pending: BTreeMap::new(),
        }
    }
}

impl MockCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random_words(request_id: &RequestId, num_words: u32) -> Vec<u64> {
        (0..num_words)
            .map(|i| {
                let hash = keccak::hashv(&[request_id.0.as_ref(), i.to_le_bytes().as_ref()]);
                let mut word = [0u8; 8];
                word.copy_from_slice(&hash.to_bytes()[..8]);
                u64::from_le_bytes(word)
            })
            .collect()
    }

    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Delivers the words for `request_id` to the raffle. The request stays
    /// pending if the raffle rejects the delivery.
    pub fn fulfill_random_words<P: PayoutExecutor>(
        &mut self,
        request_id: RequestId,
        raffle: &mut Raffle,
        now: i64,
        payout: &mut P,
    ) -> Result<WinnerPicked> {
        let num_words = self.num_words(&request_id)?;
        let words = Self::random_words(&request_id, num_words);
        self.deliver(request_id, &words, raffle, now, payout)
    }

    /// Like `fulfill_random_words` but with caller-chosen words.
    pub fn fulfill_with_words<P: PayoutExecutor>(
        &mut self,
        request_id: RequestId,
        words: &[u64],
        raffle: &mut Raffle,
        now: i64,
        payout: &mut P,
    ) -> Result<WinnerPicked> {
        self.num_words(&request_id)?;
        self.deliver(request_id, words, raffle, now, payout)
    }

    fn num_words(&self, request_id: &RequestId) -> Result<u32> {
        match self.pending.get(request_id) {
            Some(num_words) => Ok(*num_words),
            None => {
                msg!("nonexistent request {}", request_id);
                err!(RaffleError::UnknownRequest)
            }
        }
    }

    fn deliver<P: PayoutExecutor>(
        &mut self,
        request_id: RequestId,
        words: &[u64],
        raffle: &mut Raffle,
        now: i64,
        payout: &mut P,
    ) -> Result<WinnerPicked> {
        let picked = raffle.fulfill_random_words(request_id, words, now, payout)?;
        self.pending.remove(&request_id);
        Ok(picked)
    }
}

impl RandomnessOracle for MockCoordinator {
    fn request_random_words(&mut self, config: &OracleConfig) -> Result<RequestId> {
        let request_id = RequestId::from(self.next_request_id);
        self.next_request_id = self
            .next_request_id
            .checked_add(1)
            .ok_or(RaffleError::MathOverflow)?;
        self.pending.insert(request_id, config.num_words);
        Ok(request_id)
    }
}

/// Payout executor that only records what it was asked to pay.
#[derive(Debug, Default)]
pub struct RecordingPayout {
    pub payments: Vec<(Pubkey, u64)>,
    pub reject: bool,
}

impl RecordingPayout {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn total_paid_to(&self, recipient: &Pubkey) -> u64 {
        self.payments
            .iter()
            .filter(|(to, _)| to == recipient)
            .map(|(_, amount)| amount)
            .sum()
    }
}

impl PayoutExecutor for RecordingPayout {
    fn pay(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        if self.reject {
            msg!("{} cannot receive funds", recipient);
            return err!(RaffleError::TransferFailed);
        }
        self.payments.push((*recipient, amount));
        Ok(())
    }
}

/// One tick of the off-chain keeper: probe, and perform upkeep if the probe
/// says the round is due.
pub fn run_keeper_once<O: RandomnessOracle>(
    raffle: &mut Raffle,
    now: i64,
    check_data: &[u8],
    oracle: &mut O,
) -> Result<Option<RequestedRaffleWinner>> {
    let check = raffle.check_upkeep(now, check_data);
    if !check.upkeep_needed {
        msg!("No upkeep needed");
        return Ok(None);
    }

    let requested = raffle.perform_upkeep(now, oracle)?;
    msg!("Performed upkeep with request {}", requested.request_id);
    Ok(Some(requested))
}
