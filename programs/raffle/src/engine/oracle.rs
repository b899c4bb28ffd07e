use std::cell::Ref;

use anchor_lang::prelude::*;
use solana_program::keccak;
use switchboard_on_demand::accounts::RandomnessAccountData;
use switchboard_on_demand::SWITCHBOARD_ON_DEMAND_PROGRAM_ID;

use crate::constants::MAX_RANDOM_WORDS;
use crate::error::RaffleError;
use crate::state::{OracleConfig, OutstandingRequest, RafflePhase, RequestId};

/// Issues randomness requests on behalf of the raffle. The answer arrives
/// later through a separate `fulfill_random_words` call carrying the id
/// returned here.
pub trait RandomnessOracle {
    fn request_random_words(&mut self, config: &OracleConfig) -> Result<RequestId>;
}

/// Returns the outstanding request if `request_id` is exactly the live one.
/// Only one request is ever retained, so replays of resolved ids and ids that
/// were never issued are rejected the same way.
pub fn match_outstanding<'a>(
    phase: &'a RafflePhase,
    request_id: &RequestId,
) -> Result<&'a OutstandingRequest> {
    match phase.outstanding() {
        Some(request) if request.request_id == *request_id => Ok(request),
        Some(request) => {
            msg!("Expected request {}, got {}", request.request_id, request_id);
            err!(RaffleError::UnknownRequest)
        }
        None => {
            msg!("No request outstanding, got {}", request_id);
            err!(RaffleError::UnknownRequest)
        }
    }
}

/// Splits a 32-byte reveal into little-endian words.
pub fn expand_random_words(value: &[u8; 32], num_words: u32) -> Vec<u64> {
    let count = num_words.min(MAX_RANDOM_WORDS) as usize;
    value
        .chunks_exact(8)
        .take(count)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect()
}

/// Identifies one commitment of a Switchboard randomness account. The same
/// account committed again at a later slot is a different request.
pub fn commitment_id(account: &Pubkey, seed_slot: u64) -> RequestId {
    RequestId(keccak::hashv(&[account.as_ref(), seed_slot.to_le_bytes().as_ref()]).to_bytes())
}

/// Switchboard on-demand randomness. A request is a commitment to a
/// randomness account seeded in the previous slot, identified by the
/// account address and its seed slot.
pub struct SwitchboardRandomness<'a, 'info> {
    account: &'a AccountInfo<'info>,
    clock: &'a Clock,
}

impl<'a, 'info> SwitchboardRandomness<'a, 'info> {
    pub fn new(account: &'a AccountInfo<'info>, clock: &'a Clock) -> Self {
        Self { account, clock }
    }

    /// Only accounts owned by the on-demand program carry oracle output.
    fn load(&self) -> Result<Ref<'a, RandomnessAccountData>> {
        if *self.account.owner != *SWITCHBOARD_ON_DEMAND_PROGRAM_ID {
            msg!("Randomness account owner: {}", self.account.owner);
            return err!(RaffleError::InvalidRandomnessAccount);
        }
        RandomnessAccountData::parse(self.account.data.borrow())
            .map_err(|_| error!(RaffleError::InvalidRandomnessAccount))
    }

    /// The request the account's current commitment answers.
    pub fn request_id(&self) -> Result<RequestId> {
        let data = self.load()?;
        Ok(commitment_id(self.account.key, data.seed_slot))
    }

    /// Reads the revealed value and expands it into `num_words` words.
    pub fn revealed_words(&self, num_words: u32) -> Result<Vec<u64>> {
        let data = self.load()?;
        let value = data
            .get_value(self.clock)
            .map_err(|_| error!(RaffleError::RandomnessNotResolved))?;

        Ok(expand_random_words(&value, num_words))
    }
}

impl RandomnessOracle for SwitchboardRandomness<'_, '_> {
    fn request_random_words(&mut self, config: &OracleConfig) -> Result<RequestId> {
        let data = self.load()?;

        if data.seed_slot != self.clock.slot.saturating_sub(1) {
            msg!("Seed slot: {}", data.seed_slot);
            msg!("Current slot: {}", self.clock.slot);
            return err!(RaffleError::RandomnessAlreadyRevealed);
        }

        msg!(
            "Committed to randomness account {} at slot {} for {} word(s)",
            self.account.key,
            data.seed_slot,
            config.num_words
        );
        Ok(commitment_id(self.account.key, data.seed_slot))
    }
}
