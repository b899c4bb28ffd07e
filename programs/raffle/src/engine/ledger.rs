use anchor_lang::prelude::*;

use crate::constants::MAX_ENTRANTS;
use crate::error::RaffleError;

/// Participants of the current round, in entry order, and the funds they
/// pooled. `pool` always equals `entrants.len() * entrance_fee`; the two are
/// only ever changed together.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct EntryLedger {
    #[max_len(MAX_ENTRANTS)]
    entrants: Vec<Pubkey>,
    pool: u64,
}

impl EntryLedger {
    /// Checks a payment against the entrance fee. Underpayment and
    /// overpayment are both rejected; excess is never taken and refunded.
    pub fn validate_payment(paid_amount: u64, entrance_fee: u64) -> Result<()> {
        require_gte!(paid_amount, entrance_fee, RaffleError::InsufficientPayment);
        require!(paid_amount == entrance_fee, RaffleError::ExcessPayment);
        Ok(())
    }

    pub(crate) fn record(&mut self, participant: Pubkey, entrance_fee: u64) -> Result<()> {
        require!(self.entrants.len() < MAX_ENTRANTS, RaffleError::RaffleFull);
        let pool = self
            .pool
            .checked_add(entrance_fee)
            .ok_or(RaffleError::MathOverflow)?;

        self.entrants.push(participant);
        self.pool = pool;
        Ok(())
    }

    /// Empties the round. Only called once the prize has left the vault.
    pub(crate) fn clear(&mut self) {
        self.entrants.clear();
        self.pool = 0;
    }

    pub fn participant(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.entrants.get(index))
            .copied()
            .ok_or_else(|| error!(RaffleError::IndexOutOfRange))
    }

    pub fn entrants(&self) -> &[Pubkey] {
        &self.entrants
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn pool(&self) -> u64 {
        self.pool
    }
}
