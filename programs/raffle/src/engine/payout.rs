use anchor_lang::prelude::*;

use crate::error::RaffleError;

/// Moves the prize to the winner. Implementations only move value; the
/// round bookkeeping is done by the caller after `pay` succeeds.
pub trait PayoutExecutor {
    fn pay(&mut self, recipient: &Pubkey, amount: u64) -> Result<()>;
}

/// Pays out of the program-owned raffle account by moving lamports directly.
/// The vault never drops below `reserve`, the rent-exempt minimum of its data.
pub struct LamportPayout<'a, 'info> {
    vault: &'a AccountInfo<'info>,
    recipient: &'a AccountInfo<'info>,
    reserve: u64,
}

impl<'a, 'info> LamportPayout<'a, 'info> {
    pub fn new(vault: &'a AccountInfo<'info>, recipient: &'a AccountInfo<'info>, reserve: u64) -> Self {
        Self {
            vault,
            recipient,
            reserve,
        }
    }
}

impl PayoutExecutor for LamportPayout<'_, '_> {
    fn pay(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        if self.recipient.key != recipient {
            msg!("Winner: {}", recipient);
            msg!("Recipient account: {}", self.recipient.key);
            return err!(RaffleError::WinnerAccountMismatch);
        }
        if self.recipient.key == self.vault.key
            || !self.recipient.is_writable
            || self.recipient.executable
        {
            msg!("Recipient {} cannot receive funds", recipient);
            return err!(RaffleError::TransferFailed);
        }

        let vault_after = self
            .vault
            .lamports()
            .checked_sub(amount)
            .filter(|left| *left >= self.reserve)
            .ok_or(RaffleError::TransferFailed)?;
        let recipient_after = self
            .recipient
            .lamports()
            .checked_add(amount)
            .ok_or(RaffleError::TransferFailed)?;

        **self.vault.try_borrow_mut_lamports()? = vault_after;
        **self.recipient.try_borrow_mut_lamports()? = recipient_after;

        msg!("Paid {} lamports to {}", amount, recipient);
        Ok(())
    }
}
