use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::engine::SwitchboardRandomness;
use crate::state::Raffle;

/// Accounts required to close a due round and request its randomness.
///
/// Ensures:
/// 1. The round is due (interval elapsed, entrants and funds present, open).
/// 2. The randomness account was committed in the previous slot, so its
///    value cannot have been revealed yet.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// The keeper submitting the upkeep. Anyone may do so.
    pub keeper: Signer<'info>,

    /// The raffle state account.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_account = ctx.accounts.randomness_account_data.to_account_info();
    let mut oracle = SwitchboardRandomness::new(&randomness_account, &clock);

    msg!(
        "Upkeep by {} ({} bytes of perform data)",
        ctx.accounts.keeper.key(),
        perform_data.len()
    );
    let requested = ctx
        .accounts
        .raffle
        .perform_upkeep(clock.unix_timestamp, &mut oracle)?;

    emit!(requested);
    Ok(())
}
