use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::{Raffle, UpkeepCheck};

/// Read-only access to the raffle, shared by the probe and the getters.
#[derive(Accounts)]
pub struct ReadRaffle<'info> {
    #[account(
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,
}

/// Answers the keeper's "is it time" probe. Never mutates the raffle; the
/// answer is not trusted by `perform_upkeep`, which checks again.
pub fn process_check_upkeep(ctx: Context<ReadRaffle>, check_data: Vec<u8>) -> Result<UpkeepCheck> {
    let clock = Clock::get()?;
    Ok(ctx.accounts.raffle.check_upkeep(clock.unix_timestamp, &check_data))
}
