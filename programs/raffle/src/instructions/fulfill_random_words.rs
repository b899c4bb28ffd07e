use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::engine::oracle::match_outstanding;
use crate::engine::{LamportPayout, SwitchboardRandomness};
use crate::state::Raffle;

/// Accounts required to resolve the outstanding randomness request.
///
/// Ensures:
/// 1. The randomness account is owned by Switchboard and still carries the
///    commitment made by `perform_upkeep`.
/// 2. Its value has been revealed.
/// 3. The winner account is the drawn entrant and can receive lamports.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// Account paying transaction fees. Anyone may deliver a revealed value.
    pub payer: Signer<'info>,

    /// The raffle state account, also the prize vault.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    /// Randomness account from Switchboard.
    /// CHECK: Owner and layout are validated in the handler, then matched
    /// against the outstanding request.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// The winner receiving the pool.
    /// CHECK: Compared with the drawn entrant before any lamports move.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Resolves the round:
/// 1. Reject randomness accounts, or later commitments of the same account,
///    other than the outstanding one.
/// 2. Read the revealed value and expand it into words.
/// 3. Draw the winner, pay the pool and open the next round.
pub fn process_fulfill_random_words(ctx: Context<FulfillRandomWords>) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_account = ctx.accounts.randomness_account_data.to_account_info();
    let oracle = SwitchboardRandomness::new(&randomness_account, &clock);
    let request_id = oracle.request_id()?;

    match_outstanding(&ctx.accounts.raffle.phase, &request_id)?;
    let words = oracle.revealed_words(ctx.accounts.raffle.oracle.num_words)?;
    msg!("Randomness result: {:?}", words);

    let vault = ctx.accounts.raffle.to_account_info();
    let winner = ctx.accounts.winner.to_account_info();
    let reserve = Rent::get()?.minimum_balance(vault.data_len());
    let mut payout = LamportPayout::new(&vault, &winner, reserve);

    let picked = ctx.accounts.raffle.fulfill_random_words(
        request_id,
        &words,
        clock.unix_timestamp,
        &mut payout,
    )?;

    emit!(picked);
    Ok(())
}
