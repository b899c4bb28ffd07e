use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::RAFFLE_SEED;
use crate::state::Raffle;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    /// The entrant, paying the entrance fee.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Raffle state account tracking the current round.
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// System program for the fee transfer.
    pub system_program: Program<'info, System>,
}

/// Enters the signer into the current round.
///
/// Steps performed:
/// 1. Check the offered amount against the entrance fee.
/// 2. Check the round is open and has room.
/// 3. Transfer exactly the entrance fee from the player to the raffle.
///
/// # Arguments
/// * `ctx` - Context containing EnterRaffle accounts
/// * `amount` - Lamports the player offers; must equal the entrance fee
pub fn process_enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let entered = ctx.accounts.raffle.enter(player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.raffle.to_account_info(),
            },
        ),
        ctx.accounts.raffle.entrance_fee,
    )?;

    emit!(entered);
    Ok(())
}
