use anchor_lang::prelude::*;

use crate::constants::RAFFLE_SEED;
use crate::state::{InitializeParams, Raffle};

/// Accounts required to create the raffle.
/// The raffle PDA holds both the round state and the pooled lamports.
#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The raffle state account, also the prize vault.
    #[account(
        init,
        payer = payer,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Creates the raffle with its fixed entrance fee, interval and oracle
/// parameters, and opens the first round at the current cluster time.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeRaffle accounts
/// * `params` - Entrance fee (lamports), interval (seconds) and oracle settings
pub fn process_initialize(ctx: Context<InitializeRaffle>, params: InitializeParams) -> Result<()> {
    let clock = Clock::get()?;
    let raffle = Raffle::new(
        ctx.bumps.raffle,
        ctx.accounts.payer.key(),
        params,
        clock.unix_timestamp,
    )?;

    msg!(
        "Raffle created: fee {} lamports, interval {}s",
        params.entrance_fee,
        params.interval
    );
    ctx.accounts.raffle.set_inner(raffle);

    Ok(())
}
