use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod instructions;
#[cfg(feature = "mocks")]
pub mod mocks;
pub mod state;

pub use instructions::*;
use state::{InitializeParams, RaffleSnapshot, UpkeepCheck};

declare_id!("9ohtCM6nnwzF1xHVwmSHzVA9oTtpNyMjZAtNtWbit57e");

#[program]
pub mod raffle {
    use super::*;

    pub fn initialize(ctx: Context<InitializeRaffle>, params: InitializeParams) -> Result<()> {
        process_initialize(ctx, params)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        process_enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<ReadRaffle>, check_data: Vec<u8>) -> Result<UpkeepCheck> {
        process_check_upkeep(ctx, check_data)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        process_perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_random_words(ctx: Context<FulfillRandomWords>) -> Result<()> {
        process_fulfill_random_words(ctx)
    }

    pub fn get_raffle_state(ctx: Context<ReadRaffle>) -> Result<RaffleSnapshot> {
        Ok(ctx.accounts.raffle.snapshot())
    }

    pub fn get_player(ctx: Context<ReadRaffle>, index: u64) -> Result<Pubkey> {
        ctx.accounts.raffle.get_participant(index)
    }

    pub fn get_pool(ctx: Context<ReadRaffle>) -> Result<u64> {
        Ok(ctx.accounts.raffle.pool())
    }

    pub fn get_last_timestamp(ctx: Context<ReadRaffle>) -> Result<i64> {
        Ok(ctx.accounts.raffle.last_timestamp())
    }

    pub fn get_recent_winner(ctx: Context<ReadRaffle>) -> Result<Option<Pubkey>> {
        Ok(ctx.accounts.raffle.recent_winner)
    }
}
