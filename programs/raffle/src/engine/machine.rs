use anchor_lang::prelude::*;

use crate::constants::MAX_RANDOM_WORDS;
use crate::engine::ledger::EntryLedger;
use crate::engine::oracle::{match_outstanding, RandomnessOracle};
use crate::engine::payout::PayoutExecutor;
use crate::engine::round_clock::RoundClock;
use crate::error::RaffleError;
use crate::events::{RaffleEntered, RequestedRaffleWinner, WinnerPicked};
use crate::state::{
    InitializeParams, OutstandingRequest, Raffle, RafflePhase, RaffleSnapshot, RequestId,
    UpkeepCheck,
};

impl Raffle {
    /// Builds a fresh raffle whose first round starts at `now`.
    pub fn new(bump: u8, authority: Pubkey, params: InitializeParams, now: i64) -> Result<Self> {
        let InitializeParams {
            entrance_fee,
            interval,
            oracle,
        } = params;

        require_gt!(entrance_fee, 0, RaffleError::InvalidConfig);
        require_gt!(interval, 0, RaffleError::InvalidConfig);
        require_gt!(oracle.callback_compute_limit, 0, RaffleError::InvalidConfig);
        require!(
            (1..=MAX_RANDOM_WORDS).contains(&oracle.num_words),
            RaffleError::InvalidConfig
        );

        Ok(Self {
            bump,
            authority,
            entrance_fee,
            phase: RafflePhase::Open,
            ledger: EntryLedger::default(),
            clock: RoundClock::new(now, interval),
            oracle,
            round: 0,
            recent_winner: None,
        })
    }

    pub fn enter(&mut self, participant: Pubkey, paid_amount: u64) -> Result<RaffleEntered> {
        EntryLedger::validate_payment(paid_amount, self.entrance_fee)?;
        require!(self.phase.is_open(), RaffleError::RoundNotAcceptingEntries);

        self.ledger.record(participant, self.entrance_fee)?;
        msg!(
            "{} entered round {} ({} entrants)",
            participant,
            self.round,
            self.ledger.len()
        );

        Ok(RaffleEntered {
            player: participant,
            round: self.round,
            pool: self.ledger.pool(),
        })
    }

    /// Whether the current round may advance at `now`.
    pub fn upkeep_needed(&self, now: i64) -> bool {
        self.clock.is_due(
            now,
            !self.ledger.is_empty(),
            self.ledger.pool() > 0,
            self.phase.is_open(),
        )
    }

    /// Read-only probe polled by the scheduler. `check_data` is handed back
    /// untouched as the data to perform upkeep with.
    pub fn check_upkeep(&self, now: i64, check_data: &[u8]) -> UpkeepCheck {
        UpkeepCheck {
            upkeep_needed: self.upkeep_needed(now),
            perform_data: check_data.to_vec(),
        }
    }

    /// Closes the round to entries and asks the oracle for randomness. The
    /// readiness condition is evaluated again here; a stale positive probe is
    /// not trusted.
    pub fn perform_upkeep<O: RandomnessOracle>(
        &mut self,
        now: i64,
        oracle: &mut O,
    ) -> Result<RequestedRaffleWinner> {
        if !self.upkeep_needed(now) {
            msg!("Pool: {}", self.ledger.pool());
            msg!("Entrants: {}", self.ledger.len());
            msg!("Phase: {:?}", self.phase);
            return err!(RaffleError::UpkeepNotNeeded);
        }

        let entrant_count =
            u32::try_from(self.ledger.len()).map_err(|_| RaffleError::MathOverflow)?;
        let request_id = oracle.request_random_words(&self.oracle)?;

        let request = OutstandingRequest {
            request_id,
            requested_at: now,
            entrant_count,
            pool: self.ledger.pool(),
        };
        self.phase = RafflePhase::AwaitingRandomness(request);
        msg!("Requested randomness {} for round {}", request_id, self.round);

        Ok(RequestedRaffleWinner {
            request_id,
            round: self.round,
            entrant_count,
            pool: request.pool,
        })
    }

    /// Consumes the oracle's answer for the outstanding request: picks
    /// `entrants[random_words[0] % entrants.len()]`, pays the whole pool to
    /// them and opens the next round. Nothing is changed unless the payout
    /// succeeds.
    pub fn fulfill_random_words<P: PayoutExecutor>(
        &mut self,
        request_id: RequestId,
        random_words: &[u64],
        now: i64,
        payout: &mut P,
    ) -> Result<WinnerPicked> {
        let request = *match_outstanding(&self.phase, &request_id)?;
        let word = *random_words
            .first()
            .ok_or(RaffleError::MissingRandomWords)?;

        require!(!self.ledger.is_empty(), RaffleError::NoEntrants);
        require!(
            self.ledger.len() == request.entrant_count as usize
                && self.ledger.pool() == request.pool,
            RaffleError::SnapshotMismatch
        );

        let round = self.round;
        let next_round = round.checked_add(1).ok_or(RaffleError::MathOverflow)?;
        let winner_index = word % self.ledger.len() as u64;
        let winner = self.ledger.participant(winner_index)?;
        let amount = self.ledger.pool();

        payout.pay(&winner, amount).map_err(|e| {
            msg!("Payout of {} to {} failed: {}", amount, winner, e);
            if e == Error::from(RaffleError::WinnerAccountMismatch) {
                e
            } else {
                error!(RaffleError::TransferFailed)
            }
        })?;

        self.ledger.clear();
        self.clock.restart(now);
        self.phase = RafflePhase::Open;
        self.recent_winner = Some(winner);
        self.round = next_round;
        msg!("Round {} won by {} (index {})", round, winner, winner_index);

        Ok(WinnerPicked {
            winner,
            round,
            amount,
        })
    }

    pub fn get_participant(&self, index: u64) -> Result<Pubkey> {
        self.ledger.participant(index)
    }

    pub fn pool(&self) -> u64 {
        self.ledger.pool()
    }

    pub fn entrants(&self) -> &[Pubkey] {
        self.ledger.entrants()
    }

    pub fn last_timestamp(&self) -> i64 {
        self.clock.started_at()
    }

    pub fn interval(&self) -> u64 {
        self.clock.interval()
    }

    pub fn snapshot(&self) -> RaffleSnapshot {
        RaffleSnapshot {
            phase: self.phase,
            entrance_fee: self.entrance_fee,
            interval: self.clock.interval(),
            started_at: self.clock.started_at(),
            entrants: self.ledger.entrants().to_vec(),
            pool: self.ledger.pool(),
            round: self.round,
            recent_winner: self.recent_winner,
            num_words: self.oracle.num_words,
            request_confirmations: self.oracle.request_confirmations,
        }
    }
}
