use anchor_lang::prelude::*;

#[error_code]
pub enum RaffleError {
    // input rejection
    #[msg("Payment is below the entrance fee")]
    InsufficientPayment,
    #[msg("Payment exceeds the entrance fee")]
    ExcessPayment,
    #[msg("Participant index out of range")]
    IndexOutOfRange,
    #[msg("Round has reached its entrant capacity")]
    RaffleFull,
    #[msg("Invalid raffle configuration")]
    InvalidConfig,
    #[msg("Randomness response carried no words")]
    MissingRandomWords,
    #[msg("Winner account is not the drawn entrant")]
    WinnerAccountMismatch,

    // precondition failures
    #[msg("Round is not accepting entries")]
    RoundNotAcceptingEntries,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Randomness response does not match the outstanding request")]
    UnknownRequest,
    #[msg("Round has no entrants")]
    NoEntrants,
    #[msg("Round changed while awaiting randomness")]
    SnapshotMismatch,

    // downstream failures
    #[msg("Prize transfer failed")]
    TransferFailed,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("Invalid randomness account")]
    InvalidRandomnessAccount,
    #[msg("Math overflow")]
    MathOverflow,
}
