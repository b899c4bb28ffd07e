use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use raffle::engine::RandomnessOracle;
use raffle::error::RaffleError;
use raffle::mocks::{run_keeper_once, MockCoordinator, RecordingPayout};
use raffle::state::{InitializeParams, OracleConfig, Raffle, RafflePhase, RequestId};

const FEE: u64 = 100;
const INTERVAL: u64 = 30;
const START: i64 = 1_700_000_000;

/// Oracle that always hands out the same request id.
struct FixedOracle(u64);

impl RandomnessOracle for FixedOracle {
    fn request_random_words(&mut self, _config: &OracleConfig) -> Result<RequestId> {
        Ok(RequestId::from(self.0))
    }
}

fn new_raffle() -> Raffle {
    Raffle::new(
        254,
        Pubkey::new_unique(),
        InitializeParams {
            entrance_fee: FEE,
            interval: INTERVAL,
            oracle: OracleConfig {
                key_hash: [0x47; 32],
                subscription_id: 588,
                request_confirmations: 3,
                callback_compute_limit: 500_000,
                num_words: 1,
            },
        },
        START,
    )
    .unwrap()
}

fn after_interval() -> i64 {
    START + INTERVAL as i64
}

#[test]
fn single_entrant_wins_whole_pool() {
    let mut raffle = new_raffle();
    let p1 = Pubkey::new_unique();

    raffle.enter(p1, 100).unwrap();
    assert_eq!(raffle.pool(), 100);
    assert_eq!(raffle.entrants(), &[p1]);

    assert!(raffle.check_upkeep(after_interval(), b"").upkeep_needed);
    let requested = raffle
        .perform_upkeep(after_interval(), &mut FixedOracle(7))
        .unwrap();
    assert_eq!(requested.request_id, RequestId::from(7u64));
    assert_eq!(requested.pool, 100);

    let mut payout = RecordingPayout::default();
    let resolved_at = after_interval() + 5;
    let picked = raffle
        .fulfill_random_words(RequestId::from(7u64), &[42], resolved_at, &mut payout)
        .unwrap();

    assert_eq!(picked.winner, p1);
    assert_eq!(payout.payments, vec![(p1, 100)]);
    assert_eq!(raffle.pool(), 0);
    assert!(raffle.entrants().is_empty());
    assert_eq!(raffle.phase, RafflePhase::Open);
    assert_eq!(raffle.last_timestamp(), resolved_at);
    assert_eq!(raffle.recent_winner, Some(p1));
}

#[test]
fn second_entrant_wins_on_odd_word() {
    let mut raffle = new_raffle();
    let (p1, p2) = (Pubkey::new_unique(), Pubkey::new_unique());
    raffle.enter(p1, FEE).unwrap();
    raffle.enter(p2, FEE).unwrap();
    assert_eq!(raffle.pool(), 200);

    let requested = raffle
        .perform_upkeep(after_interval(), &mut FixedOracle(11))
        .unwrap();
    let mut payout = RecordingPayout::default();
    let picked = raffle
        .fulfill_random_words(requested.request_id, &[3], after_interval(), &mut payout)
        .unwrap();

    assert_eq!(picked.winner, p2);
    assert_eq!(picked.amount, 200);
    assert_eq!(payout.payments, vec![(p2, 200)]);
    assert_eq!(payout.total_paid_to(&p1), 0);
}

#[test]
fn second_upkeep_before_resolution_is_rejected() {
    let mut raffle = new_raffle();
    let player = Pubkey::new_unique();
    raffle.enter(player, FEE).unwrap();

    let first = raffle
        .perform_upkeep(after_interval(), &mut FixedOracle(1))
        .unwrap();
    assert_eq!(
        raffle
            .perform_upkeep(after_interval() + 60, &mut FixedOracle(2))
            .unwrap_err(),
        Error::from(RaffleError::UpkeepNotNeeded)
    );
    assert_eq!(
        raffle.phase.outstanding().unwrap().request_id,
        first.request_id
    );

    // the id the rejected call would have used is not accepted either
    let mut payout = RecordingPayout::default();
    assert_eq!(
        raffle
            .fulfill_random_words(RequestId::from(2u64), &[0], after_interval(), &mut payout)
            .unwrap_err(),
        Error::from(RaffleError::UnknownRequest)
    );
    raffle
        .fulfill_random_words(first.request_id, &[0], after_interval(), &mut payout)
        .unwrap();
    assert_eq!(payout.payments, vec![(player, FEE)]);
}

#[test]
fn failed_payout_leaves_round_awaiting() {
    let mut raffle = new_raffle();
    let players = [Pubkey::new_unique(), Pubkey::new_unique()];
    for player in players {
        raffle.enter(player, FEE).unwrap();
    }
    let requested = raffle
        .perform_upkeep(after_interval(), &mut FixedOracle(9))
        .unwrap();
    let before = raffle.snapshot();

    let mut payout = RecordingPayout::rejecting();
    assert_eq!(
        raffle
            .fulfill_random_words(requested.request_id, &[1], after_interval(), &mut payout)
            .unwrap_err(),
        Error::from(RaffleError::TransferFailed)
    );

    assert_eq!(raffle.snapshot(), before);
    assert!(matches!(raffle.phase, RafflePhase::AwaitingRandomness(_)));
    assert_eq!(raffle.entrants(), &players);
    assert_eq!(raffle.pool(), 2 * FEE);
    assert!(payout.payments.is_empty());
}

#[test]
fn coordinator_rejects_nonexistent_requests() {
    let mut raffle = new_raffle();
    raffle.enter(Pubkey::new_unique(), FEE).unwrap();
    let mut coordinator = MockCoordinator::new();
    let mut payout = RecordingPayout::default();

    for id in [0u64, 1] {
        assert_eq!(
            coordinator
                .fulfill_random_words(RequestId::from(id), &mut raffle, after_interval(), &mut payout)
                .unwrap_err(),
            Error::from(RaffleError::UnknownRequest)
        );
    }
    assert!(raffle.phase.is_open());
}

#[test]
fn keeper_and_coordinator_run_a_full_round() {
    let mut raffle = new_raffle();
    let mut coordinator = MockCoordinator::new();
    let mut payout = RecordingPayout::default();
    let players: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
    for player in &players {
        raffle.enter(*player, FEE).unwrap();
    }

    assert!(run_keeper_once(&mut raffle, after_interval() - 1, b"", &mut coordinator)
        .unwrap()
        .is_none());
    let requested = run_keeper_once(&mut raffle, after_interval(), b"", &mut coordinator)
        .unwrap()
        .unwrap();
    assert_eq!(requested.request_id, RequestId::from(1u64));
    assert!(coordinator.is_pending(&requested.request_id));

    // nothing more to do while the request is in flight
    assert!(run_keeper_once(&mut raffle, after_interval() + 1, b"", &mut coordinator)
        .unwrap()
        .is_none());

    let words = MockCoordinator::random_words(&requested.request_id, 1);
    let expected = players[(words[0] % players.len() as u64) as usize];
    let picked = coordinator
        .fulfill_random_words(requested.request_id, &mut raffle, after_interval() + 2, &mut payout)
        .unwrap();

    assert_eq!(picked.winner, expected);
    assert_eq!(payout.total_paid_to(&expected), 4 * FEE);
    assert_eq!(coordinator.pending(), 0);
    assert_eq!(raffle.recent_winner, Some(expected));
    assert_eq!(raffle.round, 1);

    // the same response delivered again has no effect
    assert_eq!(
        coordinator
            .fulfill_random_words(requested.request_id, &mut raffle, after_interval() + 3, &mut payout)
            .unwrap_err(),
        Error::from(RaffleError::UnknownRequest)
    );
    assert_eq!(payout.payments.len(), 1);
}

#[test]
fn coordinator_keeps_request_pending_after_failed_delivery() {
    let mut raffle = new_raffle();
    let mut coordinator = MockCoordinator::new();
    let player = Pubkey::new_unique();
    raffle.enter(player, FEE).unwrap();
    let requested = raffle
        .perform_upkeep(after_interval(), &mut coordinator)
        .unwrap();

    assert!(coordinator
        .fulfill_random_words(
            requested.request_id,
            &mut raffle,
            after_interval(),
            &mut RecordingPayout::rejecting()
        )
        .is_err());
    assert!(coordinator.is_pending(&requested.request_id));

    let mut payout = RecordingPayout::default();
    let picked = coordinator
        .fulfill_with_words(requested.request_id, &[77], &mut raffle, after_interval(), &mut payout)
        .unwrap();
    assert_eq!(picked.winner, player);
    assert!(!coordinator.is_pending(&requested.request_id));
}

#[test]
fn next_round_waits_a_full_interval() {
    let mut raffle = new_raffle();
    let mut coordinator = MockCoordinator::new();
    let mut payout = RecordingPayout::default();
    raffle.enter(Pubkey::new_unique(), FEE).unwrap();

    let resolved_at = after_interval() + 100;
    let requested = raffle
        .perform_upkeep(after_interval(), &mut coordinator)
        .unwrap();
    coordinator
        .fulfill_random_words(requested.request_id, &mut raffle, resolved_at, &mut payout)
        .unwrap();

    raffle.enter(Pubkey::new_unique(), FEE).unwrap();
    assert!(!raffle.upkeep_needed(resolved_at + INTERVAL as i64 - 1));
    assert!(raffle.upkeep_needed(resolved_at + INTERVAL as i64));

    let second = raffle
        .perform_upkeep(resolved_at + INTERVAL as i64, &mut coordinator)
        .unwrap();
    assert_eq!(second.request_id, RequestId::from(2u64));
    assert_eq!(second.round, 1);
}

#[test]
fn getters_follow_the_round() {
    let mut raffle = new_raffle();
    let player = Pubkey::new_unique();
    raffle.enter(player, FEE).unwrap();

    assert_eq!(raffle.get_participant(0).unwrap(), player);
    assert_eq!(
        raffle.get_participant(1).unwrap_err(),
        Error::from(RaffleError::IndexOutOfRange)
    );

    let snapshot = raffle.snapshot();
    assert_eq!(snapshot.entrance_fee, FEE);
    assert_eq!(snapshot.interval, INTERVAL);
    assert_eq!(snapshot.started_at, START);
    assert_eq!(snapshot.entrants, vec![player]);
    assert_eq!(snapshot.pool, FEE);
    assert_eq!(snapshot.num_words, 1);
    assert_eq!(snapshot.request_confirmations, 3);
    assert_eq!(snapshot.recent_winner, None);
}
