/// Classic logistic Elo update for a single win/loss decision.
///
/// Pure functions over integer ratings. The caller persists the results.
use crate::constants::{ELO_SCALE, K_FACTOR};

/// Probability that an item rated `rating` is judged better than one rated `opponent`.
pub fn expected_score(rating: i64, opponent: i64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / ELO_SCALE))
}

/// New ratings for the winner and loser of one comparison.
///
/// Both changes are truncated toward zero. Since the loser's expected score is
/// `1 - expected_winner`, the winner gains exactly what the loser gives up.
pub fn update_elo(winner: i64, loser: i64) -> (i64, i64) {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = 1.0 - expected_winner;

    let winner_change = (K_FACTOR * (1.0 - expected_winner)).trunc() as i64;
    let loser_change = (K_FACTOR * (0.0 - expected_loser)).trunc() as i64;

    (winner + winner_change, loser + loser_change)
}
