/// Rating every item starts with when it is first imported.
pub const BASELINE_RATING: i64 = 1500;

/// K-factor: the most rating points a single decision can move.
pub const K_FACTOR: f64 = 50.0;

/// Logistic scale of the Elo model. A gap of this many points means the
/// stronger item is expected to win ten times as often.
pub const ELO_SCALE: f64 = 400.0;

/// Eligibility label used when none is configured. Matches the MyAnimeList
/// `my_status` value for finished series.
pub const DEFAULT_ELIGIBLE_STATUS: &str = "Completed";
