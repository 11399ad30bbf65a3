/// animelo-core: pairwise Elo rating engine.
///
/// Pick two items → ask a human which is better → move both ratings → repeat.
/// Storage sits behind the [`RatingStore`] trait; this crate does no I/O of its own.
///
/// Items are identified by their external catalog `i64` ID. Ratings are
/// integers starting at 1500; each decision moves at most 50 points.
///
/// # Quick start
///
/// ```rust
/// use animelo_core::{Intent, MemoryStore, NewItem, RatingStore, Session, Side};
///
/// let mut store = MemoryStore::new("Completed");
/// store.put(NewItem::new(1, "Cowboy Bebop", "Completed")).unwrap();
/// store.put(NewItem::new(6, "Trigun", "Completed")).unwrap();
///
/// let mut session = Session::start(&mut store).unwrap();
/// session.handle(Intent::Confirm(Side::Top)).unwrap();
///
/// let decision = session.last_decision().unwrap();
/// println!("{} {} → {}", decision.winner.title, decision.winner.before, decision.winner.after);
/// assert_eq!(decision.winner.after, 1525);
/// ```

pub mod constants;
pub mod elo;
pub mod error;
pub mod pairing;
pub mod session;
pub mod store;
pub mod types;

// Re-export primary public API at crate root.
pub use constants::{BASELINE_RATING, DEFAULT_ELIGIBLE_STATUS, K_FACTOR};
pub use elo::{expected_score, update_elo};
pub use error::{RatingError, Result};
pub use pairing::PairSelector;
pub use session::{Intent, Session, SessionState};
pub use store::{MemoryStore, OrderPolicy, RatingStore};
pub use types::{Decision, Item, ItemId, NewItem, Pair, RatingChange, Side};
