/// One interactive comparison session as a state machine.
///
/// The terminal layer translates keys into [`Intent`]s and feeds them to
/// [`Session::handle`] one at a time. Every decision is written to the store
/// before `handle` returns, so quitting never loses anything.
use crate::elo::update_elo;
use crate::error::Result;
use crate::pairing::PairSelector;
use crate::store::RatingStore;
use crate::types::{Decision, Item, ItemId, Pair, RatingChange, Side};

/// What the user asked for, independent of which key they pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move the cursor without deciding.
    MoveFocus(Side),
    /// The item on this side wins.
    Confirm(Side),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// A pair is on display, waiting for the user.
    AwaitingDecision { pair: Pair, focus: Side },
    /// A winner was chosen; ratings are being written.
    Resolving { pair: Pair, winner: Side },
    Terminated,
}

pub struct Session<S: RatingStore> {
    store: S,
    selector: PairSelector,
    state: SessionState,
    decisions: usize,
    last_decision: Option<Decision>,
}

impl<S: RatingStore> Session<S> {
    /// Load the first pair. Fails with `InsufficientCandidates` when there is
    /// nothing to compare.
    pub fn start(store: S) -> Result<Self> {
        Self::with_selector(store, PairSelector::default())
    }

    pub fn with_selector(mut store: S, selector: PairSelector) -> Result<Self> {
        let pair = selector.select(&mut store)?;
        Ok(Session {
            store,
            selector,
            state: SessionState::AwaitingDecision {
                pair,
                focus: Side::Top,
            },
            decisions: 0,
            last_decision: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The pair on display, if any.
    pub fn pair(&self) -> Option<&Pair> {
        match &self.state {
            SessionState::AwaitingDecision { pair, .. } | SessionState::Resolving { pair, .. } => {
                Some(pair)
            }
            SessionState::Terminated => None,
        }
    }

    pub fn focus(&self) -> Option<Side> {
        match self.state {
            SessionState::AwaitingDecision { focus, .. } => Some(focus),
            _ => None,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.state, SessionState::Terminated)
    }

    /// Decisions completed so far in this session.
    pub fn decisions(&self) -> usize {
        self.decisions
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply one intent. Errors are fatal: the session is terminated before
    /// the error is returned.
    pub fn handle(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Quit => {
                tracing::debug!(decisions = self.decisions, "session terminated by user");
                self.state = SessionState::Terminated;
                Ok(())
            }
            Intent::MoveFocus(side) => {
                if let SessionState::AwaitingDecision { focus, .. } = &mut self.state {
                    *focus = side;
                }
                Ok(())
            }
            Intent::Confirm(winner) => {
                let pair = match std::mem::replace(&mut self.state, SessionState::Terminated) {
                    SessionState::AwaitingDecision { pair, .. } => pair,
                    other => {
                        self.state = other;
                        return Ok(());
                    }
                };
                let winner_id = pair.get(winner).id;
                let loser_id = pair.get(winner.other()).id;
                self.state = SessionState::Resolving { pair, winner };

                match self.resolve(winner_id, loser_id) {
                    Ok(next) => {
                        self.state = SessionState::AwaitingDecision {
                            pair: next,
                            focus: Side::Top,
                        };
                        Ok(())
                    }
                    Err(e) => {
                        self.state = SessionState::Terminated;
                        Err(e)
                    }
                }
            }
        }
    }

    /// Rate one decision, persist both sides, and fetch the next pair.
    fn resolve(&mut self, winner_id: ItemId, loser_id: ItemId) -> Result<Pair> {
        // Re-read so the update starts from what is persisted, not what was rendered.
        let winner = self.store.get(winner_id)?;
        let loser = self.store.get(loser_id)?;
        let (winner_rating, loser_rating) = update_elo(winner.rating, loser.rating);

        self.store.update_rating(winner.id, winner_rating)?;
        self.store.update_rating(loser.id, loser_rating)?;

        tracing::debug!(
            winner = winner.id,
            winner_rating,
            loser = loser.id,
            loser_rating,
            "decision recorded"
        );

        self.decisions += 1;
        self.last_decision = Some(Decision {
            winner: change(&winner, winner_rating),
            loser: change(&loser, loser_rating),
        });

        self.selector.select(&mut self.store)
    }
}

fn change(item: &Item, after: i64) -> RatingChange {
    RatingChange {
        id: item.id,
        title: item.title.clone(),
        before: item.rating,
        after,
    }
}
