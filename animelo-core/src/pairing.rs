/// Pair selection: which two items to put in front of the user next.
///
/// Least-compared items surface first so coverage spreads over the whole
/// catalog; the store breaks ties at random so repeated runs don't show the
/// same order.
use crate::error::{RatingError, Result};
use crate::store::{OrderPolicy, RatingStore};
use crate::types::{Item, Pair};

#[derive(Debug, Clone, Copy)]
pub struct PairSelector {
    policy: OrderPolicy,
}

impl Default for PairSelector {
    fn default() -> Self {
        PairSelector {
            policy: OrderPolicy::LeastComparedFirst,
        }
    }
}

impl PairSelector {
    pub fn new(policy: OrderPolicy) -> Self {
        PairSelector { policy }
    }

    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Pick two distinct eligible items.
    pub fn select<S: RatingStore + ?Sized>(&self, store: &mut S) -> Result<Pair> {
        let candidates = store.sample_eligible(2, self.policy)?;
        let mut picked: Vec<Item> = Vec::with_capacity(2);
        for item in candidates {
            if item.eligible && picked.iter().all(|p| p.id != item.id) {
                picked.push(item);
            }
        }

        if picked.len() < 2 {
            return Err(RatingError::InsufficientCandidates { found: picked.len() });
        }

        let bottom = picked.swap_remove(1);
        let top = picked.swap_remove(0);
        tracing::debug!(
            top = top.id,
            top_comparisons = top.comparisons,
            bottom = bottom.id,
            bottom_comparisons = bottom.comparisons,
            "selected pair"
        );
        Ok(Pair { top, bottom })
    }
}
