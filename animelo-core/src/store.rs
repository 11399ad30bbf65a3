/// The rating store seam: durable point reads and writes keyed by item identity.
///
/// The engine only talks to this trait. The CLI provides the SQLite
/// implementation; [`MemoryStore`] backs tests and embedders that persist
/// elsewhere.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{RatingError, Result};
use crate::types::{Item, ItemId, NewItem};

/// Ordering applied by [`RatingStore::sample_eligible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderPolicy {
    /// Fewest comparisons first, ties broken uniformly at random.
    LeastComparedFirst,
    /// Highest rating first, ties by ascending ID.
    HighestRatedFirst,
}

pub trait RatingStore {
    /// Fetch one item. Fails with `NotFound` for unknown IDs.
    fn get(&self, id: ItemId) -> Result<Item>;

    /// Create an item at the baseline rating with zero comparisons.
    /// An existing ID is rejected with `DuplicateIdentity` and left untouched.
    fn put(&mut self, item: NewItem) -> Result<Item>;

    /// Set the rating and bump the comparison count by one, as a single write.
    fn update_rating(&mut self, id: ItemId, rating: i64) -> Result<()>;

    /// Up to `n` eligible items in `policy` order.
    fn sample_eligible(&mut self, n: usize, policy: OrderPolicy) -> Result<Vec<Item>>;
}

impl<S: RatingStore + ?Sized> RatingStore for &mut S {
    fn get(&self, id: ItemId) -> Result<Item> {
        (**self).get(id)
    }

    fn put(&mut self, item: NewItem) -> Result<Item> {
        (**self).put(item)
    }

    fn update_rating(&mut self, id: ItemId, rating: i64) -> Result<()> {
        (**self).update_rating(id, rating)
    }

    fn sample_eligible(&mut self, n: usize, policy: OrderPolicy) -> Result<Vec<Item>> {
        (**self).sample_eligible(n, policy)
    }
}

/// In-process store. Writes are "durable" as soon as the map is updated.
pub struct MemoryStore {
    items: BTreeMap<ItemId, Item>,
    eligible_status: String,
    rng: StdRng,
}

impl MemoryStore {
    pub fn new(eligible_status: impl Into<String>) -> Self {
        MemoryStore {
            items: BTreeMap::new(),
            eligible_status: eligible_status.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic tie-breaking, for reproducible tests.
    pub fn with_seed(eligible_status: impl Into<String>, seed: u64) -> Self {
        MemoryStore {
            items: BTreeMap::new(),
            eligible_status: eligible_status.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in ID order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl RatingStore for MemoryStore {
    fn get(&self, id: ItemId) -> Result<Item> {
        self.items.get(&id).cloned().ok_or(RatingError::NotFound(id))
    }

    fn put(&mut self, item: NewItem) -> Result<Item> {
        if self.items.contains_key(&item.id) {
            return Err(RatingError::DuplicateIdentity(item.id));
        }
        let item = item.into_item(&self.eligible_status);
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    fn update_rating(&mut self, id: ItemId, rating: i64) -> Result<()> {
        let item = self.items.get_mut(&id).ok_or(RatingError::NotFound(id))?;
        item.rating = rating;
        item.comparisons += 1;
        Ok(())
    }

    fn sample_eligible(&mut self, n: usize, policy: OrderPolicy) -> Result<Vec<Item>> {
        let mut eligible: Vec<Item> = self.items.values().filter(|i| i.eligible).cloned().collect();

        match policy {
            OrderPolicy::LeastComparedFirst => {
                // Shuffle, then stable sort: equal counts keep their random order.
                eligible.shuffle(&mut self.rng);
                eligible.sort_by_key(|i| i.comparisons);
            }
            OrderPolicy::HighestRatedFirst => {
                eligible.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
            }
        }

        eligible.truncate(n);
        Ok(eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASELINE_RATING;

    fn store_with(items: &[(ItemId, &str)]) -> MemoryStore {
        let mut store = MemoryStore::with_seed("Completed", 7);
        for &(id, status) in items {
            store.put(NewItem::new(id, format!("Item {id}"), status)).unwrap();
        }
        store
    }

    #[test]
    fn test_put_uses_baselines() {
        let mut store = MemoryStore::new("Completed");
        let item = store.put(NewItem::new(42, "Cowboy Bebop", "Completed")).unwrap();
        assert_eq!(item.rating, BASELINE_RATING);
        assert_eq!(item.comparisons, 0);
        assert!(item.eligible);
        assert_eq!(store.get(42).unwrap(), item);
    }

    #[test]
    fn test_put_duplicate_leaves_row_untouched() {
        let mut store = store_with(&[(1, "Completed")]);
        store.update_rating(1, 1525).unwrap();

        let err = store.put(NewItem::new(1, "Renamed", "Dropped")).unwrap_err();
        assert!(matches!(err, RatingError::DuplicateIdentity(1)));

        let item = store.get(1).unwrap();
        assert_eq!(item.title, "Item 1");
        assert_eq!(item.rating, 1525);
        assert_eq!(item.comparisons, 1);
    }

    #[test]
    fn test_get_and_update_unknown_id() {
        let mut store = store_with(&[(1, "Completed")]);
        assert!(matches!(store.get(9), Err(RatingError::NotFound(9))));
        assert!(matches!(store.update_rating(9, 1600), Err(RatingError::NotFound(9))));
    }

    #[test]
    fn test_update_rating_bumps_count() {
        let mut store = store_with(&[(1, "Completed")]);
        store.update_rating(1, 1475).unwrap();
        store.update_rating(1, 1490).unwrap();
        let item = store.get(1).unwrap();
        assert_eq!(item.rating, 1490);
        assert_eq!(item.comparisons, 2);
    }

    #[test]
    fn test_sample_skips_ineligible() {
        let mut store = store_with(&[(1, "Completed"), (2, "Watching"), (3, "Completed"), (4, "Dropped")]);
        let sample = store.sample_eligible(10, OrderPolicy::LeastComparedFirst).unwrap();
        let mut ids: Vec<ItemId> = sample.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_sample_least_compared_first() {
        let mut store = store_with(&[(1, "Completed"), (2, "Completed"), (3, "Completed")]);
        store.update_rating(1, 1500).unwrap();
        store.update_rating(2, 1500).unwrap();
        store.update_rating(2, 1500).unwrap();

        let sample = store.sample_eligible(3, OrderPolicy::LeastComparedFirst).unwrap();
        let ids: Vec<ItemId> = sample.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_sample_ties_are_shuffled() {
        let ids: Vec<(ItemId, &str)> = (0..20).map(|id| (id, "Completed")).collect();
        let mut store = store_with(&ids);

        let mut firsts = std::collections::HashSet::new();
        for _ in 0..50 {
            let sample = store.sample_eligible(1, OrderPolicy::LeastComparedFirst).unwrap();
            firsts.insert(sample[0].id);
        }
        assert!(firsts.len() > 1, "tie-break should not always pick the same item");
    }

    #[test]
    fn test_sample_highest_rated_first() {
        let mut store = store_with(&[(1, "Completed"), (2, "Completed"), (3, "Completed")]);
        store.update_rating(2, 1600).unwrap();
        store.update_rating(3, 1400).unwrap();

        let sample = store.sample_eligible(2, OrderPolicy::HighestRatedFirst).unwrap();
        let ids: Vec<ItemId> = sample.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
