/// Data types shared by the store, the selector and the session.
///
/// Items are identified by their external catalog `i64` ID (the MyAnimeList
/// anime ID for imported lists). The ID is the store key, never an internal
/// row number, so re-importing a catalog cannot duplicate rating rows.
use crate::constants::BASELINE_RATING;

/// External catalog identity of an item.
pub type ItemId = i64;

/// A catalog entry as held by a [`RatingStore`](crate::store::RatingStore).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Eligibility label as it appeared in the source catalog (e.g. "Completed").
    pub status: String,
    /// Whether `status` matches the store's eligible label. Fixed at import.
    pub eligible: bool,
    pub rating: i64,
    /// Number of decisions this item has been part of, won or lost.
    pub comparisons: u32,
}

/// Everything needed to create an item. Rating and comparison count always
/// start at their baselines, so they are not part of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewItem {
    pub id: ItemId,
    pub title: String,
    pub status: String,
}

impl NewItem {
    pub fn new(id: ItemId, title: impl Into<String>, status: impl Into<String>) -> Self {
        NewItem {
            id,
            title: title.into(),
            status: status.into(),
        }
    }

    /// Materialize the item with baseline rating and zero comparisons.
    pub fn into_item(self, eligible_status: &str) -> Item {
        let eligible = self.status == eligible_status;
        Item {
            id: self.id,
            title: self.title,
            status: self.status,
            eligible,
            rating: BASELINE_RATING,
            comparisons: 0,
        }
    }
}

/// One of the two display slots of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// Two distinct eligible items on display. Which one sits on top carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    pub top: Item,
    pub bottom: Item,
}

impl Pair {
    pub fn get(&self, side: Side) -> &Item {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }
}

/// Rating movement of one participant in a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingChange {
    pub id: ItemId,
    pub title: String,
    pub before: i64,
    pub after: i64,
}

impl RatingChange {
    pub fn delta(&self) -> i64 {
        self.after - self.before
    }
}

/// A completed comparison: who won, who lost, and how both ratings moved.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub winner: RatingChange,
    pub loser: RatingChange,
}
