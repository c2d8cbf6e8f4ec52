use serde::{Deserialize, Serialize};

use crate::signals::{IndicatorVote, SignalVote};

/// Counts of directional votes; `Neutral` votes count toward neither side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub buy_count: u32,
    pub sell_count: u32,
}

impl VoteTally {
    pub fn from_votes(votes: &[IndicatorVote]) -> Self {
        votes.iter().fold(Self::default(), |mut tally, v| {
            match v.vote {
                SignalVote::Buy => tally.buy_count += 1,
                SignalVote::Sell => tally.sell_count += 1,
                SignalVote::Neutral => {}
            }
            tally
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Majority wins; any tie, including no votes at all, is `Hold`.
    pub fn from_tally(tally: VoteTally) -> Self {
        use std::cmp::Ordering;

        match tally.buy_count.cmp(&tally.sell_count) {
            Ordering::Greater => Recommendation::Buy,
            Ordering::Less => Recommendation::Sell,
            Ordering::Equal => Recommendation::Hold,
        }
    }

    /// Human-readable label for the recommendation
    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Sell => "Sell",
            Recommendation::Hold => "Hold",
        }
    }
}
