use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Indicators that take part in the recommendation vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Rsi,
    Macd,
    Bollinger,
    MaCross,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Rsi => "rsi",
            Indicator::Macd => "macd",
            Indicator::Bollinger => "bollinger",
            Indicator::MaCross => "ma_cross",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalVote {
    Buy,
    Sell,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorVote {
    pub indicator: Indicator,
    pub vote: SignalVote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiState {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaCrossState {
    GoldenCross,
    DeadCross,
    /// Short and long averages are exactly equal
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdState {
    Rising,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BollingerState {
    Overbought,
    Oversold,
    Neutral,
}

/// Categorical reading of each indicator at one bar; `None` while the
/// underlying value is still undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorStates {
    pub rsi: Option<RsiState>,
    pub ma_cross: Option<MaCrossState>,
    pub macd: MacdState,
    pub bollinger: Option<BollingerState>,
}

pub fn rsi_state(rsi: f64) -> RsiState {
    if rsi >= RSI_OVERBOUGHT {
        RsiState::Overbought
    } else if rsi <= RSI_OVERSOLD {
        RsiState::Oversold
    } else {
        RsiState::Neutral
    }
}

pub fn ma_cross_state(ma_short: f64, ma_long: f64) -> MaCrossState {
    if ma_short > ma_long {
        MaCrossState::GoldenCross
    } else if ma_short < ma_long {
        MaCrossState::DeadCross
    } else {
        MaCrossState::Neutral
    }
}

pub fn macd_state(macd_hist: f64) -> MacdState {
    if macd_hist < 0.0 {
        MacdState::Declining
    } else {
        MacdState::Rising
    }
}

pub fn bollinger_state(close: f64, upper: f64, lower: f64) -> BollingerState {
    if close > upper {
        BollingerState::Overbought
    } else if close < lower {
        BollingerState::Oversold
    } else {
        BollingerState::Neutral
    }
}

pub fn classify(snapshot: &IndicatorSnapshot) -> IndicatorStates {
    IndicatorStates {
        rsi: snapshot.rsi.map(rsi_state),
        ma_cross: match (snapshot.ma_short, snapshot.ma_long) {
            (Some(short), Some(long)) => Some(ma_cross_state(short, long)),
            _ => None,
        },
        macd: macd_state(snapshot.macd_hist),
        bollinger: match (snapshot.bollinger_upper, snapshot.bollinger_lower) {
            (Some(upper), Some(lower)) => Some(bollinger_state(snapshot.close, upper, lower)),
            _ => None,
        },
    }
}

fn rsi_vote(current: &IndicatorSnapshot) -> Option<SignalVote> {
    let vote = match rsi_state(current.rsi?) {
        RsiState::Oversold => SignalVote::Buy,
        RsiState::Overbought => SignalVote::Sell,
        RsiState::Neutral => SignalVote::Neutral,
    };
    Some(vote)
}

// Only a fresh histogram zero-cross votes; a sustained trend does not.
fn macd_vote(current: &IndicatorSnapshot, previous: &IndicatorSnapshot) -> SignalVote {
    let (hist, prev_hist) = (current.macd_hist, previous.macd_hist);
    if hist > 0.0 && prev_hist <= 0.0 {
        SignalVote::Buy
    } else if hist < 0.0 && prev_hist >= 0.0 {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    }
}

fn bollinger_vote(current: &IndicatorSnapshot) -> Option<SignalVote> {
    let state = bollinger_state(current.close, current.bollinger_upper?, current.bollinger_lower?);
    let vote = match state {
        BollingerState::Oversold => SignalVote::Buy,
        BollingerState::Overbought => SignalVote::Sell,
        BollingerState::Neutral => SignalVote::Neutral,
    };
    Some(vote)
}

fn ma_cross_vote(current: &IndicatorSnapshot, previous: &IndicatorSnapshot) -> Option<SignalVote> {
    let (short, long) = (current.ma_short?, current.ma_long?);
    let (prev_short, prev_long) = (previous.ma_short?, previous.ma_long?);

    let vote = if short > long && prev_short <= prev_long {
        SignalVote::Buy
    } else if short < long && prev_short >= prev_long {
        SignalVote::Sell
    } else {
        SignalVote::Neutral
    };
    Some(vote)
}

/// One vote per indicator whose inputs are defined on both bars.
///
/// Indicators still in warm-up are left out entirely rather than voting
/// `Neutral`, so the result shows which indicators actually took part.
pub fn cast_votes(current: &IndicatorSnapshot, previous: &IndicatorSnapshot) -> Vec<IndicatorVote> {
    let candidates = [
        (Indicator::Rsi, rsi_vote(current)),
        (Indicator::Macd, Some(macd_vote(current, previous))),
        (Indicator::Bollinger, bollinger_vote(current)),
        (Indicator::MaCross, ma_cross_vote(current, previous)),
    ];

    candidates
        .into_iter()
        .filter_map(|(indicator, vote)| vote.map(|vote| IndicatorVote { indicator, vote }))
        .collect()
}
