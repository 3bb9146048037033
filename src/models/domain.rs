use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One of the two competing teams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

/// Which side (if any) won a ranked shot (1st/2nd/3rd closest)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Shot {
    #[default]
    Unset,
    SideA,
    SideB,
}

impl Shot {
    /// Parse a recorded selection. Unknown spellings degrade to `Unset`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "A" | "SideA" | "a" => Shot::SideA,
            "B" | "SideB" | "b" => Shot::SideB,
            _ => Shot::Unset,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Shot::Unset => None,
            Shot::SideA => Some(Side::A),
            Shot::SideB => Some(Side::B),
        }
    }

    pub fn is_set(self) -> bool {
        self != Shot::Unset
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shot::Unset => "",
            Shot::SideA => "A",
            Shot::SideB => "B",
        }
    }
}

/// Crossover-shot bonus selection for an end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CrossoverShot {
    #[default]
    None,
    SideA,
    SideB,
    /// Undecided: both sides are credited the full bonus
    Both,
}

impl CrossoverShot {
    /// Parse a recorded selection. Unknown spellings degrade to `None`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "A" | "SideA" | "a" => CrossoverShot::SideA,
            "B" | "SideB" | "b" => CrossoverShot::SideB,
            "Both" | "both" => CrossoverShot::Both,
            _ => CrossoverShot::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CrossoverShot::None => "None",
            CrossoverShot::SideA => "A",
            CrossoverShot::SideB => "B",
            CrossoverShot::Both => "Both",
        }
    }
}

macro_rules! lenient_selection_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Option::<Value>::deserialize(deserializer)?;
                Ok(raw
                    .as_ref()
                    .and_then(Value::as_str)
                    .map(<$ty>::parse)
                    .unwrap_or_default())
            }
        }
    };
}

lenient_selection_serde!(Shot);
lenient_selection_serde!(CrossoverShot);

/// Points awarded for the 1st, 2nd and 3rd closest shots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankPoints {
    #[serde(deserialize_with = "lenient_points")]
    pub first: f64,
    #[serde(deserialize_with = "lenient_points")]
    pub second: f64,
    #[serde(deserialize_with = "lenient_points")]
    pub third: f64,
}

impl RankPoints {
    /// Combined value of all three tiers, i.e. what a sweep is worth
    pub fn total(&self) -> f64 {
        self.first + self.second + self.third
    }
}

impl Default for RankPoints {
    fn default() -> Self {
        Self {
            first: 10.0,
            second: 5.0,
            third: 3.0,
        }
    }
}

/// Scoring table applied to every end of a match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    #[serde(rename = "toucherPoints", alias = "toucher", deserialize_with = "lenient_points")]
    pub toucher_points: f64,
    #[serde(rename = "crossoverBonus", alias = "crossoverShot", deserialize_with = "lenient_points")]
    pub crossover_bonus: f64,
    #[serde(rename = "rankPoints")]
    pub rank_points: RankPoints,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            toucher_points: 3.0,
            crossover_bonus: 3.0,
            rank_points: RankPoints::default(),
        }
    }
}

/// One recorded end of play
///
/// Rounds never validate themselves: every field is normalized on the way in
/// (absent numbers become zero, unknown selections become unset) so scoring
/// is defined for any input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Round {
    #[serde(deserialize_with = "lenient_count")]
    pub number: u32,
    #[serde(rename = "aTouchers", alias = "touchersA", deserialize_with = "lenient_count")]
    pub touchers_a: u32,
    #[serde(rename = "bTouchers", alias = "touchersB", deserialize_with = "lenient_count")]
    pub touchers_b: u32,
    #[serde(rename = "crossoverShot")]
    pub crossover_shot: CrossoverShot,
    pub first: Shot,
    pub second: Shot,
    pub third: Shot,
    #[serde(rename = "adjA", alias = "adjustmentA", deserialize_with = "lenient_points")]
    pub adjustment_a: f64,
    #[serde(rename = "adjB", alias = "adjustmentB", deserialize_with = "lenient_points")]
    pub adjustment_b: f64,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: String,
}

impl Round {
    /// A fresh end with nothing recorded yet
    pub fn numbered(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }
}

/// Outcome of scoring a single end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    #[serde(rename = "deltaA")]
    pub delta_a: f64,
    #[serde(rename = "deltaB")]
    pub delta_b: f64,
    /// Semicolon-joined trace of the contributions that had an effect
    pub detail: String,
    #[serde(rename = "isSweep")]
    pub is_sweep: bool,
}

/// Running point totals for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTotals {
    #[serde(rename = "sideA")]
    pub side_a: f64,
    #[serde(rename = "sideB")]
    pub side_b: f64,
}

impl MatchTotals {
    pub fn add(&mut self, result: &RoundResult) {
        self.side_a += result.delta_a;
        self.side_b += result.delta_b;
    }
}

/// Display names for the two sides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamNames {
    #[serde(rename = "A", alias = "a")]
    pub a: String,
    #[serde(rename = "B", alias = "b")]
    pub b: String,
}

impl TeamNames {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

impl Default for TeamNames {
    fn default() -> Self {
        Self::new("Team A", "Team B")
    }
}

fn lenient_number(raw: Option<Value>) -> Option<f64> {
    let value = match raw? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

/// Points (adjustments, scoring table values): any finite number, else zero
fn lenient_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_number(raw).unwrap_or(0.0))
}

/// Counts (touchers, end number): truncated toward zero, negatives clamp to zero
/// and anything past `u32::MAX` saturates there. The normalized count is what
/// gets scored and exported.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    let n = lenient_number(raw).unwrap_or(0.0);
    Ok(if n <= 0.0 { 0 } else { n.min(u32::MAX as f64) as u32 })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
